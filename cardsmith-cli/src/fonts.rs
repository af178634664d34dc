//! Platform font candidates tried when neither the style nor the command line names any.

use std::path::PathBuf;

use cardsmith_core::style::FontPaths;

// CJK-capable faces come first so joker labels and the back logo render.
const REGULAR: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "C:\\Windows\\Fonts\\msyh.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

const BOLD: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Bold.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Bold.ttc",
    "C:\\Windows\\Fonts\\msyhbd.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

pub fn system_candidates() -> FontPaths {
    let paths = |list: &[&str]| list.iter().map(PathBuf::from).collect();
    FontPaths { regular: paths(REGULAR), bold: paths(BOLD) }
}

/// Explicit paths first, then whatever the style already lists.
pub fn merge(explicit: FontPaths, from_style: FontPaths) -> FontPaths {
    let chain = |mut a: Vec<PathBuf>, b: Vec<PathBuf>| {
        for p in b {
            if !a.contains(&p) {
                a.push(p);
            }
        }
        a
    };
    FontPaths {
        regular: chain(explicit.regular, from_style.regular),
        bold: chain(explicit.bold, from_style.bold),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefers_explicit_and_dedups() {
        let explicit = FontPaths { regular: vec!["a.ttf".into()], bold: vec![] };
        let style = FontPaths { regular: vec!["b.ttf".into(), "a.ttf".into()], bold: vec!["c.ttf".into()] };
        let merged = merge(explicit, style);
        assert_eq!(merged.regular, vec![PathBuf::from("a.ttf"), PathBuf::from("b.ttf")]);
        assert_eq!(merged.bold, vec![PathBuf::from("c.ttf")]);
    }

    #[test]
    fn test_system_candidates_are_populated() {
        let c = system_candidates();
        assert!(!c.regular.is_empty() && !c.bold.is_empty());
    }
}
