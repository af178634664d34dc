mod fonts;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::prelude::*;

use cardsmith_core::deck::canonical_sequence;
use cardsmith_core::export::{self, ATLAS_FILE, BACK_FILE, META_FILE};
use cardsmith_core::pipeline::build_assets;
use cardsmith_core::render::{ButtonKind, CardRenderer};
use cardsmith_core::style::{self, CardStyle, FontPaths};
use cardsmith_core::VERSION;

#[derive(Parser, Debug)]
#[command(name = "cardsmith", version = VERSION, about = "Procedural playing-card asset generator")]
struct Cli {
    // No subcommand means `generate` with default options.
    #[command(subcommand)]
    cmd: Option<Command>,
}

impl Cli {
    fn command(self) -> Command {
        self.cmd.unwrap_or_else(|| Command::Generate(GenerateArgs::default()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
    Basic,
    Premium,
}

impl Preset {
    fn style(self) -> CardStyle {
        match self {
            Preset::Basic => CardStyle::basic(),
            Preset::Premium => CardStyle::premium(),
        }
    }
}

#[derive(Args, Debug, PartialEq, Eq)]
struct GenerateArgs {
    #[arg(long, default_value = "assets")]
    out_dir: PathBuf,
    /// YAML style file (takes precedence over --preset)
    #[arg(long)]
    style: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = Preset::Premium)]
    preset: Preset,
    /// Regular font to try before any other (repeatable)
    #[arg(long = "font")]
    fonts: Vec<PathBuf>,
    /// Bold font to try before any other (repeatable)
    #[arg(long = "bold-font")]
    bold_fonts: Vec<PathBuf>,
    /// Do not search platform font locations
    #[arg(long)]
    no_system_fonts: bool,
}

// Must agree with the clap defaults above.
impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("assets"),
            style: None,
            preset: Preset::Premium,
            fonts: Vec::new(),
            bold_fonts: Vec::new(),
            no_system_fonts: false,
        }
    }
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Render the card atlas, card back, buttons and atlas metadata (the default)
    Generate(GenerateArgs),
    /// Load a style YAML and print a summary
    Inspect { path: PathBuf },
    /// Print a preset style as YAML
    DumpStyle {
        #[arg(long, value_enum, default_value_t = Preset::Premium)]
        preset: Preset,
    },
    /// Check a generated asset directory against the atlas contract
    Verify {
        dir: PathBuf,
        /// Style the assets were generated with (button size)
        #[arg(long)]
        style: Option<PathBuf>,
    },
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cardsmith=info,cardsmith_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> Result<()> {
    init_logging();
    match Cli::parse().command() {
        Command::Generate(GenerateArgs {
            out_dir,
            style: style_path,
            preset,
            fonts: regular,
            bold_fonts: bold,
            no_system_fonts,
        }) => {
            let mut card_style = match &style_path {
                Some(path) => style::load_from_path(path)?,
                None => preset.style(),
            };
            let explicit = FontPaths { regular, bold };
            card_style.fonts = fonts::merge(explicit, std::mem::take(&mut card_style.fonts));
            if !no_system_fonts {
                card_style.fonts = fonts::merge(std::mem::take(&mut card_style.fonts), fonts::system_candidates());
            }

            let renderer = CardRenderer::from_style(card_style);
            if !renderer.glyphs().has_font() {
                info!("rendering with built-in glyphs");
            }
            let bundle = build_assets(&renderer)?;
            let written = export::write_bundle(&bundle, &out_dir)
                .with_context(|| format!("failed to write assets to {}", out_dir.display()))?;
            for path in written {
                println!("wrote {}", path.display());
            }
        }
        Command::Inspect { path } => {
            let s = style::load_from_path(&path)?;
            println!("Loaded style: {}", path.display());
            println!("  card: {}x{} (radius {:.1}, border {}px)", s.card.width, s.card.height, s.card.corner_radius, s.card.border_width);
            println!(
                "  atlas: {}x{} cells of {}x{} -> {}x{}",
                s.atlas.cols, s.atlas.rows, s.atlas.cell_width, s.atlas.cell_height, s.atlas.width(), s.atlas.height()
            );
            println!("  buttons: {}x{} (radius {:.1})", s.buttons.width, s.buttons.height, s.buttons.radius);
            println!("  effects: {:?}", s.effects);
            println!("  jokers: {} / {}", s.labels.small_joker.primary, s.labels.big_joker.primary);
            println!("  fonts: {} regular, {} bold candidates", s.fonts.regular.len(), s.fonts.bold.len());
        }
        Command::DumpStyle { preset } => {
            print!("{}", serde_yaml::to_string(&preset.style())?);
        }
        Command::Verify { dir, style: style_path } => {
            let card_style = match &style_path {
                Some(path) => style::load_from_path(path)?,
                None => CardStyle::default(),
            };
            verify(&dir, &card_style)?;
        }
    }
    Ok(())
}

fn check_size(path: &Path, expected: (u32, u32)) -> Result<bool> {
    let actual = image::image_dimensions(path).with_context(|| format!("failed to read {}", path.display()))?;
    let ok = actual == expected;
    println!(
        "  [{}] {} {}x{}",
        if ok { "ok" } else { "FAIL" },
        path.display(),
        actual.0,
        actual.1
    );
    Ok(ok)
}

fn verify(dir: &Path, card_style: &CardStyle) -> Result<()> {
    let meta = export::read_meta(&dir.join(META_FILE))?;
    let grid = meta.grid();
    println!("Verifying {}", dir.display());

    let mut ok = check_size(&dir.join(ATLAS_FILE), (grid.width(), grid.height()))?;
    ok &= check_size(&dir.join(BACK_FILE), (grid.cell_width, grid.cell_height))?;
    for kind in ButtonKind::ALL {
        ok &= check_size(&dir.join(kind.file_name()), (card_style.buttons.width, card_style.buttons.height))?;
    }

    let expected = canonical_sequence();
    let keys_match = meta.frames.len() == expected.len()
        && meta.frames.iter().zip(&expected).all(|(f, id)| f.key == id.key());
    println!("  [{}] {} frames in canonical order", if keys_match { "ok" } else { "FAIL" }, meta.frames.len());

    if !(ok && keys_match) {
        bail!("asset directory {} does not match the atlas contract", dir.display());
    }
    println!("All assets valid.");
    Ok(())
}
