//! Pip layouts for the numbered ranks.
//!
//! Offsets are relative to the card center on a 280px-wide reference card
//! (y grows downward) and are scaled with the working size by the compositor.
//! Rows sit on a small set of anchors and every layout is mirror-symmetric
//! about the vertical axis.

use glam::Vec2;

use crate::error::{CardError, Result};

const L: f32 = -40.0;
const R: f32 = 40.0;

const fn p(x: f32, y: f32) -> Vec2 { Vec2::new(x, y) }

const TWO: [Vec2; 2] = [p(0.0, -80.0), p(0.0, 80.0)];
const THREE: [Vec2; 3] = [p(0.0, -80.0), p(0.0, 0.0), p(0.0, 80.0)];
const FOUR: [Vec2; 4] = [p(L, -60.0), p(R, -60.0), p(L, 60.0), p(R, 60.0)];
const FIVE: [Vec2; 5] = [p(L, -60.0), p(R, -60.0), p(0.0, 0.0), p(L, 60.0), p(R, 60.0)];
const SIX: [Vec2; 6] = [
    p(L, -60.0), p(R, -60.0),
    p(L, 0.0), p(R, 0.0),
    p(L, 60.0), p(R, 60.0),
];
const SEVEN: [Vec2; 7] = [
    p(L, -60.0), p(R, -60.0),
    p(0.0, -30.0),
    p(L, 0.0), p(R, 0.0),
    p(L, 60.0), p(R, 60.0),
];
const EIGHT: [Vec2; 8] = [
    p(L, -80.0), p(R, -80.0),
    p(L, -25.0), p(R, -25.0),
    p(L, 25.0), p(R, 25.0),
    p(L, 80.0), p(R, 80.0),
];
const NINE: [Vec2; 9] = [
    p(L, -80.0), p(R, -80.0),
    p(L, -40.0), p(R, -40.0),
    p(0.0, 0.0),
    p(L, 40.0), p(R, 40.0),
    p(L, 80.0), p(R, 80.0),
];
const TEN: [Vec2; 10] = [
    p(L, -80.0), p(R, -80.0),
    p(L, -40.0), p(R, -40.0),
    p(L, 0.0), p(R, 0.0),
    p(L, 40.0), p(R, 40.0),
    p(L, 80.0), p(R, 80.0),
];

/// Pip offsets for a numbered rank; any rank outside 2..=10 is an error.
pub fn pip_positions(rank: u8) -> Result<&'static [Vec2]> {
    Ok(match rank {
        2 => &TWO,
        3 => &THREE,
        4 => &FOUR,
        5 => &FIVE,
        6 => &SIX,
        7 => &SEVEN,
        8 => &EIGHT,
        9 => &NINE,
        10 => &TEN,
        other => return Err(CardError::UnsupportedRank(other)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_matches_rank() {
        for rank in 2..=10u8 {
            assert_eq!(pip_positions(rank).unwrap().len(), rank as usize);
        }
    }

    #[test]
    fn test_layouts_are_mirror_symmetric() {
        for rank in 2..=10u8 {
            let pips = pip_positions(rank).unwrap();
            for pip in pips {
                let mirrored = Vec2::new(-pip.x, pip.y);
                assert!(pips.contains(&mirrored), "rank {rank} lacks mirror of {pip:?}");
            }
        }
    }

    #[test]
    fn test_no_duplicate_positions() {
        for rank in 2..=10u8 {
            let pips = pip_positions(rank).unwrap();
            for (i, a) in pips.iter().enumerate() {
                assert!(pips[i + 1..].iter().all(|b| b != a), "rank {rank}");
            }
        }
    }

    #[test]
    fn test_out_of_range_is_an_error() {
        for rank in [0u8, 1, 11, 14, 255] {
            assert!(matches!(pip_positions(rank), Err(CardError::UnsupportedRank(r)) if r == rank));
        }
    }
}
