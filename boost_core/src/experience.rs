//! Experience curve: conversions between levels and cumulative experience.
//!
//! The per-level cost grows exponentially:
//! `floor((level - 1 + 300 * 2^((level - 1) / 7)) / 4)`.
//! Cumulative experience is the sum of those per-level costs, and level
//! lookup is a binary search over levels 1..=99.

use once_cell::sync::Lazy;
use serde::Serialize;

pub const MIN_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 99;

/// Cumulative experience for every level, indexed by level (index 0 unused)
static CUMULATIVE: Lazy<[u64; MAX_LEVEL as usize + 1]> = Lazy::new(|| {
    let mut table = [0u64; MAX_LEVEL as usize + 1];
    for level in 2..=MAX_LEVEL {
        table[level as usize] = table[level as usize - 1] + experience_for_level(level);
    }
    tracing::debug!("Built experience table up to level {}", MAX_LEVEL);
    table
});

/// Experience needed to advance from `level - 1` to `level`
///
/// Returns 0 for levels below 2. The result is truncated, not rounded.
pub fn experience_for_level(level: u32) -> u64 {
    if level < 2 {
        return 0;
    }
    let n = f64::from(level - 1);
    (0.25 * (n + 300.0 * 2f64.powf(n / 7.0))).floor() as u64
}

/// Total experience required to reach `level` from level 1
///
/// Saturates at `u64::MAX` for levels far past the cap.
pub fn cumulative_experience_for_level(level: u32) -> u64 {
    if level <= MAX_LEVEL {
        return CUMULATIVE[level as usize];
    }
    (2..=level)
        .map(experience_for_level)
        .try_fold(0u64, |total, xp| total.checked_add(xp))
        .unwrap_or(u64::MAX)
}

/// Highest level whose cumulative experience does not exceed `xp`
///
/// Experience past level 99 still reports 99.
pub fn level_for_experience(xp: u64) -> u32 {
    if xp == 0 {
        return MIN_LEVEL;
    }

    // Signed bounds so `right` may drop below `left` at level 1
    let (mut left, mut right) = (MIN_LEVEL as i64, MAX_LEVEL as i64);
    while left <= right {
        let mid = (left + right) / 2;
        let mid_xp = CUMULATIVE[mid as usize];
        if mid_xp == xp {
            return mid as u32;
        } else if mid_xp < xp {
            left = mid + 1;
        } else {
            right = mid - 1;
        }
    }
    (left - 1) as u32
}

/// Experience still needed to reach the next level, or `None` at the cap
pub fn experience_to_next_level(xp: u64) -> Option<u64> {
    let level = level_for_experience(xp);
    if level >= MAX_LEVEL {
        return None;
    }
    Some(cumulative_experience_for_level(level + 1).saturating_sub(xp))
}

/// One row of the experience table
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct LevelRow {
    pub level: u32,
    pub experience: u64,
    pub cumulative: u64,
}

/// The experience table for levels 1..=99
pub fn experience_table() -> Vec<LevelRow> {
    (MIN_LEVEL..=MAX_LEVEL)
        .map(|level| LevelRow {
            level,
            experience: experience_for_level(level),
            cumulative: cumulative_experience_for_level(level),
        })
        .collect()
}
