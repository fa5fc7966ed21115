//! Core domain types for the boost timer calculator.
//!
//! This module defines the fundamental types used throughout the system:
//! - Boost tiers and their speed multipliers
//! - Per-tier action amounts
//! - The scenario (base xp, base timer, base level)
//! - Derived breakdown rows and chart points

use crate::{Error, Result, MAX_LEVEL, MIN_LEVEL};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Tier Types
// ============================================================================

/// Boost tier, in fixed declaration order
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Bronze,
    Iron,
    Steel,
    Mithril,
    Adamant,
    Rune,
    Dragon,
}

impl Tier {
    /// All tiers in declaration order. Cumulative columns fold in this order.
    pub const ALL: [Tier; 7] = [
        Tier::Bronze,
        Tier::Iron,
        Tier::Steel,
        Tier::Mithril,
        Tier::Adamant,
        Tier::Rune,
        Tier::Dragon,
    ];

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Tier::Bronze => "Bronze",
            Tier::Iron => "Iron",
            Tier::Steel => "Steel",
            Tier::Mithril => "Mithril",
            Tier::Adamant => "Adamant",
            Tier::Rune => "Rune",
            Tier::Dragon => "Dragon",
        }
    }

    /// Speed multiplier: base time per action is divided by this
    pub fn multiplier(self) -> f64 {
        match self {
            Tier::Bronze => 1.0,
            Tier::Iron => 1.1,
            Tier::Steel => 1.2,
            Tier::Mithril => 1.4,
            Tier::Adamant => 1.7,
            Tier::Rune => 2.0,
            Tier::Dragon => 3.0,
        }
    }

    /// Whether the amount for this tier is subject to the input cap
    ///
    /// Dragon is the only uncapped tier.
    pub fn is_capped(self) -> bool {
        !matches!(self, Tier::Dragon)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Tier::ALL
            .into_iter()
            .find(|tier| tier.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::Validation(format!("Unknown tier: {}", wanted)))
    }
}

// ============================================================================
// Input Types
// ============================================================================

/// Number of actions performed at each tier
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TierAmounts {
    pub bronze: u64,
    pub iron: u64,
    pub steel: u64,
    pub mithril: u64,
    pub adamant: u64,
    pub rune: u64,
    pub dragon: u64,
}

impl TierAmounts {
    pub fn get(&self, tier: Tier) -> u64 {
        match tier {
            Tier::Bronze => self.bronze,
            Tier::Iron => self.iron,
            Tier::Steel => self.steel,
            Tier::Mithril => self.mithril,
            Tier::Adamant => self.adamant,
            Tier::Rune => self.rune,
            Tier::Dragon => self.dragon,
        }
    }

    pub fn set(&mut self, tier: Tier, amount: u64) {
        let slot = match tier {
            Tier::Bronze => &mut self.bronze,
            Tier::Iron => &mut self.iron,
            Tier::Steel => &mut self.steel,
            Tier::Mithril => &mut self.mithril,
            Tier::Adamant => &mut self.adamant,
            Tier::Rune => &mut self.rune,
            Tier::Dragon => &mut self.dragon,
        };
        *slot = amount;
    }

    /// Iterate `(tier, amount)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (Tier, u64)> + '_ {
        Tier::ALL.into_iter().map(move |tier| (tier, self.get(tier)))
    }

    /// Reject amounts above `cap` for every capped tier
    pub fn validate(&self, cap: u64) -> Result<()> {
        for (tier, amount) in self.iter() {
            validate_amount(tier, amount, cap)?;
        }
        Ok(())
    }
}

/// Check a single tier amount against the input cap
pub fn validate_amount(tier: Tier, amount: u64, cap: u64) -> Result<()> {
    if tier.is_capped() && amount > cap {
        return Err(Error::Validation(format!(
            "{} amount must be at most {} (got {})",
            tier, cap, amount
        )));
    }
    Ok(())
}

/// Base values the per-tier amounts are applied to
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    /// Experience gained per action (unaffected by tier)
    pub interaction_xp: u64,
    /// Seconds per action before the tier multiplier
    pub base_timer: f64,
    /// Starting level
    pub base_level: u32,
}

/// Smallest accepted base timer, in seconds
pub const MIN_BASE_TIMER: f64 = 0.6;

/// Smallest accepted experience per action
pub const MIN_INTERACTION_XP: u64 = 1;

impl Default for Scenario {
    fn default() -> Self {
        Self {
            interaction_xp: 10,
            base_timer: 2.4,
            base_level: 10,
        }
    }
}

impl Scenario {
    /// Check the scenario against its numeric bounds
    pub fn validate(&self) -> Result<()> {
        validate_interaction_xp(self.interaction_xp)?;
        validate_base_timer(self.base_timer)?;
        validate_base_level(self.base_level)?;
        Ok(())
    }
}

pub fn validate_interaction_xp(xp: u64) -> Result<()> {
    if xp < MIN_INTERACTION_XP {
        return Err(Error::Validation(format!(
            "XP per interaction must be at least {} (got {})",
            MIN_INTERACTION_XP, xp
        )));
    }
    Ok(())
}

pub fn validate_base_timer(seconds: f64) -> Result<()> {
    if !seconds.is_finite() || seconds < MIN_BASE_TIMER {
        return Err(Error::Validation(format!(
            "Seconds per action must be a number >= {} (got {})",
            MIN_BASE_TIMER, seconds
        )));
    }
    Ok(())
}

pub fn validate_base_level(level: u32) -> Result<()> {
    if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
        return Err(Error::Validation(format!(
            "Base level must be between {} and {} (got {})",
            MIN_LEVEL, MAX_LEVEL, level
        )));
    }
    Ok(())
}

// ============================================================================
// Output Types
// ============================================================================

/// One row of the boost breakdown table
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BreakdownRow {
    pub tier: Tier,
    pub amount: u64,
    pub multiplier: f64,
    pub time_per_action: f64,
    pub total_time: f64,
    pub xp_per_action: u64,
    pub xp_contribution: u64,
    /// Running totals after including this tier
    pub cumulative_xp: u64,
    pub cumulative_level: u32,
    pub cumulative_time: f64,
}

/// Totals and breakdown for a scenario plus tier amounts
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Progression {
    pub base_xp: u64,
    pub total_xp: u64,
    pub total_level: u32,
    /// Seconds
    pub total_time: f64,
    pub breakdown: Vec<BreakdownRow>,
}

/// A point on the time-progression chart
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChartPoint {
    pub tier: Tier,
    pub cumulative_time: f64,
    pub formatted_time: String,
    pub cumulative_xp: u64,
    pub cumulative_level: u32,
}
