//! Interactive calculator session.
//!
//! A `Session` holds the scenario and per-tier amounts being edited. It is
//! owned by the caller and passed around explicitly; every accepted change is
//! validated first, so a rejected command leaves the session untouched.

use crate::{
    compute, validate_amount, validate_base_level, validate_base_timer, validate_interaction_xp,
    Config, Error, Progression, Result, Scenario, Tier, TierAmounts,
};
use std::str::FromStr;

/// A single line command
#[derive(Clone, Debug, PartialEq)]
pub enum SessionCommand {
    SetInteractionXp(u64),
    SetBaseTimer(f64),
    SetBaseLevel(u32),
    SetAmount(Tier, u64),
    Show,
    Calculate,
    Reset,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  xp <n>         base XP per interaction (>= 1)
  timer <secs>   base seconds per action (>= 0.6)
  level <n>      base level (1-99)
  <tier> <n>     amount for a tier (bronze, iron, steel, mithril, adamant, rune, dragon)
  show           print the breakdown
  calc           print the totals
  reset          restore defaults
  help           show this message
  quit           exit";

impl FromStr for SessionCommand {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let keyword = parts
            .next()
            .ok_or_else(|| Error::Command("empty command".into()))?
            .to_lowercase();
        let argument = parts.next();
        if parts.next().is_some() {
            return Err(Error::Command(format!("too many arguments: {}", line.trim())));
        }

        let command = match (keyword.as_str(), argument) {
            ("xp", Some(value)) => SessionCommand::SetInteractionXp(parse_whole(value, "xp")?),
            ("timer", Some(value)) => SessionCommand::SetBaseTimer(parse_seconds(value)?),
            ("level", Some(value)) => SessionCommand::SetBaseLevel(parse_whole(value, "level")?),
            ("show", None) => SessionCommand::Show,
            ("calc" | "calculate", None) => SessionCommand::Calculate,
            ("reset", None) => SessionCommand::Reset,
            ("help" | "?", None) => SessionCommand::Help,
            ("quit" | "exit" | "q", None) => SessionCommand::Quit,
            (word, Some(value)) => match word.parse::<Tier>() {
                Ok(tier) => SessionCommand::SetAmount(tier, parse_whole(value, tier.name())?),
                Err(_) => return Err(Error::Command(format!("unknown command: {}", word))),
            },
            (word, None) => {
                return Err(Error::Command(format!(
                    "'{}' needs a value or is not a command (try 'help')",
                    word
                )))
            }
        };
        Ok(command)
    }
}

fn parse_whole<T: FromStr>(value: &str, field: &str) -> Result<T> {
    value.parse::<T>().map_err(|_| {
        Error::Command(format!(
            "{} expects a non-negative whole number, got '{}'",
            field, value
        ))
    })
}

fn parse_seconds(value: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .map_err(|_| Error::Command(format!("timer expects a number, got '{}'", value)))
}

/// Calculator state for one interactive session
#[derive(Clone, Debug)]
pub struct Session {
    pub scenario: Scenario,
    pub amounts: TierAmounts,
    defaults: Scenario,
    tier_amount_cap: u64,
}

impl Session {
    /// Start a session from configured defaults, all amounts zero
    pub fn new(config: &Config) -> Self {
        let defaults = config.default_scenario();
        Self {
            scenario: defaults.clone(),
            amounts: TierAmounts::default(),
            defaults,
            tier_amount_cap: config.limits.tier_amount_cap,
        }
    }

    /// Apply a state-changing command
    ///
    /// Display and control commands (show, calc, help, quit) leave the
    /// session as it is.
    pub fn apply(&mut self, command: &SessionCommand) -> Result<()> {
        match *command {
            SessionCommand::SetInteractionXp(xp) => {
                validate_interaction_xp(xp)?;
                self.scenario.interaction_xp = xp;
            }
            SessionCommand::SetBaseTimer(seconds) => {
                validate_base_timer(seconds)?;
                self.scenario.base_timer = seconds;
            }
            SessionCommand::SetBaseLevel(level) => {
                validate_base_level(level)?;
                self.scenario.base_level = level;
            }
            SessionCommand::SetAmount(tier, amount) => {
                validate_amount(tier, amount, self.tier_amount_cap)?;
                self.amounts.set(tier, amount);
            }
            SessionCommand::Reset => {
                self.scenario = self.defaults.clone();
                self.amounts = TierAmounts::default();
            }
            SessionCommand::Show
            | SessionCommand::Calculate
            | SessionCommand::Help
            | SessionCommand::Quit => return Ok(()),
        }
        tracing::debug!("Applied {:?}", command);
        Ok(())
    }

    /// Recompute the progression from current state
    pub fn progression(&self) -> Progression {
        compute(&self.scenario, &self.amounts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<SessionCommand> {
        line.parse()
    }

    #[test]
    fn test_parse_settings() {
        crate::logging::init_test();
        assert_eq!(parse("xp 25").unwrap(), SessionCommand::SetInteractionXp(25));
        assert_eq!(parse("timer 1.8").unwrap(), SessionCommand::SetBaseTimer(1.8));
        assert_eq!(parse("LEVEL 50").unwrap(), SessionCommand::SetBaseLevel(50));
        assert_eq!(
            parse("  Dragon   12000 ").unwrap(),
            SessionCommand::SetAmount(Tier::Dragon, 12_000)
        );
    }

    #[test]
    fn test_parse_controls() {
        assert_eq!(parse("show").unwrap(), SessionCommand::Show);
        assert_eq!(parse("calculate").unwrap(), SessionCommand::Calculate);
        assert_eq!(parse("reset").unwrap(), SessionCommand::Reset);
        assert_eq!(parse("?").unwrap(), SessionCommand::Help);
        assert_eq!(parse("exit").unwrap(), SessionCommand::Quit);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(parse(""), Err(Error::Command(_))));
        assert!(matches!(parse("bronze -5"), Err(Error::Command(_))));
        assert!(matches!(parse("bronze many"), Err(Error::Command(_))));
        assert!(matches!(parse("timer fast"), Err(Error::Command(_))));
        assert!(matches!(parse("gold 10"), Err(Error::Command(_))));
        assert!(matches!(parse("xp"), Err(Error::Command(_))));
        assert!(matches!(parse("xp 1 2"), Err(Error::Command(_))));
    }

    #[test]
    fn test_apply_updates_state() {
        let mut session = Session::new(&Config::default());
        session.apply(&SessionCommand::SetAmount(Tier::Bronze, 100)).unwrap();

        let result = session.progression();
        assert_eq!(result.total_xp, 2151);
        assert_eq!(result.total_time, 240.0);
    }

    #[test]
    fn test_rejected_command_leaves_state() {
        let mut session = Session::new(&Config::default());
        session.apply(&SessionCommand::SetBaseLevel(20)).unwrap();

        assert!(session.apply(&SessionCommand::SetBaseLevel(0)).is_err());
        assert!(session.apply(&SessionCommand::SetBaseTimer(0.1)).is_err());
        assert!(session.apply(&SessionCommand::SetInteractionXp(0)).is_err());
        assert!(session
            .apply(&SessionCommand::SetAmount(Tier::Rune, 10_001))
            .is_err());

        assert_eq!(session.scenario.base_level, 20);
        assert_eq!(session.scenario.base_timer, 2.4);
        assert_eq!(session.amounts.rune, 0);
    }

    #[test]
    fn test_dragon_is_uncapped() {
        let mut session = Session::new(&Config::default());
        session
            .apply(&SessionCommand::SetAmount(Tier::Dragon, 250_000))
            .unwrap();
        assert_eq!(session.amounts.dragon, 250_000);
    }

    #[test]
    fn test_reset_restores_configured_defaults() {
        let mut config = Config::default();
        config.scenario.base_level = 30;
        let mut session = Session::new(&config);

        session.apply(&SessionCommand::SetBaseLevel(60)).unwrap();
        session.apply(&SessionCommand::SetAmount(Tier::Iron, 5)).unwrap();
        session.apply(&SessionCommand::Reset).unwrap();

        assert_eq!(session.scenario.base_level, 30);
        assert_eq!(session.amounts, TierAmounts::default());
    }
}
