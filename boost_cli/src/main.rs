use boost_core::experience::{experience_table, experience_to_next_level};
use boost_core::format::{format_level, format_xp};
use boost_core::session::HELP;
use boost_core::*;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "boostcalc")]
#[command(about = "Advanced skilling boosts timer calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override config file location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate totals and breakdown (default)
    Calc(CalcArgs),

    /// Look up the level reached with an amount of experience
    Level {
        /// Total experience
        #[arg(long)]
        xp: u64,
    },

    /// Look up the experience required for a level
    Xp {
        /// Target level
        #[arg(long)]
        level: u32,
    },

    /// Print the experience table for levels 1-99
    Table,

    /// Edit a scenario line by line and recalculate after each change
    Interactive,

    /// Write a config file populated with the default values
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(clap::Args, Default)]
struct CalcArgs {
    /// Base XP per interaction
    #[arg(long)]
    xp: Option<u64>,

    /// Base seconds per action
    #[arg(long)]
    timer: Option<f64>,

    /// Base level for the resource
    #[arg(long)]
    level: Option<u32>,

    #[arg(long, default_value_t = 0)]
    bronze: u64,
    #[arg(long, default_value_t = 0)]
    iron: u64,
    #[arg(long, default_value_t = 0)]
    steel: u64,
    #[arg(long, default_value_t = 0)]
    mithril: u64,
    #[arg(long, default_value_t = 0)]
    adamant: u64,
    #[arg(long, default_value_t = 0)]
    rune: u64,
    #[arg(long, default_value_t = 0)]
    dragon: u64,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Write csv/json output to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        boost_core::logging::init_with_level("debug");
    } else {
        boost_core::logging::init();
    }

    match cli.command {
        Some(Commands::Calc(args)) => cmd_calc(args, &load_config(cli.config.as_deref())?),
        Some(Commands::Level { xp }) => cmd_level(xp),
        Some(Commands::Xp { level }) => cmd_xp(level),
        Some(Commands::Table) => cmd_table(),
        Some(Commands::Interactive) => cmd_interactive(&load_config(cli.config.as_deref())?),
        Some(Commands::InitConfig { force }) => cmd_init_config(cli.config, force),
        None => {
            // Default to "calc" with configured defaults
            cmd_calc(CalcArgs::default(), &load_config(cli.config.as_deref())?)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn cmd_calc(args: CalcArgs, config: &Config) -> Result<()> {
    let defaults = config.default_scenario();
    let scenario = Scenario {
        interaction_xp: args.xp.unwrap_or(defaults.interaction_xp),
        base_timer: args.timer.unwrap_or(defaults.base_timer),
        base_level: args.level.unwrap_or(defaults.base_level),
    };
    let amounts = TierAmounts {
        bronze: args.bronze,
        iron: args.iron,
        steel: args.steel,
        mithril: args.mithril,
        adamant: args.adamant,
        rune: args.rune,
        dragon: args.dragon,
    };

    scenario.validate()?;
    amounts.validate(config.limits.tier_amount_cap)?;
    tracing::debug!("Calculating {:?} with {:?}", scenario, amounts);

    let progression = compute(&scenario, &amounts);

    match (args.format, args.output) {
        (OutputFormat::Table, None) => {
            display_progression(&scenario, &progression);
            println!();
            println!("{}", completion_message(&progression));
        }
        (OutputFormat::Table, Some(_)) => {
            return Err(Error::Validation(
                "--output requires --format csv or --format json".into(),
            ));
        }
        (OutputFormat::Json, None) => export::write_json(&progression, io::stdout().lock())?,
        (OutputFormat::Csv, None) => export::write_csv(&progression, io::stdout().lock())?,
        (OutputFormat::Json, Some(path)) => {
            export::json_to_path(&progression, &path)?;
            println!("✓ Wrote {}", path.display());
        }
        (OutputFormat::Csv, Some(path)) => {
            export::csv_to_path(&progression, &path)?;
            println!("✓ Wrote {}", path.display());
        }
    }

    Ok(())
}

fn cmd_level(xp: u64) -> Result<()> {
    let level = level_for_experience(xp);
    println!("Level {} at {} XP", level, format_xp(xp));
    match experience_to_next_level(xp) {
        Some(remaining) => println!("  {} XP to level {}", format_xp(remaining), level + 1),
        None => println!("  Max level reached"),
    }
    Ok(())
}

fn cmd_xp(level: u32) -> Result<()> {
    validate_base_level(level)?;
    println!("Level {}", level);
    println!("  XP for this level: {}", format_xp(experience_for_level(level)));
    println!(
        "  Cumulative XP:     {}",
        format_xp(cumulative_experience_for_level(level))
    );
    Ok(())
}

fn cmd_table() -> Result<()> {
    println!("{:>5}  {:>10}  {:>12}", "Level", "XP", "Total XP");
    for row in experience_table() {
        println!(
            "{:>5}  {:>10}  {:>12}",
            row.level, row.experience, row.cumulative
        );
    }
    Ok(())
}

fn cmd_interactive(config: &Config) -> Result<()> {
    let mut session = Session::new(config);

    println!("Advanced Skilling Boosts Timer Calculator");
    println!("Type 'help' for commands.");
    display_metrics(&session.scenario, &session.progression());

    let mut input = io::stdin().lock();
    let mut buffer = Vec::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        buffer.clear();
        if input.read_until(b'\n', &mut buffer)? == 0 {
            break; // EOF
        }
        let line = match std::str::from_utf8(&buffer) {
            Ok(line) => line,
            Err(_) => {
                eprintln!("✗ Invalid command: input is not valid UTF-8");
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(e) => {
                eprintln!("✗ {}", e);
                continue;
            }
        };

        if let Err(e) = session.apply(&command) {
            eprintln!("✗ {}", e);
            continue;
        }

        match command {
            SessionCommand::Quit => break,
            SessionCommand::Help => println!("{}", HELP),
            SessionCommand::Show => display_progression(&session.scenario, &session.progression()),
            SessionCommand::Calculate => println!("{}", completion_message(&session.progression())),
            _ => display_metrics(&session.scenario, &session.progression()),
        }
    }

    Ok(())
}

fn cmd_init_config(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => Config::default_config_path()?,
    };
    if path.exists() && !force {
        return Err(Error::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    Config::default().save_to(&path)?;
    println!("✓ Wrote default config to {}", path.display());
    Ok(())
}

fn completion_message(progression: &Progression) -> String {
    format!(
        "✓ Calculation complete! Total XP: {}, Total Level: {}, Total Time: {}",
        format_xp(progression.total_xp),
        format_level(progression.total_level),
        format_time(progression.total_time)
    )
}

fn display_metrics(scenario: &Scenario, progression: &Progression) {
    println!();
    println!(
        "  XP/action: {}   Seconds/action: {}   Base level: {}   Base XP: {}",
        scenario.interaction_xp,
        scenario.base_timer,
        scenario.base_level,
        format_xp(progression.base_xp)
    );
    println!(
        "  Total Level: {}   Total XP: {}   Total Time: {}",
        format_level(progression.total_level),
        format_xp(progression.total_xp),
        format_time(progression.total_time)
    );
}

fn display_progression(scenario: &Scenario, progression: &Progression) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  RESULTS");
    println!("╰─────────────────────────────────────────╯");
    display_metrics(scenario, progression);

    println!();
    println!("Boost Breakdown:");
    println!(
        "  {:<8} {:>7} {:>5} {:>9} {:>11} {:>6} {:>9} {:>10} {:>5}  {}",
        "Tier", "Amount", "Boost", "s/action", "Total (s)", "XP/act", "XP", "Cum. XP", "Lvl",
        "Cum. Time"
    );
    for row in &progression.breakdown {
        println!(
            "  {:<8} {:>7} {:>5.1} {:>9.3} {:>11.1} {:>6} {:>9} {:>10} {:>5}  {}",
            row.tier.name(),
            row.amount,
            row.multiplier,
            row.time_per_action,
            row.total_time,
            row.xp_per_action,
            row.xp_contribution,
            row.cumulative_xp,
            row.cumulative_level,
            format_time(row.cumulative_time)
        );
    }

    println!();
    println!("Time Progression (sorted by time):");
    for point in time_progression(progression) {
        println!(
            "  {:<8} {:>16}  {:>10} XP  level {}",
            point.tier.name(),
            point.formatted_time,
            point.cumulative_xp,
            point.cumulative_level
        );
    }
}
