//! Export of calculation results as CSV or JSON.

use crate::{format_time, BreakdownRow, Progression, Result};
use std::io::Write;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    tier: &'static str,
    amount: u64,
    boost_multiplier: f64,
    time_per_action_s: f64,
    total_time_s: f64,
    xp_per_action: u64,
    total_xp_contribution: u64,
    cumulative_xp: u64,
    cumulative_level: u32,
    cumulative_time_s: f64,
    formatted_cumulative_time: String,
}

impl From<&BreakdownRow> for CsvRow {
    fn from(row: &BreakdownRow) -> Self {
        CsvRow {
            tier: row.tier.name(),
            amount: row.amount,
            boost_multiplier: row.multiplier,
            time_per_action_s: row.time_per_action,
            total_time_s: row.total_time,
            xp_per_action: row.xp_per_action,
            total_xp_contribution: row.xp_contribution,
            cumulative_xp: row.cumulative_xp,
            cumulative_level: row.cumulative_level,
            cumulative_time_s: row.cumulative_time,
            formatted_cumulative_time: format_time(row.cumulative_time),
        }
    }
}

/// Write the breakdown table as CSV, headers included
pub fn write_csv<W: Write>(progression: &Progression, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in &progression.breakdown {
        writer.serialize(CsvRow::from(row))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the whole progression as pretty-printed JSON
pub fn write_json<W: Write>(progression: &Progression, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, progression)?;
    writeln!(writer)?;
    Ok(())
}

/// Write the breakdown CSV to a file, creating parent directories
pub fn csv_to_path(progression: &Progression, path: &Path) -> Result<()> {
    let file = create_with_parents(path)?;
    write_csv(progression, file)?;
    tracing::info!("Wrote breakdown CSV to {:?}", path);
    Ok(())
}

/// Write the progression JSON to a file, creating parent directories
pub fn json_to_path(progression: &Progression, path: &Path) -> Result<()> {
    let file = create_with_parents(path)?;
    write_json(progression, std::io::BufWriter::new(file))?;
    tracing::info!("Wrote progression JSON to {:?}", path);
    Ok(())
}

fn create_with_parents(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(std::fs::File::create(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compute, Scenario, TierAmounts};

    fn sample() -> Progression {
        let amounts = TierAmounts {
            bronze: 100,
            ..Default::default()
        };
        compute(&Scenario::default(), &amounts)
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        let mut buffer = Vec::new();
        write_csv(&sample(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 8);
        assert_eq!(
            lines[0],
            "tier,amount,boost_multiplier,time_per_action_s,total_time_s,xp_per_action,\
             total_xp_contribution,cumulative_xp,cumulative_level,cumulative_time_s,\
             formatted_cumulative_time"
        );
        assert!(lines[1].starts_with("Bronze,100,"));
        assert!(lines[1].ends_with(",2151,14,240.0,0d 0h 4m 0s"));
        assert!(lines[7].starts_with("Dragon,0,"));
    }

    #[test]
    fn test_json_roundtrip_fields() {
        let mut buffer = Vec::new();
        write_json(&sample(), &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(value["total_xp"], 2151);
        assert_eq!(value["total_level"], 14);
        assert_eq!(value["breakdown"][0]["tier"], "bronze");
        assert_eq!(value["breakdown"].as_array().unwrap().len(), 7);
    }

    #[test]
    fn test_csv_to_path_creates_parents() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out").join("breakdown.csv");

        csv_to_path(&sample(), &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Bronze,100"));
    }
}
