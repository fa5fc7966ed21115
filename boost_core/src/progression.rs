//! Progression aggregation over the boost tiers.
//!
//! Turns a scenario and per-tier amounts into totals plus one breakdown row
//! per tier. Rows are folded in fixed tier order, so the cumulative columns
//! read as "Bronze amounts, then additionally Iron amounts, ...".

use crate::{
    cumulative_experience_for_level, format_time, level_for_experience, BreakdownRow, ChartPoint,
    Progression, Scenario, TierAmounts,
};

/// Compute totals and the per-tier breakdown
///
/// No validation happens here; callers validate at the boundary.
pub fn compute(scenario: &Scenario, amounts: &TierAmounts) -> Progression {
    let base_xp = cumulative_experience_for_level(scenario.base_level);

    let mut cumulative_xp = base_xp;
    let mut cumulative_time = 0.0;
    let breakdown: Vec<BreakdownRow> = amounts
        .iter()
        .map(|(tier, amount)| {
            let multiplier = tier.multiplier();
            let time_per_action = scenario.base_timer / multiplier;
            let total_time = amount as f64 * scenario.base_timer / multiplier;
            let xp_contribution = amount.saturating_mul(scenario.interaction_xp);

            cumulative_xp = cumulative_xp.saturating_add(xp_contribution);
            cumulative_time += total_time;

            BreakdownRow {
                tier,
                amount,
                multiplier,
                time_per_action,
                total_time,
                xp_per_action: scenario.interaction_xp,
                xp_contribution,
                cumulative_xp,
                cumulative_level: level_for_experience(cumulative_xp),
                cumulative_time,
            }
        })
        .collect();

    let total_xp = cumulative_xp;
    let total_time = cumulative_time;
    let total_level = level_for_experience(total_xp);

    tracing::debug!(
        "Computed progression: base_xp={}, total_xp={}, level={}, time={:.1}s",
        base_xp,
        total_xp,
        total_level,
        total_time
    );

    Progression {
        base_xp,
        total_xp,
        total_level,
        total_time,
        breakdown,
    }
}

/// Chart series: breakdown rows sorted by cumulative time, ascending
///
/// Display-only; the breakdown itself keeps tier order. The sort is stable,
/// so tiers with equal cumulative time stay in tier order.
pub fn time_progression(progression: &Progression) -> Vec<ChartPoint> {
    let mut points: Vec<ChartPoint> = progression
        .breakdown
        .iter()
        .map(|row| ChartPoint {
            tier: row.tier,
            cumulative_time: row.cumulative_time,
            formatted_time: format_time(row.cumulative_time),
            cumulative_xp: row.cumulative_xp,
            cumulative_level: row.cumulative_level,
        })
        .collect();
    points.sort_by(|a, b| a.cumulative_time.total_cmp(&b.cumulative_time));
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tier;

    #[test]
    fn test_zero_amounts_keep_base_level() {
        let scenario = Scenario::default();
        let result = compute(&scenario, &TierAmounts::default());

        assert_eq!(result.base_xp, cumulative_experience_for_level(10));
        assert_eq!(result.total_xp, cumulative_experience_for_level(10));
        assert_eq!(result.total_time, 0.0);
        assert_eq!(result.total_level, 10);
        assert_eq!(result.breakdown.len(), 7);
        assert!(result.breakdown.iter().all(|r| r.cumulative_level == 10));
    }

    #[test]
    fn test_bronze_only() {
        let scenario = Scenario::default();
        let amounts = TierAmounts {
            bronze: 100,
            ..Default::default()
        };
        let result = compute(&scenario, &amounts);

        assert_eq!(result.total_xp, cumulative_experience_for_level(10) + 1000);
        assert_eq!(result.total_xp, 2151);
        assert_eq!(result.total_level, 14);
        assert_eq!(result.total_time, 240.0);

        let bronze = &result.breakdown[0];
        assert_eq!(bronze.tier, Tier::Bronze);
        assert_eq!(bronze.xp_contribution, 1000);
        assert_eq!(bronze.cumulative_time, 240.0);
        for row in &result.breakdown[1..] {
            assert_eq!(row.cumulative_time, 240.0);
            assert_eq!(row.cumulative_xp, 2151);
        }
    }

    #[test]
    fn test_rows_follow_tier_order() {
        let result = compute(&Scenario::default(), &TierAmounts::default());
        let tiers: Vec<Tier> = result.breakdown.iter().map(|r| r.tier).collect();
        assert_eq!(tiers, Tier::ALL.to_vec());
    }

    #[test]
    fn test_multiplier_divides_time_not_xp() {
        let scenario = Scenario::default();
        let amounts = TierAmounts {
            dragon: 300,
            ..Default::default()
        };
        let result = compute(&scenario, &amounts);
        let dragon = &result.breakdown[6];

        assert_eq!(dragon.xp_contribution, 3000);
        assert!((dragon.time_per_action - 0.8).abs() < 1e-12);
        assert!((dragon.total_time - 240.0).abs() < 1e-9);
        assert!((result.total_time - 240.0).abs() < 1e-9);
    }

    #[test]
    fn test_cumulative_xp_is_monotonic() {
        let amounts = TierAmounts {
            bronze: 10,
            iron: 0,
            steel: 500,
            mithril: 3,
            adamant: 0,
            rune: 77,
            dragon: 1200,
        };
        let result = compute(&Scenario::default(), &amounts);
        assert!(result
            .breakdown
            .windows(2)
            .all(|w| w[0].cumulative_xp <= w[1].cumulative_xp
                && w[0].cumulative_level <= w[1].cumulative_level
                && w[0].cumulative_time <= w[1].cumulative_time));
        assert_eq!(result.breakdown[6].cumulative_xp, result.total_xp);
        assert_eq!(result.breakdown[6].cumulative_time, result.total_time);
    }

    #[test]
    fn test_increasing_any_tier_is_monotonic() {
        let scenario = Scenario::default();
        let base = TierAmounts {
            bronze: 200,
            iron: 150,
            steel: 100,
            mithril: 50,
            adamant: 25,
            rune: 10,
            dragon: 5,
        };
        let before = compute(&scenario, &base);

        for tier in Tier::ALL {
            for extra in [1, 10, 5_000] {
                let mut amounts = base;
                amounts.set(tier, base.get(tier) + extra);
                let after = compute(&scenario, &amounts);
                assert!(after.total_xp > before.total_xp);
                assert!(after.total_time > before.total_time);
                assert!(after.total_level >= before.total_level);
            }
        }
    }

    #[test]
    fn test_overflow_past_99_reports_99() {
        let scenario = Scenario {
            interaction_xp: 1_000,
            base_timer: 2.4,
            base_level: 99,
        };
        let amounts = TierAmounts {
            dragon: 1_000_000,
            ..Default::default()
        };
        let result = compute(&scenario, &amounts);
        assert_eq!(result.total_level, 99);
        assert!(result.total_xp > cumulative_experience_for_level(99));
    }

    #[test]
    fn test_time_progression_sorted_by_time() {
        let amounts = TierAmounts {
            bronze: 100,
            dragon: 30,
            ..Default::default()
        };
        let result = compute(&Scenario::default(), &amounts);
        let points = time_progression(&result);

        assert_eq!(points.len(), 7);
        assert!(points
            .windows(2)
            .all(|w| w[0].cumulative_time <= w[1].cumulative_time));
        // Bronze through Rune tie at 240s and keep tier order ahead of Dragon
        assert_eq!(points[0].tier, Tier::Bronze);
        assert_eq!(points[6].tier, Tier::Dragon);
        assert_eq!(points[0].formatted_time, "0d 0h 4m 0s");
        // Breakdown keeps its own order
        assert_eq!(result.breakdown[0].tier, Tier::Bronze);
    }
}
