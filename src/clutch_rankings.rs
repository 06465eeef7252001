use std::cmp::Ordering;

use serde::Serialize;

use crate::splits::{GoalieSplits, SplitKind, SplitRow};

// Composite weights: absolute clutch rate vs. improvement over the
// goalie's own baseline. Tuning constants, kept as published.
const CLUTCH_RATE_WEIGHT: f64 = 0.45;
const CLUTCH_DIFF_WEIGHT: f64 = 0.55;

// Sample-size cutoff (exclusive): sub-20-game goalies are dropped.
const MIN_TOTAL_GP: u32 = 19;

/// One ranked goaltender. Serializes with the column labels the
/// published table uses, so downstream renderers see the same shape as
/// the source site's JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClutchRanking {
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Total GP")]
    pub total_gp: u32,
    #[serde(rename = "SV%")]
    pub sv_pct: f64,
    #[serde(rename = "GSAx/60")]
    pub gsax_per60: f64,
    #[serde(rename = "TOI in Clutch")]
    pub clutch_toi: f64,
    #[serde(rename = "SV% in Clutch")]
    pub clutch_sv_pct: f64,
    #[serde(rename = "GSAx/60 in Clutch")]
    pub clutch_gsax_per60: f64,
    #[serde(rename = "SV% Difference in Clutch")]
    pub sv_pct_diff: f64,
    #[serde(rename = "GSAx/60 Difference in Clutch")]
    pub gsax_per60_diff: f64,
    #[serde(rename = "Clutch Score")]
    pub clutch_score: f64,
}

/// Rank every qualifying goaltender by clutch score, descending.
///
/// The player universe is the regular-season all-situations split; the
/// other five splits are left-joined onto it, with an absent split
/// contributing zero TOI and zero value to every blend. Pure function
/// of its input: no caching, no shared state.
pub fn compute_clutch_rankings(splits: &GoalieSplits) -> Vec<ClutchRanking> {
    let mut out = Vec::new();

    for reg in splits.anchor() {
        let playoff = splits.lookup(SplitKind::PlayoffAll, &reg.player);
        let total_gp = reg.games_played + playoff.map_or(0, |p| p.games_played);

        let clutch: Vec<&SplitRow> = SplitKind::CLUTCH
            .iter()
            .filter_map(|kind| splits.lookup(*kind, &reg.player))
            .collect();
        let clutch_toi: f64 = clutch.iter().map(|s| s.toi_minutes).sum();

        // Hard cutoffs, not soft penalties. With zero close-score
        // minutes the clutch comparison is undefined for the player.
        if total_gp <= MIN_TOTAL_GP || clutch_toi <= 0.0 {
            continue;
        }

        let playoff_toi = playoff.map_or(0.0, |p| p.toi_minutes);
        let sv_pct = round3(weighted_pair(
            reg.save_pct,
            reg.toi_minutes,
            playoff.map_or(0.0, |p| p.save_pct),
            playoff_toi,
        ));
        let gsax_per60 = round2(
            weighted_pair(
                per_minute_rate(reg),
                reg.toi_minutes,
                playoff.map_or(0.0, per_minute_rate),
                playoff_toi,
            ) * 60.0,
        );

        let clutch_sv_pct = round3(weighted_blend(
            clutch.iter().map(|s| (s.save_pct, s.toi_minutes)),
            clutch_toi,
        ));
        let clutch_gsax_per60 = round2(
            weighted_blend(
                clutch.iter().map(|s| (per_minute_rate(s), s.toi_minutes)),
                clutch_toi,
            ) * 60.0,
        );

        // Differences and the composite are taken over the rounded
        // metrics, exactly as the published table computes them.
        let sv_pct_diff = round3(clutch_sv_pct - sv_pct);
        let gsax_per60_diff = round3(clutch_gsax_per60 - gsax_per60);
        let clutch_score = round3(
            CLUTCH_RATE_WEIGHT * clutch_gsax_per60 + CLUTCH_DIFF_WEIGHT * gsax_per60_diff,
        );

        out.push(ClutchRanking {
            player: reg.player.clone(),
            team: reg.team.clone(),
            total_gp,
            sv_pct,
            gsax_per60,
            clutch_toi: round2(clutch_toi),
            clutch_sv_pct,
            clutch_gsax_per60,
            sv_pct_diff,
            gsax_per60_diff,
            clutch_score,
        });
    }

    // Stable sort: equal scores keep the anchor's join order.
    out.sort_by(|a, b| {
        b.clutch_score
            .partial_cmp(&a.clutch_score)
            .unwrap_or(Ordering::Equal)
    });
    out
}

/// GSAx per minute for one split; a zero-TOI split contributes a zero
/// rate rather than a NaN.
fn per_minute_rate(row: &SplitRow) -> f64 {
    if row.toi_minutes > 0.0 {
        row.gsax / row.toi_minutes
    } else {
        0.0
    }
}

/// TOI-weighted average of two values. Zero total weight resolves to 0.
fn weighted_pair(a: f64, weight_a: f64, b: f64, weight_b: f64) -> f64 {
    let total = weight_a + weight_b;
    if total > 0.0 {
        (a * weight_a + b * weight_b) / total
    } else {
        0.0
    }
}

/// Weighted average over arbitrarily many (value, weight) terms with a
/// precomputed total weight. Zero total weight resolves to 0.
fn weighted_blend(terms: impl Iterator<Item = (f64, f64)>, total_weight: f64) -> f64 {
    if total_weight <= 0.0 {
        return 0.0;
    }
    terms.map(|(value, weight)| value * (weight / total_weight)).sum()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::{per_minute_rate, round2, round3, weighted_blend, weighted_pair};
    use crate::splits::SplitRow;

    fn row(toi_minutes: f64, gsax: f64) -> SplitRow {
        SplitRow {
            player: "G".to_string(),
            team: "T".to_string(),
            games_played: 1,
            toi_minutes,
            save_pct: 0.900,
            gsax,
        }
    }

    #[test]
    fn weighted_pair_zero_weights_is_zero() {
        assert_eq!(weighted_pair(0.910, 0.0, 0.930, 0.0), 0.0);
    }

    #[test]
    fn weighted_pair_single_weight_returns_that_value() {
        let v = weighted_pair(0.910, 2400.0, 0.0, 0.0);
        assert!((v - 0.910).abs() < 1e-12);
    }

    #[test]
    fn weighted_pair_lies_between_endpoints() {
        let v = weighted_pair(0.900, 1000.0, 0.940, 500.0);
        assert!(v > 0.900 && v < 0.940);
    }

    #[test]
    fn weighted_blend_zero_total_is_zero() {
        let terms = [(0.930, 0.0), (0.920, 0.0)];
        assert_eq!(weighted_blend(terms.into_iter(), 0.0), 0.0);
    }

    #[test]
    fn weighted_blend_weights_sum_to_one() {
        let terms = [(0.930, 300.0), (0.910, 100.0)];
        let v = weighted_blend(terms.into_iter(), 400.0);
        assert!((v - 0.925).abs() < 1e-12);
    }

    #[test]
    fn per_minute_rate_guards_zero_toi() {
        assert_eq!(per_minute_rate(&row(0.0, 5.0)), 0.0);
        let r = per_minute_rate(&row(300.0, 4.0));
        assert!((r * 60.0 - 0.80).abs() < 1e-12);
    }

    #[test]
    fn rounding_matches_metric_precision() {
        assert_eq!(round3(0.92049), 0.920);
        assert_eq!(round3(0.92051), 0.921);
        assert_eq!(round2(0.804), 0.80);
        assert_eq!(round2(-0.804), -0.80);
        assert_eq!(round2(0.806), 0.81);
    }
}
