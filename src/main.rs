use std::path::PathBuf;

use anyhow::{Context, Result};

use nhl_clutch::clutch_dataset;
use nhl_clutch::clutch_rankings::compute_clutch_rankings;

const DEFAULT_DB_PATH: &str = "databases/NHL_Clutch.db";

fn main() -> Result<()> {
    env_logger::init();

    let mut as_json = false;
    let mut db_path: Option<PathBuf> = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => as_json = true,
            other => db_path = Some(PathBuf::from(other)),
        }
    }
    let db_path = db_path
        .or_else(|| std::env::var("NHL_CLUTCH_DB").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

    let conn = clutch_dataset::open_db(&db_path)?;
    let splits = clutch_dataset::load_splits(&conn)?;
    let rankings = compute_clutch_rankings(&splits);

    if as_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&rankings).context("serialize rankings")?
        );
        return Ok(());
    }

    println!(
        "{:<4} {:<24} {:<5} {:>4} {:>7} {:>8} {:>10} {:>9} {:>10} {:>7}",
        "#", "Player", "Team", "GP", "SV%", "GSAx/60", "ClutchTOI", "ClutchSV%", "ClutchGSAx", "Score"
    );
    for (idx, row) in rankings.iter().enumerate() {
        println!(
            "{:<4} {:<24} {:<5} {:>4} {:>7.3} {:>8.2} {:>10.2} {:>9.3} {:>10.2} {:>7.3}",
            idx + 1,
            row.player,
            row.team,
            row.total_gp,
            row.sv_pct,
            row.gsax_per60,
            row.clutch_toi,
            row.clutch_sv_pct,
            row.clutch_gsax_per60,
            row.clutch_score
        );
    }
    println!("{} goalies ranked", rankings.len());
    Ok(())
}
