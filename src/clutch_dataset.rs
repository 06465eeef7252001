use std::path::Path;

use anyhow::{Context, Result, anyhow};
use rusqlite::{Connection, OpenFlags};

use crate::splits::{GoalieSplits, SplitKind, SplitRow};

/// Open the clutch database read-only. The scraper owns writes; this
/// side never takes a write lock.
pub fn open_db(path: &Path) -> Result<Connection> {
    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| format!("open clutch db {}", path.display()))
}

/// Load all six split tables.
///
/// The regular-season all-situations table is required: if it is
/// missing, or every row in it fails validation, nothing can be ranked
/// and this returns an error. Any other table may be missing or empty;
/// that split is then treated as absent for every player, which
/// degrades the numbers but never the load.
pub fn load_splits(conn: &Connection) -> Result<GoalieSplits> {
    let anchor_table = SplitKind::RegularAll.table_name();
    let anchor = load_split(conn, SplitKind::RegularAll)?
        .ok_or_else(|| anyhow!("anchor table {anchor_table} is missing"))?;
    if anchor.is_empty() {
        return Err(anyhow!("anchor table {anchor_table} has no valid rows"));
    }

    let mut splits = GoalieSplits::new(anchor);
    for kind in SplitKind::ALL {
        if kind == SplitKind::RegularAll {
            continue;
        }
        match load_split(conn, kind)? {
            Some(rows) => splits.insert_split(kind, rows),
            None => log::warn!(
                "split table {} is missing; treating it as empty",
                kind.table_name()
            ),
        }
    }
    Ok(splits)
}

/// Read one split table, or `None` if the table does not exist.
/// Malformed rows (non-numeric fields, negative counts or minutes) are
/// rejected and logged; the remaining rows still load.
fn load_split(conn: &Connection, kind: SplitKind) -> Result<Option<Vec<SplitRow>>> {
    let table = kind.table_name();
    if !table_exists(conn, table)? {
        return Ok(None);
    }

    let sql = format!(r#"SELECT Player, Team, GP, TOI, "SV%", GSAx FROM {table}"#);
    let mut stmt = conn
        .prepare(&sql)
        .with_context(|| format!("prepare select from {table}"))?;
    let mapped = stmt
        .query_map([], |row| {
            Ok(SplitRow {
                player: row.get(0)?,
                team: row.get(1)?,
                games_played: row.get(2)?,
                toi_minutes: row.get(3)?,
                save_pct: row.get(4)?,
                gsax: row.get(5)?,
            })
        })
        .with_context(|| format!("query {table}"))?;

    let mut rows = Vec::new();
    for item in mapped {
        match item {
            Ok(row) if row.toi_minutes < 0.0 => {
                log::warn!(
                    "{table}: rejecting {}: negative TOI {}",
                    row.player,
                    row.toi_minutes
                );
            }
            Ok(row) => rows.push(row),
            // Covers non-numeric values and negative GP (GP maps to an
            // unsigned count, so a negative fails the column read).
            Err(err) => log::warn!("{table}: rejecting malformed row: {err}"),
        }
    }
    Ok(Some(rows))
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let mut stmt = conn
        .prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1")
        .context("prepare table probe")?;
    stmt.exists([table])
        .with_context(|| format!("probe for table {table}"))
}
