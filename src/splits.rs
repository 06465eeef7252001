use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The six situational split tables the rankings are built from:
/// season type (regular / playoff) crossed with score situation
/// (all, tied, up by one goal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitKind {
    RegularAll,
    RegularTied,
    RegularUp1,
    PlayoffAll,
    PlayoffTied,
    PlayoffUp1,
}

impl SplitKind {
    pub const ALL: [SplitKind; 6] = [
        SplitKind::RegularAll,
        SplitKind::RegularTied,
        SplitKind::RegularUp1,
        SplitKind::PlayoffAll,
        SplitKind::PlayoffTied,
        SplitKind::PlayoffUp1,
    ];

    /// Close-score splits (tied or up by one), the proxy for pressure
    /// situations.
    pub const CLUTCH: [SplitKind; 4] = [
        SplitKind::RegularTied,
        SplitKind::RegularUp1,
        SplitKind::PlayoffTied,
        SplitKind::PlayoffUp1,
    ];

    /// Table name in the clutch database.
    pub fn table_name(self) -> &'static str {
        match self {
            SplitKind::RegularAll => "Goalie_Active_Reg",
            SplitKind::RegularTied => "Goalie_Active_Reg_Tied",
            SplitKind::RegularUp1 => "Goalie_Active_Reg_Up1",
            SplitKind::PlayoffAll => "Goalie_Active_Playoff",
            SplitKind::PlayoffTied => "Goalie_Active_Playoff_Tied",
            SplitKind::PlayoffUp1 => "Goalie_Active_Playoff_Up1",
        }
    }
}

/// One goaltender's observed numbers for a single split. `gsax` is the
/// split total; per-60 rates are derived from it at ranking time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitRow {
    pub player: String,
    pub team: String,
    pub games_played: u32,
    pub toi_minutes: f64,
    pub save_pct: f64,
    pub gsax: f64,
}

/// The six splits keyed for the join: the regular-season all-situations
/// split is the anchor and keeps its table order (it defines both the
/// player universe and the output's tie-break order); every other split
/// is a per-player lookup table.
#[derive(Debug, Clone, Default)]
pub struct GoalieSplits {
    regular_all: Vec<SplitRow>,
    by_kind: HashMap<SplitKind, HashMap<String, SplitRow>>,
}

impl GoalieSplits {
    pub fn new(regular_all: Vec<SplitRow>) -> Self {
        Self {
            regular_all,
            by_kind: HashMap::new(),
        }
    }

    /// Replace one split's rows. A player missing from a non-anchor
    /// split simply has no entry; the rankings treat that as a
    /// zero-weight contribution.
    pub fn insert_split(&mut self, kind: SplitKind, rows: Vec<SplitRow>) {
        if kind == SplitKind::RegularAll {
            self.regular_all = rows;
            return;
        }
        let keyed = rows
            .into_iter()
            .map(|row| (row.player.clone(), row))
            .collect();
        self.by_kind.insert(kind, keyed);
    }

    pub fn anchor(&self) -> &[SplitRow] {
        &self.regular_all
    }

    pub fn lookup(&self, kind: SplitKind, player: &str) -> Option<&SplitRow> {
        if kind == SplitKind::RegularAll {
            return self.regular_all.iter().find(|row| row.player == player);
        }
        self.by_kind.get(&kind)?.get(player)
    }
}
