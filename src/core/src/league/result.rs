use crate::club::TeamId;
use crate::league::cup::CupResult;
use crate::league::qualification::Qualifiers;
use crate::league::table::StandingRow;
use crate::r#match::{KnockoutRound, TieResult};
use serde::Serialize;

/// One table position settled by a single match between two sides level on
/// points.
#[derive(Debug, Clone, Serialize)]
pub struct DeciderResult {
    pub position: usize,
    pub tie: TieResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeagueResult {
    pub league_id: u32,
    pub name: String,
    pub standings: Vec<StandingRow>,
    pub cups: Vec<CupResult>,
    pub deciders: Vec<DeciderResult>,
    pub play_off: Vec<KnockoutRound>,
    pub qualifiers: Qualifiers,
}

impl LeagueResult {
    pub fn champion(&self) -> Option<TeamId> {
        self.standings.first().map(|row| row.team_id)
    }
}
