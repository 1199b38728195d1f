use crate::club::TeamId;
use crate::league::{FixtureShortfall, StandingRow};
use crate::r#match::KnockoutRound;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ContinentalResult {
    pub name: String,
    pub entrants: Vec<TeamId>,
    pub standings: Vec<StandingRow>,
    pub shortfalls: Vec<FixtureShortfall>,
    pub play_off: Option<KnockoutRound>,
    pub rounds: Vec<KnockoutRound>,
    pub winner_id: Option<TeamId>,
}

impl ContinentalResult {
    pub fn empty(name: String) -> Self {
        ContinentalResult {
            name,
            entrants: Vec::new(),
            standings: Vec::new(),
            shortfalls: Vec::new(),
            play_off: None,
            rounds: Vec::new(),
            winner_id: None,
        }
    }
}
