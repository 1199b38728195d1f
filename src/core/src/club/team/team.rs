use crate::club::team::statistics::TeamStatistics;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TeamId(pub u32);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A club taking part in the season.
///
/// Attack and defence are fixed for the whole run. The Elo rating moves after
/// every rated match and is the only state carried from one competition to the
/// next; the statistics block belongs to whichever table the team currently
/// plays in.
#[derive(Debug, Clone)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub attack: u16,
    pub defence: u16,
    pub elo: f64,
    statistics: TeamStatistics,
}

impl Team {
    pub fn new(id: TeamId, name: String, attack: u16, defence: u16, elo: f64) -> Self {
        Team {
            id,
            name,
            attack,
            defence,
            elo,
            statistics: TeamStatistics::default(),
        }
    }

    pub fn statistics(&self) -> &TeamStatistics {
        &self.statistics
    }

    pub fn record_match_result(&mut self, goals_scored: u32, goals_conceded: u32) {
        self.statistics.record(goals_scored, goals_conceded);
    }

    /// Starts a fresh table for this team. Identity and rating are kept.
    pub fn enter_competition(&mut self) {
        self.statistics.reset();
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
