use crate::error::DatabaseError;
use serde::Deserialize;

const STATIC_LEAGUES_JSON: &str = include_str!("../data/leagues.json");

#[derive(Debug, Deserialize)]
pub struct LeagueEntity {
    pub id: u32,
    pub name: String,
    pub slug: String,
    pub teams: Vec<TeamEntity>,
    #[serde(default)]
    pub cups: Vec<String>,
    pub format: LeagueFormatEntity,
    #[serde(default)]
    pub tie_breaks: Option<Vec<TieBreakEntity>>,
    #[serde(default)]
    pub deciders: Vec<usize>,
    pub qualification: QualificationEntity,
}

#[derive(Debug, Deserialize)]
pub struct TeamEntity {
    pub name: String,
    pub attack: u16,
    pub defence: u16,
    /// Offset from the shared starting rating.
    pub elo_offset: f64,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LeagueFormatEntity {
    DoubleRoundRobin,
    Split {
        rounds: u8,
        halve_points: bool,
        sections: Vec<SplitSectionEntity>,
    },
}

#[derive(Debug, Deserialize)]
pub struct SplitSectionEntity {
    pub name: String,
    pub size: usize,
    pub rounds: u8,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreakEntity {
    HeadToHead,
    GoalDifference,
    GoalsFor,
    Wins,
}

#[derive(Debug, Deserialize)]
pub struct QualificationEntity {
    pub champions: usize,
    pub europa: usize,
    pub conference: usize,
    #[serde(default)]
    pub conference_route: Option<ConferenceRouteEntity>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConferenceRouteEntity {
    CupWinner { cup: usize },
    EuropeanPlayOff { from: usize, to: usize },
    SectionWinner { section: usize },
}

pub struct LeagueLoader;

impl LeagueLoader {
    pub fn load() -> Result<Vec<LeagueEntity>, DatabaseError> {
        serde_json::from_str(STATIC_LEAGUES_JSON).map_err(|source| DatabaseError::Malformed {
            file: "leagues.json",
            source,
        })
    }
}
