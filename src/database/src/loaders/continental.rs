use crate::error::DatabaseError;
use serde::Deserialize;

const STATIC_CONTINENTAL_JSON: &str = include_str!("../data/continental.json");

#[derive(Debug, Deserialize)]
pub struct ContinentalEntity {
    pub name: String,
    pub capacity: usize,
    pub league_phase_matches: usize,
    pub direct_qualifiers: usize,
    pub play_off_places: usize,
    pub play_off_draw: PlayOffDrawEntity,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayOffDrawEntity {
    Random,
    Seeded,
}

pub struct ContinentalLoader;

impl ContinentalLoader {
    pub fn load() -> Result<Vec<ContinentalEntity>, DatabaseError> {
        serde_json::from_str(STATIC_CONTINENTAL_JSON).map_err(|source| DatabaseError::Malformed {
            file: "continental.json",
            source,
        })
    }
}
