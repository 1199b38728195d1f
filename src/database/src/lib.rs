mod error;
mod generators;
mod loaders;

pub use error::*;
pub use generators::*;
pub use loaders::*;

/// Raw embedded data, before it is turned into simulation types.
pub struct DatabaseEntity {
    pub leagues: Vec<LeagueEntity>,
    pub continental: Vec<ContinentalEntity>,
}

pub struct DatabaseLoader;

impl DatabaseLoader {
    pub fn load() -> Result<DatabaseEntity, DatabaseError> {
        Ok(DatabaseEntity {
            leagues: LeagueLoader::load()?,
            continental: ContinentalLoader::load()?,
        })
    }
}
