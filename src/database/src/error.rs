use season_core::SeasonError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("malformed {file}: {source}")]
    Malformed {
        file: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Season(#[from] SeasonError),
}
