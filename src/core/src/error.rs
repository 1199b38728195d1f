use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeasonError {
    #[error("{league}: {teams} teams cannot fill {required} places")]
    RosterTooSmall {
        league: String,
        teams: usize,
        required: usize,
    },

    #[error("{league}: invalid format: {reason}")]
    InvalidFormat { league: String, reason: String },

    #[error("team `{0}` registered twice")]
    DuplicateTeam(String),

    #[error("unknown team `{0}`")]
    UnknownTeam(String),

    #[error("invalid value `{value}` for {name}")]
    InvalidSetting { name: String, value: String },
}
