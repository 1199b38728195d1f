use crate::error::SeasonError;
use log::info;
use std::env;
use std::path::PathBuf;

pub const SEED_VARIABLE: &str = "SEASON_SEED";
pub const REPORT_VARIABLE: &str = "SEASON_REPORT";

/// Run-wide knobs read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationSettings {
    pub seed: u64,
    /// Where to write the season outcome as JSON, if anywhere.
    pub report_path: Option<PathBuf>,
}

impl SimulationSettings {
    pub fn from_env() -> Result<Self, SeasonError> {
        Ok(SimulationSettings {
            seed: Self::parse_seed(env::var(SEED_VARIABLE).ok())?,
            report_path: env::var_os(REPORT_VARIABLE).map(PathBuf::from),
        })
    }

    pub fn parse_seed(value: Option<String>) -> Result<u64, SeasonError> {
        let seed = match value {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| SeasonError::InvalidSetting {
                    name: SEED_VARIABLE.to_string(),
                    value: raw.clone(),
                })?,
            None => {
                let seed = rand::random::<u64>();
                info!("no {} given, drawn seed {}", SEED_VARIABLE, seed);
                seed
            }
        };

        Ok(seed)
    }
}
