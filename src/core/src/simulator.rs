use crate::club::TeamCollection;
use crate::continent::{
    ContinentalCompetition, ContinentalFormat, ContinentalPool, ContinentalResult,
};
use crate::league::{DomesticLeague, LeagueResult};
use crate::utils::Logging;
use log::{info, warn};
use rand::Rng;
use serde::Serialize;

/// Everything one season runs on: the shared team store, the domestic
/// leagues in playing order and the continental competitions from the
/// strongest down.
#[derive(Debug)]
pub struct SimulatorData {
    pub teams: TeamCollection,
    pub leagues: Vec<DomesticLeague>,
    pub continental: Vec<ContinentalFormat>,
}

impl SimulatorData {
    pub fn new(
        teams: TeamCollection,
        leagues: Vec<DomesticLeague>,
        continental: Vec<ContinentalFormat>,
    ) -> Self {
        SimulatorData {
            teams,
            leagues,
            continental,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub enum LeagueOutcome {
    Completed(LeagueResult),
    Skipped { name: String, reason: String },
}

impl LeagueOutcome {
    pub fn result(&self) -> Option<&LeagueResult> {
        match self {
            LeagueOutcome::Completed(result) => Some(result),
            LeagueOutcome::Skipped { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeasonResult {
    pub leagues: Vec<LeagueOutcome>,
    pub continental: Vec<ContinentalResult>,
}

impl SeasonResult {
    pub fn completed_leagues(&self) -> impl Iterator<Item = &LeagueResult> {
        self.leagues.iter().filter_map(LeagueOutcome::result)
    }
}

pub struct SeasonSimulator;

impl SeasonSimulator {
    /// A league that fails is reported and skipped; the others and the
    /// continental stage still run.
    pub fn run<R: Rng + ?Sized>(data: &mut SimulatorData, rng: &mut R) -> SeasonResult {
        let mut leagues = Vec::with_capacity(data.leagues.len());

        for league in &data.leagues {
            let outcome = Logging::estimate_result(
                || league.simulate(&mut data.teams, rng),
                &format!("{} simulated", league.name),
            );

            leagues.push(match outcome {
                Ok(result) => LeagueOutcome::Completed(result),
                Err(error) => {
                    warn!("{} skipped: {}", league.name, error);

                    LeagueOutcome::Skipped {
                        name: league.name.clone(),
                        reason: error.to_string(),
                    }
                }
            });
        }

        let pool = ContinentalPool::new(
            leagues
                .iter()
                .filter_map(LeagueOutcome::result)
                .flat_map(|result| result.qualifiers.iter()),
            &data.teams,
        );

        let capacities: Vec<usize> = data
            .continental
            .iter()
            .map(|format| format.capacity)
            .collect();

        let continental = data
            .continental
            .iter()
            .zip(pool.distribute(&capacities))
            .map(|(format, entrants)| {
                ContinentalCompetition::new(format.clone(), entrants).simulate(&mut data.teams, rng)
            })
            .collect();

        info!("✅ season complete");

        SeasonResult { leagues, continental }
    }
}
