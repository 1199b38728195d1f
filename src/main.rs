use database::{DatabaseGenerator, DatabaseLoader};
use env_logger::Env;
use itertools::Itertools;
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use season_core::utils::TimeEstimation;
use season_core::{
    LeagueOutcome, SeasonResult, SeasonSimulator, SimulationSettings, TeamCollection, TeamId,
};
use std::fs;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let settings = SimulationSettings::from_env()?;
    info!("season seed: {}", settings.seed);

    let (database, estimated) = TimeEstimation::estimate(DatabaseLoader::load);
    let database = database?;

    info!("database loaded: {} ms", estimated);

    let mut data = DatabaseGenerator::generate(&database)?;
    let mut rng = ChaCha8Rng::seed_from_u64(settings.seed);

    let (result, estimated) =
        TimeEstimation::estimate(|| SeasonSimulator::run(&mut data, &mut rng));

    info!("season simulated: {} ms", estimated);

    log_summary(&result, &data.teams);

    if let Some(path) = &settings.report_path {
        fs::write(path, serde_json::to_string_pretty(&result)?)?;
        info!("report written to {}", path.display());
    }

    Ok(())
}

fn log_summary(result: &SeasonResult, teams: &TeamCollection) {
    let names = |ids: &[TeamId]| ids.iter().map(|id| teams.name(*id)).join(", ");

    for outcome in &result.leagues {
        let league = match outcome {
            LeagueOutcome::Completed(league) => league,
            LeagueOutcome::Skipped { name, reason } => {
                info!("{}: skipped ({})", name, reason);
                continue;
            }
        };

        info!("--- {} ---", league.name);
        info!("Pos | Team                       | P  | W  | D  | L  | GF | GA | GD  | Pts | Elo");

        for row in &league.standings {
            info!(
                "{:<3} | {:<26} | {:<2} | {:<2} | {:<2} | {:<2} | {:<2} | {:<2} | {:<3} | {:<3} | \
                 {:.0}",
                row.position,
                row.team_name,
                row.played,
                row.wins,
                row.draws,
                row.losses,
                row.goals_for,
                row.goals_against,
                row.goal_difference,
                row.points,
                row.elo
            );
        }

        for cup in &league.cups {
            if let Some(winner) = cup.winner_id {
                info!("{} winner: {}", cup.name, teams.name(winner));
            }
        }

        info!("Champions League: {}", names(&league.qualifiers.champions));
        info!("Europa League: {}", names(&league.qualifiers.europa));
        info!("Conference League: {}", names(&league.qualifiers.conference));
    }

    for competition in &result.continental {
        info!(
            "{}: {} entrants, {} fixture shortfalls",
            competition.name,
            competition.entrants.len(),
            competition.shortfalls.len()
        );

        for round in &competition.rounds {
            for tie in &round.ties {
                let (first, second) = tie.aggregate();

                info!(
                    "{} | {} {}-{} {}{}",
                    round.name,
                    teams.name(tie.first_team_id),
                    first,
                    second,
                    teams.name(tie.second_team_id),
                    tie.penalties
                        .map(|p| format!(" ({}-{} pens)", p.first, p.second))
                        .unwrap_or_default()
                );
            }
        }

        if let Some(winner) = competition.winner_id {
            info!("🏆 {}: {}", competition.name, teams.name(winner));
        }
    }
}
