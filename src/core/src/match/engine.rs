use crate::club::{Team, TeamCollection, TeamId};
use crate::r#match::elo::EloRating;
use crate::r#match::fixture::{Match, Score};
use crate::r#match::knockout::TieResult;
use crate::r#match::penalties::PenaltyShootout;
use log::debug;
use rand::Rng;
use rand_distr::StandardNormal;

/// Expected goals of an average side against an average side.
pub const BASE_LAMBDA: f64 = 1.3;
pub const HOME_ADVANTAGE: f64 = 1.25;

const STRENGTH_EXPONENT: f64 = 1.5;
const ELO_WEIGHT: f64 = 0.6;
const ELO_SCALE: f64 = 400.0;
const NOISE_STD_DEV: f64 = 0.02;

/// Where a side plays a given match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Venue {
    Home,
    Away,
    Neutral,
}

impl Venue {
    pub fn advantage(&self) -> f64 {
        match self {
            Venue::Home => HOME_ADVANTAGE,
            Venue::Away | Venue::Neutral => 1.0,
        }
    }
}

pub struct FootballEngine;

impl FootballEngine {
    /// Poisson mean of the goals `attacker` scores against `defender`.
    pub fn expected_goals<R: Rng + ?Sized>(
        attacker: &Team,
        defender: &Team,
        venue: Venue,
        rng: &mut R,
    ) -> f64 {
        let strength_ratio = attacker.attack as f64 / defender.defence as f64;
        let strength_factor = strength_ratio.powf(STRENGTH_EXPONENT);

        let elo_factor = 1.0 + (attacker.elo - defender.elo) / ELO_SCALE * ELO_WEIGHT;

        let noise: f64 = rng.sample(StandardNormal);

        BASE_LAMBDA
            * strength_factor
            * elo_factor
            * venue.advantage()
            * (1.0 + noise * NOISE_STD_DEV)
    }

    /// Knuth's multiplicative Poisson sampler.
    pub fn sample_goals<R: Rng + ?Sized>(lambda: f64, rng: &mut R) -> u32 {
        if lambda <= 0.0 {
            return 0;
        }

        let limit = (-lambda).exp();

        let mut draws = 0;
        let mut product = 1.0;

        loop {
            draws += 1;
            product *= rng.gen_range(0.0..1.0);

            if product <= limit {
                break;
            }
        }

        draws - 1
    }

    /// Draws a scoreline without touching either team.
    pub fn score<R: Rng + ?Sized>(home: &Team, away: &Team, neutral: bool, rng: &mut R) -> Score {
        let home_venue = if neutral { Venue::Neutral } else { Venue::Home };
        let away_venue = if neutral { Venue::Neutral } else { Venue::Away };

        let home_lambda = Self::expected_goals(home, away, home_venue, rng);
        let away_lambda = Self::expected_goals(away, home, away_venue, rng);

        Score::new(
            Self::sample_goals(home_lambda, rng),
            Self::sample_goals(away_lambda, rng),
        )
    }

    /// Plays a table fixture: writes the score, records the result for both
    /// sides and updates both ratings.
    pub fn play<R: Rng + ?Sized>(
        teams: &mut TeamCollection,
        fixture: &mut Match,
        rng: &mut R,
    ) -> Score {
        let (home, away) = teams.pair_mut(fixture.home_team_id, fixture.away_team_id);

        let score = Self::score(home, away, false, rng);

        EloRating::update(home, away, score.home_goals, score.away_goals);

        home.record_match_result(score.home_goals, score.away_goals);
        away.record_match_result(score.away_goals, score.home_goals);

        debug!(
            "{} {} - {} {}",
            home.name, score.home_goals, score.away_goals, away.name
        );

        fixture.set_score(score);

        score
    }

    /// Single match at a neutral venue that must produce a winner. A level
    /// score is rated as a draw and then settled on penalties.
    pub fn play_knockout_match<R: Rng + ?Sized>(
        teams: &mut TeamCollection,
        first_id: TeamId,
        second_id: TeamId,
        rng: &mut R,
    ) -> TieResult {
        let score = Self::score(teams.by_id(first_id), teams.by_id(second_id), true, rng);

        let (first, second) = teams.pair_mut(first_id, second_id);
        EloRating::update(first, second, score.home_goals, score.away_goals);

        let penalties = score.is_draw().then(|| PenaltyShootout::resolve(rng));

        let result = TieResult::new(first_id, second_id, vec![score], penalties);

        debug!(
            "{} {} - {} {}{}",
            first.name,
            score.home_goals,
            score.away_goals,
            second.name,
            penalty_suffix(&result)
        );

        result
    }

    /// Home and away legs with an independent rating update per leg. The
    /// aggregate decides; a level aggregate goes straight to penalties.
    pub fn play_two_legged_tie<R: Rng + ?Sized>(
        teams: &mut TeamCollection,
        first_id: TeamId,
        second_id: TeamId,
        rng: &mut R,
    ) -> TieResult {
        let first_leg = Self::score(
            teams.by_id(first_id),
            teams.by_id(second_id),
            false,
            rng,
        );
        {
            let (home, away) = teams.pair_mut(first_id, second_id);
            EloRating::update(home, away, first_leg.home_goals, first_leg.away_goals);
        }

        let second_leg = Self::score(
            teams.by_id(second_id),
            teams.by_id(first_id),
            false,
            rng,
        );
        {
            let (home, away) = teams.pair_mut(second_id, first_id);
            EloRating::update(home, away, second_leg.home_goals, second_leg.away_goals);
        }

        let mut result =
            TieResult::new(first_id, second_id, vec![first_leg, second_leg], None);

        let (first_total, second_total) = result.aggregate();
        if first_total == second_total {
            result.settle_on_penalties(PenaltyShootout::resolve(rng));
        }

        debug!(
            "{} {} - {} {} on aggregate{}",
            teams.name(first_id),
            first_total,
            second_total,
            teams.name(second_id),
            penalty_suffix(&result)
        );

        result
    }
}

fn penalty_suffix(result: &TieResult) -> String {
    match result.penalties {
        Some(shootout) => format!(" ({}-{} on penalties)", shootout.first, shootout.second),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::elo::K_FACTOR;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rated_pair(first_elo: f64, second_elo: f64) -> (TeamCollection, TeamId, TeamId) {
        let mut teams = TeamCollection::new();
        let first = teams.add("Alpha", 80, 80, first_elo).unwrap();
        let second = teams.add("Beta", 80, 80, second_elo).unwrap();
        (teams, first, second)
    }

    fn two_teams() -> (TeamCollection, TeamId, TeamId) {
        rated_pair(1500.0, 1500.0)
    }

    fn elo_delta(rating: f64, opponent_rating: f64, goals: u32, opponent_goals: u32) -> f64 {
        let expected = EloRating::expected_score(rating, opponent_rating);
        K_FACTOR * (EloRating::actual_score(goals, opponent_goals) - expected)
    }

    #[test]
    fn test_sample_goals_non_positive_lambda_is_goalless() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        assert_eq!(FootballEngine::sample_goals(0.0, &mut rng), 0);
        assert_eq!(FootballEngine::sample_goals(-2.5, &mut rng), 0);
    }

    #[test]
    fn test_sample_goals_mean_converges_to_lambda() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        for lambda in [0.4, 1.3, 2.6] {
            let samples = 100_000;
            let total: u64 = (0..samples)
                .map(|_| FootballEngine::sample_goals(lambda, &mut rng) as u64)
                .sum();

            let mean = total as f64 / samples as f64;
            assert!((mean - lambda).abs() < 0.03, "lambda {lambda}, mean {mean}");
        }
    }

    #[test]
    fn test_expected_goals_for_equal_sides() {
        let (teams, first, second) = two_teams();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let (alpha, beta) = (teams.by_id(first), teams.by_id(second));

        let neutral = FootballEngine::expected_goals(alpha, beta, Venue::Neutral, &mut rng);
        let home = FootballEngine::expected_goals(alpha, beta, Venue::Home, &mut rng);

        // noise is 2% per standard deviation
        assert!((neutral - BASE_LAMBDA).abs() < BASE_LAMBDA * 0.1);
        let home_lambda = BASE_LAMBDA * HOME_ADVANTAGE;
        assert!((home - home_lambda).abs() < home_lambda * 0.1);
    }

    #[test]
    fn test_expected_goals_favours_stronger_attack_and_rating() {
        let mut teams = TeamCollection::new();
        let strong = teams.add("Strong", 95, 90, 1700.0).unwrap();
        let weak = teams.add("Weak", 65, 60, 1400.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        let (strong, weak) = (teams.by_id(strong), teams.by_id(weak));

        let strong_lambda = FootballEngine::expected_goals(strong, weak, Venue::Neutral, &mut rng);
        let weak_lambda = FootballEngine::expected_goals(weak, strong, Venue::Neutral, &mut rng);

        assert!(strong_lambda > 2.0 * weak_lambda);
    }

    #[test]
    fn test_play_records_both_sides_and_keeps_elo_sum() {
        let (mut teams, first, second) = two_teams();
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let mut fixture = Match::new(first, second);
        let score = FootballEngine::play(&mut teams, &mut fixture, &mut rng);

        assert_eq!(fixture.score(), Some(score));

        let home = teams.by_id(first).statistics();
        let away = teams.by_id(second).statistics();

        assert_eq!(home.played(), 1);
        assert_eq!(away.played(), 1);
        assert_eq!(home.goals_for(), score.home_goals);
        assert_eq!(away.goals_for(), score.away_goals);
        assert_eq!(home.points() + away.points(), if score.is_draw() { 2 } else { 3 });

        let elo_sum = teams.by_id(first).elo + teams.by_id(second).elo;
        assert!((elo_sum - 3000.0).abs() < 1e-9);
    }

    #[test]
    fn test_knockout_match_leaves_table_untouched() {
        let (mut teams, first, second) = two_teams();
        let mut rng = ChaCha8Rng::seed_from_u64(6);

        for _ in 0..50 {
            let result = FootballEngine::play_knockout_match(&mut teams, first, second, &mut rng);

            assert!(result.winner_id == first || result.winner_id == second);
            assert_eq!(result.legs.len(), 1);
            assert_eq!(result.penalties.is_some(), result.legs[0].is_draw());
        }

        assert_eq!(teams.by_id(first).statistics().played(), 0);
        assert_eq!(teams.by_id(second).statistics().played(), 0);
    }

    #[test]
    fn test_two_legged_tie_always_has_single_winner() {
        let (mut teams, first, second) = two_teams();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let mut shootouts = 0;

        for _ in 0..200 {
            let result = FootballEngine::play_two_legged_tie(&mut teams, first, second, &mut rng);
            let (first_total, second_total) = result.aggregate();

            assert_eq!(result.legs.len(), 2);
            assert!(result.winner_id == first || result.winner_id == second);
            assert_ne!(result.winner_id, result.loser_id());

            if first_total == second_total {
                shootouts += 1;
                let shootout = result.penalties.unwrap();
                assert_eq!(result.winner_id == first, shootout.first_wins());
            } else {
                assert!(result.penalties.is_none());
                assert_eq!(result.winner_id == first, first_total > second_total);
            }
        }

        assert!(shootouts > 0);

        let elo_sum = teams.by_id(first).elo + teams.by_id(second).elo;
        assert!((elo_sum - 3000.0).abs() < 1e-6);
    }

    #[test]
    fn test_knockout_match_rates_score_once_and_ignores_penalties() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let draw_delta = K_FACTOR * (0.5 - EloRating::expected_score(1600.0, 1450.0));

        let mut shootouts = 0;

        for _ in 0..200 {
            let (mut teams, first, second) = rated_pair(1600.0, 1450.0);
            let result = FootballEngine::play_knockout_match(&mut teams, first, second, &mut rng);

            let leg = result.legs[0];
            let delta = if result.penalties.is_some() {
                shootouts += 1;
                draw_delta
            } else {
                elo_delta(1600.0, 1450.0, leg.home_goals, leg.away_goals)
            };

            assert!((teams.by_id(first).elo - (1600.0 + delta)).abs() < 1e-9);
            assert!((teams.by_id(second).elo - (1450.0 - delta)).abs() < 1e-9);
        }

        assert!(shootouts > 0);
    }

    #[test]
    fn test_two_legged_tie_rates_each_leg_once() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut level_aggregates = 0;

        for _ in 0..200 {
            let (mut teams, first, second) = rated_pair(1580.0, 1520.0);
            let result = FootballEngine::play_two_legged_tie(&mut teams, first, second, &mut rng);

            let (first_leg, second_leg) = (result.legs[0], result.legs[1]);

            let first_leg_delta =
                elo_delta(1580.0, 1520.0, first_leg.home_goals, first_leg.away_goals);
            let first_elo = 1580.0 + first_leg_delta;
            let second_elo = 1520.0 - first_leg_delta;

            // the second team hosts the return leg
            let second_leg_delta = elo_delta(
                second_elo,
                first_elo,
                second_leg.home_goals,
                second_leg.away_goals,
            );

            assert!((teams.by_id(first).elo - (first_elo - second_leg_delta)).abs() < 1e-9);
            assert!((teams.by_id(second).elo - (second_elo + second_leg_delta)).abs() < 1e-9);

            if result.penalties.is_some() {
                level_aggregates += 1;
            }
        }

        assert!(level_aggregates > 0);
    }
}
