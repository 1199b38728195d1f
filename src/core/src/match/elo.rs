//! Elo rating update applied after every rated match.

use crate::club::Team;

/// Rating points exchanged for a fully unexpected result.
pub const K_FACTOR: f64 = 20.0;

const RATING_SCALE: f64 = 400.0;

pub struct EloRating;

impl EloRating {
    /// Probability-like expectation of `rating` against `opponent_rating`.
    pub fn expected_score(rating: f64, opponent_rating: f64) -> f64 {
        1.0 / (1.0 + 10f64.powf((opponent_rating - rating) / RATING_SCALE))
    }

    pub fn actual_score(goals: u32, opponent_goals: u32) -> f64 {
        if goals > opponent_goals {
            1.0
        } else if goals < opponent_goals {
            0.0
        } else {
            0.5
        }
    }

    /// Moves both ratings by the same amount in opposite directions and
    /// returns the change applied to `first`.
    pub fn update(first: &mut Team, second: &mut Team, first_goals: u32, second_goals: u32) -> f64 {
        let expected = Self::expected_score(first.elo, second.elo);
        let actual = Self::actual_score(first_goals, second_goals);

        let delta = K_FACTOR * (actual - expected);

        first.elo += delta;
        second.elo -= delta;

        delta
    }
}
