use crate::club::{TeamCollection, TeamId};
use crate::r#match::engine::FootballEngine;
use crate::r#match::fixture::Score;
use crate::r#match::penalties::PenaltyShootout;
use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TieFormat {
    /// One match at a neutral venue.
    SingleMatch,
    /// First leg at the first team's ground, second leg at the other.
    TwoLegged,
}

/// A decided pairing. Each leg's score is kept from the point of view of
/// that leg's home side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TieResult {
    pub first_team_id: TeamId,
    pub second_team_id: TeamId,
    pub legs: Vec<Score>,
    pub penalties: Option<PenaltyShootout>,
    pub winner_id: TeamId,
}

impl TieResult {
    pub fn new(
        first_team_id: TeamId,
        second_team_id: TeamId,
        legs: Vec<Score>,
        penalties: Option<PenaltyShootout>,
    ) -> Self {
        let mut result = TieResult {
            first_team_id,
            second_team_id,
            legs,
            penalties: None,
            winner_id: first_team_id,
        };

        match penalties {
            Some(shootout) => result.settle_on_penalties(shootout),
            None => {
                let (first, second) = result.aggregate();
                if second > first {
                    result.winner_id = second_team_id;
                }
            }
        }

        result
    }

    /// Goals for the first and the second team across all legs.
    pub fn aggregate(&self) -> (u32, u32) {
        self.legs
            .iter()
            .enumerate()
            .fold((0, 0), |(first, second), (leg, score)| {
                if leg % 2 == 0 {
                    (first + score.home_goals, second + score.away_goals)
                } else {
                    (first + score.away_goals, second + score.home_goals)
                }
            })
    }

    pub fn settle_on_penalties(&mut self, shootout: PenaltyShootout) {
        self.winner_id = if shootout.first_wins() {
            self.first_team_id
        } else {
            self.second_team_id
        };
        self.penalties = Some(shootout);
    }

    pub fn loser_id(&self) -> TeamId {
        if self.winner_id == self.first_team_id {
            self.second_team_id
        } else {
            self.first_team_id
        }
    }
}

pub fn play_tie<R: Rng + ?Sized>(
    format: TieFormat,
    teams: &mut TeamCollection,
    first_id: TeamId,
    second_id: TeamId,
    rng: &mut R,
) -> TieResult {
    match format {
        TieFormat::SingleMatch => {
            FootballEngine::play_knockout_match(teams, first_id, second_id, rng)
        }
        TieFormat::TwoLegged => {
            FootballEngine::play_two_legged_tie(teams, first_id, second_id, rng)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct KnockoutRound {
    pub name: String,
    pub ties: Vec<TieResult>,
    pub byes: Vec<TeamId>,
}

impl KnockoutRound {
    /// Plays already drawn pairings. Teams given a bye go through untouched.
    pub fn play<R: Rng + ?Sized>(
        name: String,
        pairs: &[(TeamId, TeamId)],
        byes: Vec<TeamId>,
        format: TieFormat,
        teams: &mut TeamCollection,
        rng: &mut R,
    ) -> Self {
        debug!("{}: {} ties, {} byes", name, pairs.len(), byes.len());

        let ties = pairs
            .iter()
            .map(|&(first, second)| play_tie(format, teams, first, second, rng))
            .collect();

        KnockoutRound { name, ties, byes }
    }

    /// Shuffles the entrants, hands a bye to the last one when the count is
    /// odd and pairs the rest in draw order.
    pub fn draw_and_play<R: Rng + ?Sized>(
        name: String,
        mut entrants: Vec<TeamId>,
        format: TieFormat,
        teams: &mut TeamCollection,
        rng: &mut R,
    ) -> Self {
        entrants.shuffle(rng);

        let byes = if entrants.len() % 2 == 1 {
            entrants.pop().into_iter().collect()
        } else {
            Vec::new()
        };

        let pairs: Vec<(TeamId, TeamId)> = entrants
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
            .collect();

        Self::play(name, &pairs, byes, format, teams, rng)
    }

    /// Byes first, then tie winners in pairing order.
    pub fn advancing(&self) -> Vec<TeamId> {
        self.byes
            .iter()
            .copied()
            .chain(self.ties.iter().map(|tie| tie.winner_id))
            .collect()
    }
}

/// Label for a knockout round by the number of sides still in it.
pub fn round_name(remaining: usize) -> String {
    match remaining {
        0..=2 => String::from("Final"),
        3..=4 => String::from("Semi-finals"),
        5..=8 => String::from("Quarter-finals"),
        n => format!("Round of {}", n.next_power_of_two()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn collection(size: usize) -> (TeamCollection, Vec<TeamId>) {
        let mut teams = TeamCollection::new();
        let ids = (0..size)
            .map(|i| teams.add(&format!("Team {i}"), 75, 75, 1500.0).unwrap())
            .collect();
        (teams, ids)
    }

    #[test]
    fn test_aggregate_swaps_sides_on_second_leg() {
        let result = TieResult::new(
            TeamId(0),
            TeamId(1),
            vec![Score::new(2, 1), Score::new(3, 0)],
            None,
        );

        assert_eq!(result.aggregate(), (2, 4));
        assert_eq!(result.winner_id, TeamId(1));
        assert_eq!(result.loser_id(), TeamId(0));
    }

    #[test]
    fn test_level_aggregate_uses_shootout_winner() {
        let result = TieResult::new(
            TeamId(0),
            TeamId(1),
            vec![Score::new(1, 0), Score::new(1, 0)],
            Some(PenaltyShootout { first: 3, second: 4 }),
        );

        assert_eq!(result.aggregate(), (1, 1));
        assert_eq!(result.winner_id, TeamId(1));
    }

    #[test]
    fn test_odd_draw_gives_one_bye() {
        let (mut teams, ids) = collection(7);
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let round = KnockoutRound::draw_and_play(
            round_name(ids.len()),
            ids.clone(),
            TieFormat::SingleMatch,
            &mut teams,
            &mut rng,
        );

        assert_eq!(round.name, "Quarter-finals");
        assert_eq!(round.ties.len(), 3);
        assert_eq!(round.byes.len(), 1);

        let advancing = round.advancing();
        assert_eq!(advancing.len(), 4);
        assert!(advancing.iter().all(|id| ids.contains(id)));
    }

    #[test]
    fn test_round_names() {
        assert_eq!(round_name(2), "Final");
        assert_eq!(round_name(4), "Semi-finals");
        assert_eq!(round_name(8), "Quarter-finals");
        assert_eq!(round_name(16), "Round of 16");
        assert_eq!(round_name(20), "Round of 32");
    }
}
