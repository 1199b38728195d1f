use crate::club::{TeamCollection, TeamId};
use crate::r#match::{KnockoutRound, TieFormat, round_name};
use log::debug;
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CupResult {
    pub name: String,
    pub rounds: Vec<KnockoutRound>,
    pub winner_id: Option<TeamId>,
}

/// Single-match knockout cup at neutral venues. Only ratings move; table
/// statistics are never touched.
pub struct DomesticCup {
    pub name: String,
}

impl DomesticCup {
    pub fn new(name: String) -> Self {
        DomesticCup { name }
    }

    /// Entrants are seeded by rating. A field that is not a power of two is
    /// trimmed by a preliminary round among the lowest rated, paired
    /// neighbour against neighbour, while the rest get byes.
    pub fn play<R: Rng + ?Sized>(
        &self,
        entrants: &[TeamId],
        teams: &mut TeamCollection,
        rng: &mut R,
    ) -> CupResult {
        let mut seeded = entrants.to_vec();
        seeded.sort_by(|&a, &b| {
            let (team_a, team_b) = (teams.by_id(a), teams.by_id(b));

            team_b
                .elo
                .total_cmp(&team_a.elo)
                .then_with(|| team_a.name.cmp(&team_b.name))
        });

        let mut rounds = Vec::new();

        let bracket_size = Self::bracket_size(seeded.len());
        let mut remaining = if bracket_size < seeded.len() {
            let preliminary = seeded.split_off(2 * bracket_size - seeded.len());

            let pairs: Vec<(TeamId, TeamId)> = preliminary
                .chunks_exact(2)
                .map(|pair| (pair[0], pair[1]))
                .collect();

            let round = KnockoutRound::play(
                String::from("Preliminary round"),
                &pairs,
                seeded,
                TieFormat::SingleMatch,
                teams,
                rng,
            );

            let advancing = round.advancing();
            rounds.push(round);

            advancing
        } else {
            seeded
        };

        while remaining.len() > 1 {
            let round = KnockoutRound::draw_and_play(
                round_name(remaining.len()),
                remaining,
                TieFormat::SingleMatch,
                teams,
                rng,
            );

            remaining = round.advancing();
            rounds.push(round);
        }

        let winner_id = remaining.first().copied();

        if let Some(winner_id) = winner_id {
            debug!("{} won by {}", self.name, teams.name(winner_id));
        }

        CupResult {
            name: self.name.clone(),
            rounds,
            winner_id,
        }
    }

    /// Largest power of two not above `entrants`.
    fn bracket_size(entrants: usize) -> usize {
        match entrants {
            0 => 0,
            n => 1 << (usize::BITS - 1 - n.leading_zeros()),
        }
    }
}
