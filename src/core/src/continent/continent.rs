use crate::club::{TeamCollection, TeamId};
use crate::continent::format::{ContinentalFormat, PlayOffDraw};
use crate::continent::result::ContinentalResult;
use crate::league::{DEFAULT_TIE_BREAKS, LeagueTable, SwissScheduler};
use crate::r#match::{KnockoutRound, TieFormat, round_name};
use log::{info, warn};
use rand::Rng;
use rand::seq::SliceRandom;

pub struct ContinentalCompetition {
    pub format: ContinentalFormat,
    pub entrants: Vec<TeamId>,
}

impl ContinentalCompetition {
    pub fn new(format: ContinentalFormat, entrants: Vec<TeamId>) -> Self {
        ContinentalCompetition { format, entrants }
    }

    /// League phase, play-off round, two-legged knockout rounds and a single
    /// final at a neutral venue. Short fields clip the direct and play-off
    /// ranges to what exists.
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        teams: &mut TeamCollection,
        rng: &mut R,
    ) -> ContinentalResult {
        let name = &self.format.name;

        if self.entrants.is_empty() {
            warn!("{}: no entrants, skipped", name);
            return ContinentalResult::empty(name.clone());
        }

        info!("🌍 Simulating {} with {} teams", name, self.entrants.len());

        teams.enter_competition(&self.entrants);

        let schedule =
            SwissScheduler::new(self.format.league_phase_matches).generate(&self.entrants, rng);

        let mut table = LeagueTable::new(self.entrants.clone());
        table.play(schedule.matches, teams, rng);

        let order = table.order(teams, &DEFAULT_TIE_BREAKS);
        let standings = table.standings(&order, teams);

        let direct_end = self.format.direct_qualifiers.min(order.len());
        let play_off_end = (direct_end + self.format.play_off_places).min(order.len());

        if play_off_end - direct_end < self.format.play_off_places {
            warn!(
                "{}: only {} of {} play-off places filled",
                name,
                play_off_end - direct_end,
                self.format.play_off_places
            );
        }

        let mut remaining = order[..direct_end].to_vec();

        let play_off = (play_off_end > direct_end).then(|| {
            Self::play_off(
                &order[direct_end..play_off_end],
                self.format.play_off_draw,
                teams,
                rng,
            )
        });

        if let Some(play_off) = &play_off {
            remaining.extend(play_off.advancing());
        }

        let mut rounds = Vec::new();

        while remaining.len() > 2 {
            let round = KnockoutRound::draw_and_play(
                round_name(remaining.len()),
                remaining,
                TieFormat::TwoLegged,
                teams,
                rng,
            );

            remaining = round.advancing();
            rounds.push(round);
        }

        if remaining.len() == 2 {
            let final_round = KnockoutRound::play(
                round_name(2),
                &[(remaining[0], remaining[1])],
                Vec::new(),
                TieFormat::SingleMatch,
                teams,
                rng,
            );

            remaining = final_round.advancing();
            rounds.push(final_round);
        } else {
            warn!("{}: no final could be played", name);
        }

        let winner_id = remaining.first().copied();

        if let Some(winner_id) = winner_id {
            info!("🏆 {} winner: {}", name, teams.name(winner_id));
        }

        ContinentalResult {
            name: name.clone(),
            entrants: self.entrants.clone(),
            standings,
            shortfalls: schedule.shortfalls,
            play_off,
            rounds,
            winner_id,
        }
    }

    /// Two-legged play-off among the given league-phase places, listed best
    /// first. An odd field hands the middle (seeded) or the last drawn
    /// (random) team a bye.
    fn play_off<R: Rng + ?Sized>(
        places: &[TeamId],
        draw: PlayOffDraw,
        teams: &mut TeamCollection,
        rng: &mut R,
    ) -> KnockoutRound {
        let mut entrants = places.to_vec();

        if draw == PlayOffDraw::Random {
            entrants.shuffle(rng);
        }

        let half = entrants.len() / 2;

        let byes = if entrants.len() % 2 == 1 {
            vec![entrants.remove(match draw {
                PlayOffDraw::Random => entrants.len() - 1,
                PlayOffDraw::Seeded => half,
            })]
        } else {
            Vec::new()
        };

        let pairs: Vec<(TeamId, TeamId)> = match draw {
            PlayOffDraw::Random => (0..half)
                .map(|idx| (entrants[idx], entrants[idx + half]))
                .collect(),
            PlayOffDraw::Seeded => (0..half)
                .map(|idx| (entrants[idx], entrants[entrants.len() - 1 - idx]))
                .collect(),
        };

        KnockoutRound::play(
            String::from("Knockout play-offs"),
            &pairs,
            byes,
            TieFormat::TwoLegged,
            teams,
            rng,
        )
    }
}
