use crate::club::{TeamCollection, TeamId};
use crate::error::SeasonError;
use crate::league::cup::{CupResult, DomesticCup};
use crate::league::format::{ConferenceRoute, LeagueFormat, LeagueSettings};
use crate::league::qualification::Qualifiers;
use crate::league::result::{DeciderResult, LeagueResult};
use crate::league::schedule::round_robin;
use crate::league::table::LeagueTable;
use crate::r#match::{FootballEngine, KnockoutRound, TieFormat};
use log::{debug, info};
use rand::Rng;
use rand::seq::SliceRandom;

#[derive(Debug, Clone)]
pub struct DomesticLeague {
    pub id: u32,
    pub name: String,
    pub slug: String,
    pub team_ids: Vec<TeamId>,
    pub settings: LeagueSettings,
}

/// Final order of a league together with the section each position belongs
/// to after a split.
struct FinalOrder {
    order: Vec<TeamId>,
    sections: Vec<(String, Vec<TeamId>)>,
}

impl DomesticLeague {
    pub fn new(
        id: u32,
        name: String,
        slug: String,
        team_ids: Vec<TeamId>,
        settings: LeagueSettings,
    ) -> Self {
        DomesticLeague {
            id,
            name,
            slug,
            team_ids,
            settings,
        }
    }

    pub fn validate(&self) -> Result<(), SeasonError> {
        self.settings.validate(&self.name, self.team_ids.len())
    }

    /// Cups first, then the league programme, deciders, the tertiary-tier
    /// route and finally the qualification cascade.
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        teams: &mut TeamCollection,
        rng: &mut R,
    ) -> Result<LeagueResult, SeasonError> {
        self.validate()?;

        info!("⚽ Simulating league: {} ({} teams)", self.name, self.team_ids.len());

        teams.enter_competition(&self.team_ids);

        let cups: Vec<CupResult> = self
            .settings
            .cups
            .iter()
            .map(|name| DomesticCup::new(name.clone()).play(&self.team_ids, teams, rng))
            .collect();

        let mut table = LeagueTable::new(self.team_ids.clone());
        let FinalOrder {
            mut order,
            sections,
        } = self.play_league(&mut table, teams, rng);

        let deciders = self.play_deciders(&table, &mut order, teams, rng);

        let mut play_off = Vec::new();
        let route_winner = match &self.settings.qualification.conference_route {
            Some(ConferenceRoute::CupWinner(index)) => {
                cups.get(*index).and_then(|cup| cup.winner_id)
            }
            Some(ConferenceRoute::EuropeanPlayOff { from, to }) => {
                play_off = Self::play_european_play_off(&order[from - 1..*to], teams, rng);
                play_off
                    .last()
                    .and_then(|round| round.advancing().first().copied())
            }
            Some(ConferenceRoute::SectionWinner(index)) => sections
                .get(*index)
                .and_then(|(_, members)| members.first().copied()),
            None => None,
        };

        let cup_winner = cups.first().and_then(|cup| cup.winner_id);
        let qualifiers = Qualifiers::resolve(
            &order,
            &self.settings.qualification,
            cup_winner,
            route_winner,
        );

        let mut standings = table.standings(&order, teams);
        for row in standings.iter_mut() {
            row.section = sections
                .iter()
                .find(|(_, members)| members.contains(&row.team_id))
                .map(|(name, _)| name.clone());
        }

        if let Some(champion) = standings.first() {
            info!("🏆 {} champions: {}", self.name, champion.team_name);
        }

        Ok(LeagueResult {
            league_id: self.id,
            name: self.name.clone(),
            standings,
            cups,
            deciders,
            play_off,
            qualifiers,
        })
    }

    fn play_league<R: Rng + ?Sized>(
        &self,
        table: &mut LeagueTable,
        teams: &mut TeamCollection,
        rng: &mut R,
    ) -> FinalOrder {
        let tie_breaks = &self.settings.tie_breaks;

        match &self.settings.format {
            LeagueFormat::DoubleRoundRobin => {
                let mut fixtures = round_robin(&self.team_ids, 2);
                fixtures.shuffle(rng);

                table.play(fixtures, teams, rng);

                FinalOrder {
                    order: table.order(teams, tie_breaks),
                    sections: Vec::new(),
                }
            }
            LeagueFormat::Split {
                rounds,
                sections,
                halve_points,
            } => {
                let mut fixtures = round_robin(&self.team_ids, *rounds);
                fixtures.shuffle(rng);

                table.play(fixtures, teams, rng);

                let opening_order = table.order(teams, tie_breaks);

                let mut start = 0;
                let groups: Vec<(&str, u8, Vec<TeamId>)> = sections
                    .iter()
                    .map(|section| {
                        let members = opening_order[start..start + section.size].to_vec();
                        start += section.size;
                        (section.name.as_str(), section.rounds, members)
                    })
                    .collect();

                if *halve_points {
                    for (_, rounds, members) in &groups {
                        if *rounds > 0 {
                            table.halve_points(teams, members);
                        }
                    }
                }

                for (name, rounds, members) in &groups {
                    if *rounds == 0 {
                        continue;
                    }

                    debug!("{}: {} plays {} more rounds", self.name, name, rounds);

                    let mut fixtures = round_robin(members, *rounds);
                    fixtures.shuffle(rng);

                    table.play(fixtures, teams, rng);
                }

                let sections: Vec<(String, Vec<TeamId>)> = groups
                    .into_iter()
                    .map(|(name, _, members)| {
                        (name.to_string(), table.order_of(&members, teams, tie_breaks))
                    })
                    .collect();

                FinalOrder {
                    order: sections
                        .iter()
                        .flat_map(|(_, members)| members.iter().copied())
                        .collect(),
                    sections,
                }
            }
        }
    }

    /// Teams level on table points at a decider position meet once at a
    /// neutral venue; the winner takes the higher place.
    fn play_deciders<R: Rng + ?Sized>(
        &self,
        table: &LeagueTable,
        order: &mut [TeamId],
        teams: &mut TeamCollection,
        rng: &mut R,
    ) -> Vec<DeciderResult> {
        let mut deciders = Vec::new();

        for &position in &self.settings.deciders {
            let (upper, lower) = (order[position - 1], order[position]);

            if table.points(teams, upper) != table.points(teams, lower) {
                continue;
            }

            info!(
                "{}: play-off for position {} between {} and {}",
                self.name,
                position,
                teams.name(upper),
                teams.name(lower)
            );

            let tie = FootballEngine::play_knockout_match(teams, upper, lower, rng);

            if tie.winner_id == lower {
                order.swap(position - 1, position);
            }

            deciders.push(DeciderResult { position, tie });
        }

        deciders
    }

    /// Seeded two-legged bracket: best against worst, winners meet in the
    /// same pattern until one is left.
    fn play_european_play_off<R: Rng + ?Sized>(
        entrants: &[TeamId],
        teams: &mut TeamCollection,
        rng: &mut R,
    ) -> Vec<KnockoutRound> {
        let mut rounds = Vec::new();
        let mut remaining = entrants.to_vec();
        let mut round_number = 1;

        while remaining.len() > 1 {
            let half = remaining.len() / 2;
            let pairs: Vec<(TeamId, TeamId)> = (0..half)
                .map(|idx| (remaining[idx], remaining[remaining.len() - 1 - idx]))
                .collect();

            let round = KnockoutRound::play(
                format!("European play-off round {}", round_number),
                &pairs,
                Vec::new(),
                TieFormat::TwoLegged,
                teams,
                rng,
            );

            remaining = round.advancing();
            rounds.push(round);
            round_number += 1;
        }

        rounds
    }
}
