use crate::DatabaseEntity;
use crate::error::DatabaseError;
use crate::loaders::{
    ConferenceRouteEntity, ContinentalEntity, LeagueEntity, LeagueFormatEntity, PlayOffDrawEntity,
    TieBreakEntity,
};
use log::debug;
use season_core::{
    ConferenceRoute, ContinentalFormat, DomesticLeague, LeagueFormat, LeagueSettings, PlayOffDraw,
    QualificationRules, SimulatorData, SplitSection, TeamCollection, TieBreak,
};

/// Rating every roster offset is applied to.
pub const BASE_ELO: f64 = 1500.0;

pub struct DatabaseGenerator;

impl DatabaseGenerator {
    pub fn generate(data: &DatabaseEntity) -> Result<SimulatorData, DatabaseError> {
        let mut teams = TeamCollection::new();

        let leagues = data
            .leagues
            .iter()
            .map(|league| Self::generate_league(league, &mut teams))
            .collect::<Result<Vec<_>, _>>()?;

        let continental = data.continental.iter().map(Self::generate_continental).collect();

        debug!("generated {} leagues with {} teams", leagues.len(), teams.len());

        Ok(SimulatorData::new(teams, leagues, continental))
    }

    fn generate_league(
        league: &LeagueEntity,
        teams: &mut TeamCollection,
    ) -> Result<DomesticLeague, DatabaseError> {
        let team_ids = league
            .teams
            .iter()
            .map(|team| {
                teams.add(
                    &team.name,
                    team.attack,
                    team.defence,
                    BASE_ELO + team.elo_offset,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        let format = match &league.format {
            LeagueFormatEntity::DoubleRoundRobin => LeagueFormat::DoubleRoundRobin,
            LeagueFormatEntity::Split {
                rounds,
                halve_points,
                sections,
            } => LeagueFormat::Split {
                rounds: *rounds,
                halve_points: *halve_points,
                sections: sections
                    .iter()
                    .map(|section| {
                        SplitSection::new(section.name.clone(), section.size, section.rounds)
                    })
                    .collect(),
            },
        };

        let mut qualification = QualificationRules::new(
            league.qualification.champions,
            league.qualification.europa,
            league.qualification.conference,
        );

        if let Some(route) = &league.qualification.conference_route {
            qualification = qualification.with_conference_route(match route {
                ConferenceRouteEntity::CupWinner { cup } => ConferenceRoute::CupWinner(*cup),
                ConferenceRouteEntity::EuropeanPlayOff { from, to } => {
                    ConferenceRoute::EuropeanPlayOff {
                        from: *from,
                        to: *to,
                    }
                }
                ConferenceRouteEntity::SectionWinner { section } => {
                    ConferenceRoute::SectionWinner(*section)
                }
            });
        }

        let mut settings = LeagueSettings::new(format, qualification);
        settings.cups = league.cups.clone();
        settings.deciders = league.deciders.clone();

        if let Some(tie_breaks) = &league.tie_breaks {
            settings.tie_breaks = tie_breaks
                .iter()
                .map(|tie_break| Self::tie_break(*tie_break))
                .collect();
        }

        Ok(DomesticLeague::new(
            league.id,
            league.name.clone(),
            league.slug.clone(),
            team_ids,
            settings,
        ))
    }

    fn tie_break(entity: TieBreakEntity) -> TieBreak {
        match entity {
            TieBreakEntity::HeadToHead => TieBreak::HeadToHead,
            TieBreakEntity::GoalDifference => TieBreak::GoalDifference,
            TieBreakEntity::GoalsFor => TieBreak::GoalsFor,
            TieBreakEntity::Wins => TieBreak::Wins,
        }
    }

    fn generate_continental(entity: &ContinentalEntity) -> ContinentalFormat {
        ContinentalFormat::new(
            entity.name.clone(),
            entity.capacity,
            entity.league_phase_matches,
            entity.direct_qualifiers,
            entity.play_off_places,
            match entity.play_off_draw {
                PlayOffDrawEntity::Random => PlayOffDraw::Random,
                PlayOffDrawEntity::Seeded => PlayOffDraw::Seeded,
            },
        )
    }
}
