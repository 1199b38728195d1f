use crate::error::SeasonError;
use serde::Serialize;

/// Table ordering criteria applied after table points. The team name is
/// always the last resort and is not listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TieBreak {
    /// Mini-table of the matches played among every team level on points.
    HeadToHead,
    GoalDifference,
    GoalsFor,
    Wins,
}

pub const DEFAULT_TIE_BREAKS: [TieBreak; 2] = [TieBreak::GoalDifference, TieBreak::GoalsFor];

/// A consecutive block of the table after a split. `rounds` is how many times
/// each pair inside the section meets again; zero means the section is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSection {
    pub name: String,
    pub size: usize,
    pub rounds: u8,
}

impl SplitSection {
    pub fn new(name: String, size: usize, rounds: u8) -> Self {
        SplitSection { name, size, rounds }
    }

    pub fn plays(&self) -> bool {
        self.rounds > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeagueFormat {
    DoubleRoundRobin,
    Split {
        rounds: u8,
        sections: Vec<SplitSection>,
        halve_points: bool,
    },
}

/// How a league can hand out its tertiary slot besides the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConferenceRoute {
    /// Winner of the cup at this index of `LeagueSettings::cups`.
    CupWinner(usize),
    /// Two-legged seeded bracket between the table positions `from..=to`.
    EuropeanPlayOff { from: usize, to: usize },
    /// Top team of the split section at this index.
    SectionWinner(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualificationRules {
    pub champions: usize,
    pub europa: usize,
    pub conference: usize,
    pub conference_route: Option<ConferenceRoute>,
}

impl QualificationRules {
    pub fn new(champions: usize, europa: usize, conference: usize) -> Self {
        QualificationRules {
            champions,
            europa,
            conference,
            conference_route: None,
        }
    }

    pub fn with_conference_route(mut self, route: ConferenceRoute) -> Self {
        self.conference_route = Some(route);
        self
    }

    pub fn total(&self) -> usize {
        self.champions + self.europa + self.conference
    }
}

/// Everything that makes one domestic competition different from another.
/// The first cup feeds the secondary tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueSettings {
    pub format: LeagueFormat,
    pub tie_breaks: Vec<TieBreak>,
    pub cups: Vec<String>,
    /// One-based positions decided by a single match when level on points
    /// with the position below.
    pub deciders: Vec<usize>,
    pub qualification: QualificationRules,
}

impl LeagueSettings {
    pub fn new(format: LeagueFormat, qualification: QualificationRules) -> Self {
        LeagueSettings {
            format,
            tie_breaks: DEFAULT_TIE_BREAKS.to_vec(),
            cups: Vec::new(),
            deciders: Vec::new(),
            qualification,
        }
    }

    pub fn validate(&self, league: &str, teams: usize) -> Result<(), SeasonError> {
        let invalid = |reason: String| SeasonError::InvalidFormat {
            league: league.to_string(),
            reason,
        };

        let required = self.qualification.total().max(2);
        if teams < required {
            return Err(SeasonError::RosterTooSmall {
                league: league.to_string(),
                teams,
                required,
            });
        }

        if let LeagueFormat::Split {
            rounds, sections, ..
        } = &self.format
        {
            if !(1..=3).contains(rounds) {
                return Err(invalid(format!("{} opening meetings per pair", rounds)));
            }

            let split_size: usize = sections.iter().map(|section| section.size).sum();
            if split_size != teams {
                return Err(invalid(format!(
                    "sections hold {} teams, roster has {}",
                    split_size, teams
                )));
            }

            if let Some(section) = sections.iter().find(|s| s.size == 0 || s.rounds > 3) {
                return Err(invalid(format!("section `{}` is malformed", section.name)));
            }
        }

        if let Some(position) = self
            .deciders
            .iter()
            .find(|&&position| position == 0 || position >= teams)
        {
            return Err(invalid(format!("no decider possible at position {}", position)));
        }

        match &self.qualification.conference_route {
            Some(ConferenceRoute::CupWinner(index)) if *index >= self.cups.len() => {
                Err(invalid(format!("no cup at index {}", index)))
            }
            Some(ConferenceRoute::EuropeanPlayOff { from, to }) => {
                let entrants = (to + 1).saturating_sub(*from);

                if *from == 0 || *to > teams || entrants < 2 || !entrants.is_power_of_two() {
                    Err(invalid(format!("play-off positions {}..={} out of shape", from, to)))
                } else {
                    Ok(())
                }
            }
            Some(ConferenceRoute::SectionWinner(index)) => match &self.format {
                LeagueFormat::Split { sections, .. } if *index < sections.len() => Ok(()),
                _ => Err(invalid(format!("no split section at index {}", index))),
            },
            _ => Ok(()),
        }
    }
}
