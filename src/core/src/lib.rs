pub mod simulator;
pub use simulator::*;

pub mod club;
pub mod continent;
pub mod error;
pub mod league;
pub mod r#match;
pub mod settings;

pub mod utils;

pub use club::{Team, TeamCollection, TeamId, TeamStatistics};
pub use continent::{
    ContinentalCompetition, ContinentalFormat, ContinentalPool, ContinentalResult, PlayOffDraw,
};
pub use error::SeasonError;
pub use league::{
    ConferenceRoute, ContinentalTier, DomesticCup, DomesticLeague, LeagueFormat, LeagueResult,
    LeagueSettings, LeagueTable, QualificationRules, Qualifiers, SplitSection, StandingRow,
    TieBreak,
};
pub use r#match::{
    EloRating, FootballEngine, KnockoutRound, Match, PenaltyShootout, Score, TieFormat, TieResult,
    Venue,
};
pub use settings::SimulationSettings;
pub use utils::*;
