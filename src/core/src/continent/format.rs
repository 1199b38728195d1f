use serde::Serialize;

/// How the knockout play-off round after the league phase is paired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayOffDraw {
    /// Shuffled, then the first half meets the second half in draw order.
    Random,
    /// Best placed against worst placed, inwards.
    Seeded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinentalFormat {
    pub name: String,
    /// Entrants taken from the merged qualifier pool.
    pub capacity: usize,
    pub league_phase_matches: usize,
    /// League-phase places going straight to the knockout stage.
    pub direct_qualifiers: usize,
    /// League-phase places after the direct ones that enter the play-off.
    pub play_off_places: usize,
    pub play_off_draw: PlayOffDraw,
}

impl ContinentalFormat {
    pub fn new(
        name: String,
        capacity: usize,
        league_phase_matches: usize,
        direct_qualifiers: usize,
        play_off_places: usize,
        play_off_draw: PlayOffDraw,
    ) -> Self {
        ContinentalFormat {
            name,
            capacity,
            league_phase_matches,
            direct_qualifiers,
            play_off_places,
            play_off_draw,
        }
    }

    /// 36 teams, 8 league-phase matches, top 8 through, 9th to 24th drawn.
    pub fn champions_league() -> Self {
        Self::new(String::from("Champions League"), 36, 8, 8, 16, PlayOffDraw::Random)
    }

    pub fn europa_league() -> Self {
        Self::new(String::from("Europa League"), 16, 6, 4, 8, PlayOffDraw::Seeded)
    }

    pub fn conference_league() -> Self {
        Self::new(String::from("Conference League"), 16, 6, 4, 8, PlayOffDraw::Seeded)
    }
}
