use crate::club::TeamId;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    pub home_goals: u32,
    pub away_goals: u32,
}

impl Score {
    pub fn new(home_goals: u32, away_goals: u32) -> Self {
        Score {
            home_goals,
            away_goals,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.home_goals == self.away_goals
    }
}

/// A scheduled fixture. The score stays empty until the match is played and
/// is written exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    score: Option<Score>,
}

impl Match {
    pub fn new(home_team_id: TeamId, away_team_id: TeamId) -> Self {
        Match {
            home_team_id,
            away_team_id,
            score: None,
        }
    }

    pub fn score(&self) -> Option<Score> {
        self.score
    }

    pub fn is_played(&self) -> bool {
        self.score.is_some()
    }

    pub fn involves(&self, team_id: TeamId) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    pub(crate) fn set_score(&mut self, score: Score) {
        debug_assert!(self.score.is_none(), "match played twice");
        self.score = Some(score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_match_is_unplayed() {
        let fixture = Match::new(TeamId(0), TeamId(1));

        assert!(!fixture.is_played());
        assert_eq!(fixture.score(), None);
        assert!(fixture.involves(TeamId(1)));
        assert!(!fixture.involves(TeamId(2)));
    }

    #[test]
    fn test_set_score() {
        let mut fixture = Match::new(TeamId(0), TeamId(1));

        fixture.set_score(Score::new(2, 2));

        assert!(fixture.is_played());
        assert!(fixture.score().unwrap().is_draw());
    }
}
