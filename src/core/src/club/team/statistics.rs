use serde::Serialize;

/// Season record of one team inside one table.
///
/// Only `record` and `reset` mutate it, so `goal_difference` always equals
/// `goals_for - goals_against` and `points` always equals `3 * wins + draws`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TeamStatistics {
    played: u32,
    wins: u32,
    draws: u32,
    losses: u32,
    goals_for: u32,
    goals_against: u32,
    goal_difference: i32,
    points: u32,
}

impl TeamStatistics {
    pub fn record(&mut self, goals_scored: u32, goals_conceded: u32) {
        self.played += 1;
        self.goals_for += goals_scored;
        self.goals_against += goals_conceded;
        self.goal_difference = self.goals_for as i32 - self.goals_against as i32;

        if goals_scored > goals_conceded {
            self.wins += 1;
            self.points += 3;
        } else if goals_scored == goals_conceded {
            self.draws += 1;
            self.points += 1;
        } else {
            self.losses += 1;
        }
    }

    pub fn reset(&mut self) {
        *self = TeamStatistics::default();
    }

    pub fn played(&self) -> u32 {
        self.played
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }

    pub fn losses(&self) -> u32 {
        self.losses
    }

    pub fn goals_for(&self) -> u32 {
        self.goals_for
    }

    pub fn goals_against(&self) -> u32 {
        self.goals_against
    }

    pub fn goal_difference(&self) -> i32 {
        self.goal_difference
    }

    pub fn points(&self) -> u32 {
        self.points
    }
}
