use crate::club::team::team::{Team, TeamId};
use crate::error::SeasonError;
use std::collections::HashMap;

/// Owns every team of the run. Leagues, cups and continental competitions
/// refer to teams through `TeamId` handles issued here.
#[derive(Debug, Default)]
pub struct TeamCollection {
    teams: Vec<Team>,
    by_name: HashMap<String, TeamId>,
}

impl TeamCollection {
    pub fn new() -> Self {
        TeamCollection {
            teams: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    pub fn add(
        &mut self,
        name: &str,
        attack: u16,
        defence: u16,
        elo: f64,
    ) -> Result<TeamId, SeasonError> {
        if self.by_name.contains_key(name) {
            return Err(SeasonError::DuplicateTeam(name.to_string()));
        }

        let id = TeamId(self.teams.len() as u32);

        self.teams
            .push(Team::new(id, name.to_string(), attack, defence, elo));
        self.by_name.insert(name.to_string(), id);

        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn by_id(&self, id: TeamId) -> &Team {
        &self.teams[id.0 as usize]
    }

    pub fn by_id_mut(&mut self, id: TeamId) -> &mut Team {
        &mut self.teams[id.0 as usize]
    }

    pub fn find_by_name(&self, name: &str) -> Result<TeamId, SeasonError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| SeasonError::UnknownTeam(name.to_string()))
    }

    pub fn name(&self, id: TeamId) -> &str {
        &self.by_id(id).name
    }

    pub fn iter(&self) -> impl Iterator<Item = &Team> {
        self.teams.iter()
    }

    /// Mutable access to both sides of a fixture at once.
    pub fn pair_mut(&mut self, first: TeamId, second: TeamId) -> (&mut Team, &mut Team) {
        assert_ne!(first, second, "a team cannot face itself");

        let (a, b) = (first.0 as usize, second.0 as usize);

        if a < b {
            let (left, right) = self.teams.split_at_mut(b);
            (&mut left[a], &mut right[0])
        } else {
            let (left, right) = self.teams.split_at_mut(a);
            (&mut right[0], &mut left[b])
        }
    }

    pub fn enter_competition(&mut self, ids: &[TeamId]) {
        for id in ids {
            self.by_id_mut(*id).enter_competition();
        }
    }
}
