use crate::club::{TeamCollection, TeamId};
use log::info;
use std::collections::HashSet;

/// All domestic qualifiers merged and ranked by rating. The rank alone
/// decides the competition a team enters; its domestic tier does not.
pub struct ContinentalPool {
    ranked: Vec<TeamId>,
}

impl ContinentalPool {
    pub fn new<I: IntoIterator<Item = TeamId>>(qualifiers: I, teams: &TeamCollection) -> Self {
        let mut seen = HashSet::new();

        let mut ranked: Vec<TeamId> = qualifiers
            .into_iter()
            .filter(|team_id| seen.insert(*team_id))
            .collect();

        ranked.sort_by(|&a, &b| {
            let (team_a, team_b) = (teams.by_id(a), teams.by_id(b));

            team_b
                .elo
                .total_cmp(&team_a.elo)
                .then_with(|| team_a.name.cmp(&team_b.name))
        });

        ContinentalPool { ranked }
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn ranked(&self) -> &[TeamId] {
        &self.ranked
    }

    /// Consecutive slices of the ranking, one per capacity. Teams beyond the
    /// total capacity are left out.
    pub fn distribute(&self, capacities: &[usize]) -> Vec<Vec<TeamId>> {
        let mut remaining = self.ranked.as_slice();

        let distribution: Vec<Vec<TeamId>> = capacities
            .iter()
            .map(|&capacity| {
                let (taken, rest) = remaining.split_at(capacity.min(remaining.len()));
                remaining = rest;
                taken.to_vec()
            })
            .collect();

        info!(
            "continental pool of {} teams split into {:?}, {} left out",
            self.ranked.len(),
            distribution.iter().map(Vec::len).collect::<Vec<_>>(),
            remaining.len()
        );

        distribution
    }
}
