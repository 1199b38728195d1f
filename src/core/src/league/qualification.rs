use crate::club::TeamId;
use crate::league::format::QualificationRules;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ContinentalTier {
    Champions,
    Europa,
    Conference,
}

/// A league's continental entrants per tier, in award order. A team appears
/// in at most one tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Qualifiers {
    pub champions: Vec<TeamId>,
    pub europa: Vec<TeamId>,
    pub conference: Vec<TeamId>,
}

impl Qualifiers {
    /// Walks the final table order: premier tier from the top, the cup winner
    /// into the secondary tier, the secondary tier topped up from the table,
    /// then the tertiary route winner and the tertiary tier topped up from the
    /// table. Any award to an already qualified team passes down the table.
    pub fn resolve(
        order: &[TeamId],
        rules: &QualificationRules,
        cup_winner: Option<TeamId>,
        conference_route_winner: Option<TeamId>,
    ) -> Self {
        let mut qualifiers = Qualifiers::default();
        let mut qualified: HashSet<TeamId> = HashSet::new();

        for &team_id in order.iter().take(rules.champions) {
            qualified.insert(team_id);
            qualifiers.champions.push(team_id);
        }

        let mut cursor = qualifiers.champions.len();

        if rules.europa > 0 {
            if let Some(winner) = cup_winner.filter(|winner| !qualified.contains(winner)) {
                qualified.insert(winner);
                qualifiers.europa.push(winner);
            }
        }

        Self::fill_from_table(
            order,
            &mut cursor,
            &mut qualified,
            &mut qualifiers.europa,
            rules.europa,
        );

        if rules.conference > 0 {
            let route_winner = conference_route_winner.filter(|winner| !qualified.contains(winner));

            if let Some(winner) = route_winner {
                qualified.insert(winner);
                qualifiers.conference.push(winner);
            }
        }

        Self::fill_from_table(
            order,
            &mut cursor,
            &mut qualified,
            &mut qualifiers.conference,
            rules.conference,
        );

        qualifiers
    }

    fn fill_from_table(
        order: &[TeamId],
        cursor: &mut usize,
        qualified: &mut HashSet<TeamId>,
        tier: &mut Vec<TeamId>,
        quota: usize,
    ) {
        while tier.len() < quota && *cursor < order.len() {
            let team_id = order[*cursor];

            if qualified.insert(team_id) {
                tier.push(team_id);
            }

            *cursor += 1;
        }
    }

    pub fn tier_of(&self, team_id: TeamId) -> Option<ContinentalTier> {
        if self.champions.contains(&team_id) {
            Some(ContinentalTier::Champions)
        } else if self.europa.contains(&team_id) {
            Some(ContinentalTier::Europa)
        } else if self.conference.contains(&team_id) {
            Some(ContinentalTier::Conference)
        } else {
            None
        }
    }

    /// Every qualifier, premier tier first.
    pub fn iter(&self) -> impl Iterator<Item = TeamId> + '_ {
        self.champions
            .iter()
            .chain(self.europa.iter())
            .chain(self.conference.iter())
            .copied()
    }

    pub fn len(&self) -> usize {
        self.champions.len() + self.europa.len() + self.conference.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
