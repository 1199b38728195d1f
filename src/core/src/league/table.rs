use crate::club::{TeamCollection, TeamId};
use crate::league::format::TieBreak;
use crate::r#match::{FootballEngine, Match};
use rand::Rng;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct HeadToHeadRecord {
    points: u32,
    goals_for: u32,
    goals_against: u32,
}

impl HeadToHeadRecord {
    fn record(&mut self, scored: u32, conceded: u32) {
        self.goals_for += scored;
        self.goals_against += conceded;
        self.points += match scored.cmp(&conceded) {
            Ordering::Greater => 3,
            Ordering::Equal => 1,
            Ordering::Less => 0,
        };
    }

    fn goal_difference(&self) -> i32 {
        self.goals_for as i32 - self.goals_against as i32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingRow {
    pub position: usize,
    pub team_id: TeamId,
    pub team_name: String,
    pub section: Option<String>,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub points: i32,
    pub elo: f64,
}

/// Table of one competition: its members, the fixtures they played and any
/// points adjustment. Team stat blocks stay untouched by adjustments; the
/// table ranks by stat points plus adjustment.
#[derive(Debug, Clone, Default)]
pub struct LeagueTable {
    team_ids: Vec<TeamId>,
    adjustments: HashMap<TeamId, i32>,
    matches: Vec<Match>,
}

impl LeagueTable {
    pub fn new(team_ids: Vec<TeamId>) -> Self {
        LeagueTable {
            team_ids,
            adjustments: HashMap::new(),
            matches: Vec::new(),
        }
    }

    pub fn team_ids(&self) -> &[TeamId] {
        &self.team_ids
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn play<R: Rng + ?Sized>(
        &mut self,
        fixtures: Vec<Match>,
        teams: &mut TeamCollection,
        rng: &mut R,
    ) {
        self.matches.reserve(fixtures.len());

        for mut fixture in fixtures {
            FootballEngine::play(teams, &mut fixture, rng);
            self.matches.push(fixture);
        }
    }

    pub fn adjustment(&self, team_id: TeamId) -> i32 {
        self.adjustments.get(&team_id).copied().unwrap_or_default()
    }

    pub fn points(&self, teams: &TeamCollection, team_id: TeamId) -> i32 {
        teams.by_id(team_id).statistics().points() as i32 + self.adjustment(team_id)
    }

    /// Halves the current table points of `team_ids`, rounding up.
    pub fn halve_points(&mut self, teams: &TeamCollection, team_ids: &[TeamId]) {
        for &team_id in team_ids {
            let current = self.points(teams, team_id);
            let halved = (current + 1).div_euclid(2);

            *self.adjustments.entry(team_id).or_default() += halved - current;
        }
    }

    pub fn order(&self, teams: &TeamCollection, tie_breaks: &[TieBreak]) -> Vec<TeamId> {
        self.order_of(&self.team_ids, teams, tie_breaks)
    }

    /// Orders a subset of the table. Head-to-head groups are always formed
    /// over the whole table, not just the subset.
    pub fn order_of(
        &self,
        team_ids: &[TeamId],
        teams: &TeamCollection,
        tie_breaks: &[TieBreak],
    ) -> Vec<TeamId> {
        let points: HashMap<TeamId, i32> = self
            .team_ids
            .iter()
            .map(|&team_id| (team_id, self.points(teams, team_id)))
            .collect();

        let head_to_head = if tie_breaks.contains(&TieBreak::HeadToHead) {
            self.head_to_head(&points)
        } else {
            HashMap::new()
        };

        let mut ordered = team_ids.to_vec();

        ordered.sort_by(|&a, &b| {
            let (points_a, points_b) = (
                points.get(&a).copied().unwrap_or_default(),
                points.get(&b).copied().unwrap_or_default(),
            );

            let (stats_a, stats_b) = (teams.by_id(a).statistics(), teams.by_id(b).statistics());

            tie_breaks
                .iter()
                .fold(points_b.cmp(&points_a), |ordering, tie_break| {
                    ordering.then_with(|| match tie_break {
                        TieBreak::HeadToHead => {
                            let record_a = head_to_head.get(&a).copied().unwrap_or_default();
                            let record_b = head_to_head.get(&b).copied().unwrap_or_default();

                            record_b
                                .points
                                .cmp(&record_a.points)
                                .then_with(|| {
                                    record_b.goal_difference().cmp(&record_a.goal_difference())
                                })
                                .then_with(|| record_b.goals_for.cmp(&record_a.goals_for))
                        }
                        TieBreak::GoalDifference => {
                            stats_b.goal_difference().cmp(&stats_a.goal_difference())
                        }
                        TieBreak::GoalsFor => stats_b.goals_for().cmp(&stats_a.goals_for()),
                        TieBreak::Wins => stats_b.wins().cmp(&stats_a.wins()),
                    })
                })
                .then_with(|| teams.name(a).cmp(teams.name(b)))
                .then_with(|| a.cmp(&b))
        });

        ordered
    }

    /// Mini-table per points level: only matches whose two sides currently
    /// share the same table points count.
    fn head_to_head(&self, points: &HashMap<TeamId, i32>) -> HashMap<TeamId, HeadToHeadRecord> {
        let mut records: HashMap<TeamId, HeadToHeadRecord> = HashMap::new();

        for fixture in &self.matches {
            let Some(score) = fixture.score() else {
                continue;
            };

            let (Some(home_points), Some(away_points)) =
                (points.get(&fixture.home_team_id), points.get(&fixture.away_team_id))
            else {
                continue;
            };

            if home_points != away_points {
                continue;
            }

            records
                .entry(fixture.home_team_id)
                .or_default()
                .record(score.home_goals, score.away_goals);
            records
                .entry(fixture.away_team_id)
                .or_default()
                .record(score.away_goals, score.home_goals);
        }

        records
    }

    pub fn standings(&self, order: &[TeamId], teams: &TeamCollection) -> Vec<StandingRow> {
        order
            .iter()
            .enumerate()
            .map(|(idx, &team_id)| {
                let team = teams.by_id(team_id);
                let stats = team.statistics();

                StandingRow {
                    position: idx + 1,
                    team_id,
                    team_name: team.name.clone(),
                    section: None,
                    played: stats.played(),
                    wins: stats.wins(),
                    draws: stats.draws(),
                    losses: stats.losses(),
                    goals_for: stats.goals_for(),
                    goals_against: stats.goals_against(),
                    goal_difference: stats.goal_difference(),
                    points: self.points(teams, team_id),
                    elo: team.elo,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::format::DEFAULT_TIE_BREAKS;
    use crate::r#match::Score;

    fn setup(names: &[&str]) -> (TeamCollection, LeagueTable, Vec<TeamId>) {
        let mut teams = TeamCollection::new();
        let ids: Vec<TeamId> = names
            .iter()
            .map(|name| teams.add(name, 75, 75, 1500.0).unwrap())
            .collect();

        (teams, LeagueTable::new(ids.clone()), ids)
    }

    fn result(
        table: &mut LeagueTable,
        teams: &mut TeamCollection,
        home: TeamId,
        away: TeamId,
        score: (u32, u32),
    ) {
        teams.by_id_mut(home).record_match_result(score.0, score.1);
        teams.by_id_mut(away).record_match_result(score.1, score.0);

        let mut fixture = Match::new(home, away);
        fixture.set_score(Score::new(score.0, score.1));
        table.matches.push(fixture);
    }

    /// A, B and C all finish on 7 points. Among themselves A beat B and drew
    /// with C, B beat C; against the rest C has the best goal difference and
    /// A the worst.
    fn three_way_tie() -> (TeamCollection, LeagueTable, Vec<TeamId>) {
        let (mut teams, mut table, ids) = setup(&["A", "B", "C", "D", "E"]);
        let (a, b, c, d, e) = (ids[0], ids[1], ids[2], ids[3], ids[4]);

        result(&mut table, &mut teams, a, b, (1, 0));
        result(&mut table, &mut teams, a, c, (0, 0));
        result(&mut table, &mut teams, b, c, (2, 1));

        result(&mut table, &mut teams, a, d, (1, 0));
        result(&mut table, &mut teams, e, a, (6, 0));
        result(&mut table, &mut teams, b, d, (5, 0));
        result(&mut table, &mut teams, b, e, (3, 3));
        result(&mut table, &mut teams, c, d, (4, 0));
        result(&mut table, &mut teams, c, e, (4, 0));

        (teams, table, ids)
    }

    #[test]
    fn test_head_to_head_decides_three_way_tie() {
        let (teams, table, ids) = three_way_tie();

        for &id in &ids[..3] {
            assert_eq!(table.points(&teams, id), 7);
        }

        let chain = [TieBreak::HeadToHead, TieBreak::GoalDifference, TieBreak::GoalsFor];
        let order = table.order(&teams, &chain);

        assert_eq!(&order[..3], &[ids[0], ids[1], ids[2]]);
        assert_eq!(order[3], ids[4]);
        assert_eq!(order[4], ids[3]);
    }

    #[test]
    fn test_default_chain_uses_overall_goal_difference() {
        let (teams, table, ids) = three_way_tie();

        let order = table.order(&teams, &DEFAULT_TIE_BREAKS);

        assert_eq!(&order[..3], &[ids[2], ids[1], ids[0]]);
    }

    #[test]
    fn test_order_is_total_and_stable() {
        let (mut teams, mut table, ids) = setup(&["Delta", "Alpha", "Charlie", "Bravo"]);

        result(&mut table, &mut teams, ids[0], ids[1], (1, 1));
        result(&mut table, &mut teams, ids[2], ids[3], (1, 1));

        let first = table.order(&teams, &DEFAULT_TIE_BREAKS);
        let again = table.order(&teams, &DEFAULT_TIE_BREAKS);

        let mut reversed: Vec<TeamId> = ids.iter().rev().copied().collect();
        reversed = table.order_of(&reversed, &teams, &DEFAULT_TIE_BREAKS);

        assert_eq!(first, again);
        assert_eq!(first, reversed);

        let names: Vec<&str> = first.iter().map(|id| teams.name(*id)).collect();
        assert_eq!(names, vec!["Alpha", "Bravo", "Charlie", "Delta"]);
    }

    #[test]
    fn test_wins_break_ties_before_goals() {
        let (mut teams, mut table, ids) = setup(&["Draws", "Wins", "Other"]);

        // Draws: three draws, Wins: one win and two losses, 3 points each
        result(&mut table, &mut teams, ids[0], ids[2], (2, 2));
        result(&mut table, &mut teams, ids[0], ids[2], (2, 2));
        result(&mut table, &mut teams, ids[0], ids[2], (2, 2));
        result(&mut table, &mut teams, ids[1], ids[2], (1, 0));
        result(&mut table, &mut teams, ids[1], ids[2], (0, 1));
        result(&mut table, &mut teams, ids[1], ids[2], (0, 1));

        let order = table.order_of(&ids[..2], &teams, &[TieBreak::Wins, TieBreak::GoalDifference]);
        assert_eq!(order, vec![ids[1], ids[0]]);

        let order = table.order_of(&ids[..2], &teams, &DEFAULT_TIE_BREAKS);
        assert_eq!(order, vec![ids[0], ids[1]]);
    }

    #[test]
    fn test_halving_rounds_up_and_keeps_stats() {
        let (mut teams, mut table, ids) = setup(&["Odd", "Even", "Filler"]);

        result(&mut table, &mut teams, ids[0], ids[2], (1, 0));
        result(&mut table, &mut teams, ids[0], ids[2], (1, 0));
        result(&mut table, &mut teams, ids[0], ids[2], (1, 1));
        result(&mut table, &mut teams, ids[1], ids[2], (1, 0));
        result(&mut table, &mut teams, ids[1], ids[2], (1, 0));

        table.halve_points(&teams, &ids[..2]);

        assert_eq!(table.points(&teams, ids[0]), 4);
        assert_eq!(table.points(&teams, ids[1]), 3);
        assert_eq!(teams.by_id(ids[0]).statistics().points(), 7);

        let rows = table.standings(&table.order(&teams, &DEFAULT_TIE_BREAKS), &teams);
        assert_eq!(rows[0].team_name, "Odd");
        assert_eq!(rows[0].points, 4);
        assert_eq!(rows[0].position, 1);
    }
}
