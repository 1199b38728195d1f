use crate::club::TeamId;
use crate::r#match::Match;
use itertools::Itertools;
use log::warn;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Every pair of `teams` meets `meetings` times. Home advantage alternates
/// between meetings, and pairs are staggered so a single meeting still spreads
/// home games evenly.
pub fn round_robin(teams: &[TeamId], meetings: u8) -> Vec<Match> {
    let mut fixtures = Vec::new();

    for meeting in 0..meetings as usize {
        for (pair_idx, (&first, &second)) in teams.iter().tuple_combinations().enumerate() {
            if (meeting + pair_idx) % 2 == 0 {
                fixtures.push(Match::new(first, second));
            } else {
                fixtures.push(Match::new(second, first));
            }
        }
    }

    fixtures
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixtureShortfall {
    pub team_id: TeamId,
    pub scheduled: usize,
    pub required: usize,
}

#[derive(Debug, Clone, Default)]
pub struct FixtureSchedule {
    pub matches: Vec<Match>,
    pub shortfalls: Vec<FixtureShortfall>,
}

impl FixtureSchedule {
    pub fn is_complete(&self) -> bool {
        self.shortfalls.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
struct SchedulingState {
    scheduled: usize,
    home: usize,
    away: usize,
    opponents: HashSet<usize>,
}

/// Home and away games each team should end up with.
#[derive(Debug, Clone, Copy)]
struct VenueQuota {
    home: usize,
    away: usize,
}

impl VenueQuota {
    fn new(matches_per_team: usize) -> Self {
        let home = matches_per_team / 2;

        VenueQuota {
            home,
            away: matches_per_team - home,
        }
    }

    fn deficit(&self, state: &SchedulingState) -> (usize, usize) {
        (
            self.home.saturating_sub(state.home),
            self.away.saturating_sub(state.away),
        )
    }

    fn can_host(&self, host: &SchedulingState, guest: &SchedulingState) -> bool {
        self.deficit(host).0 > 0 && self.deficit(guest).1 > 0
    }

    fn balanced_pairing(&self, first: &SchedulingState, second: &SchedulingState) -> bool {
        self.can_host(first, second) || self.can_host(second, first)
    }

    /// Whether `current` hosts `opponent`. A side that can host within quota
    /// is preferred; otherwise the larger combined deficit decides.
    fn current_hosts<R: Rng + ?Sized>(
        &self,
        current: &SchedulingState,
        opponent: &SchedulingState,
        rng: &mut R,
    ) -> bool {
        match (self.can_host(current, opponent), self.can_host(opponent, current)) {
            (true, false) => true,
            (false, true) => false,
            _ => {
                let (current_home, current_away) = self.deficit(current);
                let (opponent_home, opponent_away) = self.deficit(opponent);

                match (current_home + opponent_away).cmp(&(opponent_home + current_away)) {
                    Ordering::Greater => true,
                    Ordering::Less => false,
                    Ordering::Equal => rng.gen_bool(0.5),
                }
            }
        }
    }
}

/// Fixtures under construction, as indices into the team list.
struct SwissDraw {
    quota: usize,
    venue_quota: VenueQuota,
    states: Vec<SchedulingState>,
    fixtures: Vec<(usize, usize)>,
}

impl SwissDraw {
    fn new(count: usize, quota: usize) -> Self {
        SwissDraw {
            quota,
            venue_quota: VenueQuota::new(quota),
            states: vec![SchedulingState::default(); count],
            fixtures: Vec::new(),
        }
    }

    fn needs_match(&self, idx: usize) -> bool {
        self.states[idx].scheduled < self.quota
    }

    fn has_met(&self, first: usize, second: usize) -> bool {
        self.states[first].opponents.contains(&second)
    }

    fn add<R: Rng + ?Sized>(&mut self, current: usize, opponent: usize, rng: &mut R) {
        let current_hosts = self
            .venue_quota
            .current_hosts(&self.states[current], &self.states[opponent], rng);

        let (home, away) = if current_hosts {
            (current, opponent)
        } else {
            (opponent, current)
        };

        self.states[home].home += 1;
        self.states[away].away += 1;

        for (team, other) in [(home, away), (away, home)] {
            self.states[team].scheduled += 1;
            self.states[team].opponents.insert(other);
        }

        self.fixtures.push((home, away));
    }

    fn remove(&mut self, fixture_idx: usize) -> (usize, usize) {
        let (home, away) = self.fixtures.swap_remove(fixture_idx);

        self.states[home].home -= 1;
        self.states[away].away -= 1;

        for (team, other) in [(home, away), (away, home)] {
            self.states[team].scheduled -= 1;
            self.states[team].opponents.remove(&other);
        }

        (home, away)
    }

    /// Breaks up one scheduled fixture so `current` can play both of its
    /// teams, or one of them while another team short of its quota plays the
    /// other. Every rewire schedules two more appearances in total.
    fn rewire<R: Rng + ?Sized>(&mut self, current: usize, rng: &mut R) -> bool {
        if self.quota - self.states[current].scheduled >= 2 {
            let open: Vec<usize> = self
                .fixtures
                .iter()
                .enumerate()
                .filter(|(_, (home, away))| {
                    *home != current
                        && *away != current
                        && !self.has_met(current, *home)
                        && !self.has_met(current, *away)
                })
                .map(|(idx, _)| idx)
                .collect();

            if let Some(&idx) = open.choose(rng) {
                let (home, away) = self.remove(idx);

                self.add(current, home, rng);
                self.add(current, away, rng);

                return true;
            }
        }

        let partners: Vec<usize> = (0..self.states.len())
            .filter(|&other| other != current && self.needs_match(other))
            .collect();

        for partner in partners {
            let open: Vec<(usize, usize, usize)> = self
                .fixtures
                .iter()
                .enumerate()
                .filter(|(_, (home, away))| {
                    ![current, partner].contains(home) && ![current, partner].contains(away)
                })
                .filter_map(|(idx, &(home, away))| {
                    if !self.has_met(current, home) && !self.has_met(partner, away) {
                        Some((idx, home, away))
                    } else if !self.has_met(current, away) && !self.has_met(partner, home) {
                        Some((idx, away, home))
                    } else {
                        None
                    }
                })
                .collect();

            if let Some(&(idx, current_opponent, partner_opponent)) = open.choose(rng) {
                self.remove(idx);

                self.add(current, current_opponent, rng);
                self.add(partner, partner_opponent, rng);

                return true;
            }
        }

        false
    }
}

/// Fixed number of matches per team against distinct opponents.
pub struct SwissScheduler {
    matches_per_team: usize,
}

impl SwissScheduler {
    pub fn new(matches_per_team: usize) -> Self {
        SwissScheduler { matches_per_team }
    }

    /// Best effort: teams that cannot reach their quota are reported as
    /// shortfalls and the fixtures built so far are kept.
    pub fn generate<R: Rng + ?Sized>(&self, teams: &[TeamId], rng: &mut R) -> FixtureSchedule {
        let count = teams.len();
        let quota = self.matches_per_team;

        let mut draw = SwissDraw::new(count, quota);

        let mut order: Vec<usize> = (0..count).collect();
        order.shuffle(rng);

        // no legal opponent and nothing left to rewire
        let mut stuck: HashSet<usize> = HashSet::new();

        let mut budget = (count * quota * count * 2).max(1);

        while budget > 0 {
            budget -= 1;

            let Some(current) = order
                .iter()
                .copied()
                .filter(|idx| draw.needs_match(*idx) && !stuck.contains(idx))
                .min_by_key(|idx| draw.states[*idx].scheduled)
            else {
                break;
            };

            let mut candidates: Vec<usize> = (0..count).collect();
            candidates.shuffle(rng);

            let legal: Vec<usize> = candidates
                .into_iter()
                .filter(|&candidate| {
                    candidate != current
                        && draw.needs_match(candidate)
                        && !draw.has_met(current, candidate)
                })
                .collect();

            let opponent = legal
                .iter()
                .copied()
                .find(|&candidate| {
                    draw.venue_quota
                        .balanced_pairing(&draw.states[current], &draw.states[candidate])
                })
                .or_else(|| legal.first().copied());

            match opponent {
                Some(opponent) => draw.add(current, opponent, rng),
                None => {
                    if !draw.rewire(current, rng) {
                        stuck.insert(current);
                    }
                }
            }
        }

        let mut matches: Vec<Match> = draw
            .fixtures
            .iter()
            .map(|&(home, away)| Match::new(teams[home], teams[away]))
            .collect();

        matches.shuffle(rng);

        let shortfalls: Vec<FixtureShortfall> = draw
            .states
            .iter()
            .enumerate()
            .filter(|(_, state)| state.scheduled < quota)
            .map(|(idx, state)| FixtureShortfall {
                team_id: teams[idx],
                scheduled: state.scheduled,
                required: quota,
            })
            .collect();

        for shortfall in &shortfalls {
            warn!(
                "team {} only scheduled {} of {} matches",
                shortfall.team_id, shortfall.scheduled, shortfall.required
            );
        }

        FixtureSchedule {
            matches,
            shortfalls,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    fn ids(count: u32) -> Vec<TeamId> {
        (0..count).map(TeamId).collect()
    }

    fn appearances(matches: &[Match]) -> HashMap<TeamId, (usize, usize)> {
        let mut result: HashMap<TeamId, (usize, usize)> = HashMap::new();

        for m in matches {
            result.entry(m.home_team_id).or_default().0 += 1;
            result.entry(m.away_team_id).or_default().1 += 1;
        }

        result
    }

    #[test]
    fn test_double_round_robin_plays_every_ordered_pair() {
        let teams = ids(6);
        let fixtures = round_robin(&teams, 2);

        assert_eq!(fixtures.len(), 30);

        let pairs: HashSet<(TeamId, TeamId)> = fixtures
            .iter()
            .map(|m| (m.home_team_id, m.away_team_id))
            .collect();
        assert_eq!(pairs.len(), 30);
    }

    #[test]
    fn test_single_round_robin_spreads_home_games() {
        let teams = ids(6);
        let fixtures = round_robin(&teams, 1);

        assert_eq!(fixtures.len(), 15);

        for (home, away) in appearances(&fixtures).values() {
            assert_eq!(home + away, 5);
            assert!(home.abs_diff(*away) <= 3);
        }
    }

    #[test]
    fn test_triple_round_robin_counts() {
        let teams = ids(12);
        let fixtures = round_robin(&teams, 3);

        assert_eq!(fixtures.len(), 66 * 3);
        assert!(appearances(&fixtures).values().all(|(h, a)| h + a == 33));
    }

    #[test]
    fn test_swiss_schedule_distinct_opponents_and_balance() {
        let teams = ids(36);
        let mut rng = ChaCha8Rng::seed_from_u64(21);

        let schedule = SwissScheduler::new(8).generate(&teams, &mut rng);

        let mut seen = HashSet::new();
        for m in &schedule.matches {
            assert_ne!(m.home_team_id, m.away_team_id);

            let key = (
                m.home_team_id.min(m.away_team_id),
                m.home_team_id.max(m.away_team_id),
            );
            assert!(seen.insert(key), "pair scheduled twice");
        }

        let counts = appearances(&schedule.matches);
        let mut total_gap = 0;

        for team in &teams {
            let (home, away) = counts.get(team).copied().unwrap_or_default();

            assert!(home + away <= 8);

            match schedule.shortfalls.iter().find(|s| s.team_id == *team) {
                Some(shortfall) => assert_eq!(shortfall.scheduled, home + away),
                None => assert_eq!(home + away, 8),
            }

            // an odd number of matches can't split evenly
            total_gap += home.abs_diff(away) - (home + away) % 2;
        }

        let mean_gap = total_gap as f64 / teams.len() as f64;
        assert!(mean_gap <= 0.5, "mean home/away gap {mean_gap}");

        assert!(schedule.matches.len() >= 136);
    }

    #[test]
    fn test_swiss_schedule_balances_home_and_away_across_seeds() {
        let teams = ids(16);

        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let schedule = SwissScheduler::new(6).generate(&teams, &mut rng);

            assert!(schedule.is_complete(), "seed {seed}: {:?}", schedule.shortfalls);
            assert_eq!(schedule.matches.len(), 48);

            let counts = appearances(&schedule.matches);
            assert!(counts.values().all(|(home, away)| home.abs_diff(*away) <= 2));

            let balanced = counts.values().filter(|(home, away)| home == away).count();
            assert!(balanced * 4 >= teams.len() * 3, "seed {seed}: {balanced} balanced");
        }
    }

    #[test]
    fn test_only_side_with_home_slots_left_hosts() {
        let quota = VenueQuota::new(8);
        let mut rng = ChaCha8Rng::seed_from_u64(23);

        let home_full = SchedulingState {
            scheduled: 5,
            home: 4,
            away: 1,
            ..Default::default()
        };
        let away_full = SchedulingState {
            scheduled: 5,
            home: 1,
            away: 4,
            ..Default::default()
        };

        for _ in 0..20 {
            assert!(!quota.current_hosts(&home_full, &away_full, &mut rng));
            assert!(quota.current_hosts(&away_full, &home_full, &mut rng));
        }
    }

    #[test]
    fn test_larger_deficit_hosts_when_neither_side_fits() {
        let quota = VenueQuota::new(6);
        let mut rng = ChaCha8Rng::seed_from_u64(24);

        // both sides have used every home slot
        let one_away_left = SchedulingState {
            scheduled: 5,
            home: 3,
            away: 2,
            ..Default::default()
        };
        let two_away_left = SchedulingState {
            scheduled: 4,
            home: 3,
            away: 1,
            ..Default::default()
        };

        assert!(!quota.balanced_pairing(&one_away_left, &two_away_left));
        assert!(quota.current_hosts(&one_away_left, &two_away_left, &mut rng));
        assert!(!quota.current_hosts(&two_away_left, &one_away_left, &mut rng));
    }

    #[test]
    fn test_swiss_schedule_reports_shortfall() {
        let teams = ids(5);
        let mut rng = ChaCha8Rng::seed_from_u64(22);

        let schedule = SwissScheduler::new(6).generate(&teams, &mut rng);

        assert!(!schedule.is_complete());
        assert_eq!(schedule.shortfalls.len(), 5);
        assert_eq!(schedule.matches.len(), 10);
        assert!(schedule.shortfalls.iter().all(|s| s.scheduled == 4 && s.required == 6));
    }
}
