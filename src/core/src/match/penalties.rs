use rand::Rng;
use serde::Serialize;

/// Outcome of a shootout. Only the winner matters; the tallies are abstract
/// and never touch goal totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PenaltyShootout {
    pub first: u32,
    pub second: u32,
}

impl PenaltyShootout {
    /// Both sides start from an independent draw in `0..=5`; while level, each
    /// side adds an independent `0` or `1` per sudden-death round.
    pub fn resolve<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut first = rng.gen_range(0..=5);
        let mut second = rng.gen_range(0..=5);

        while first == second {
            first += rng.gen_range(0..=1);
            second += rng.gen_range(0..=1);
        }

        PenaltyShootout { first, second }
    }

    pub fn first_wins(&self) -> bool {
        self.first > self.second
    }
}
