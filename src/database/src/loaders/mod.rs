mod continental;
mod league;

pub use continental::*;
pub use league::*;
