pub mod elo;
pub mod engine;
pub mod fixture;
pub mod knockout;
pub mod penalties;

pub use elo::*;
pub use engine::*;
pub use fixture::*;
pub use knockout::*;
pub use penalties::*;
