pub mod collection;
pub mod statistics;
pub mod team;

pub use collection::*;
pub use statistics::*;
pub use team::*;
