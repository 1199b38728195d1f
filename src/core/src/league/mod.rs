pub mod cup;
pub mod format;
pub mod league;
pub mod qualification;
pub mod result;
pub mod schedule;
pub mod table;

pub use cup::*;
pub use format::*;
pub use league::*;
pub use qualification::*;
pub use result::*;
pub use schedule::*;
pub use table::*;
