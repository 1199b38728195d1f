pub mod continent;
pub mod format;
pub mod pool;
pub mod result;

pub use continent::*;
pub use format::*;
pub use pool::*;
pub use result::*;
