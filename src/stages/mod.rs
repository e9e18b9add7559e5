pub mod assemble;
pub mod classify;
pub mod merge;
pub mod score;
pub mod segment;

pub use assemble::*;
pub use classify::*;
pub use merge::*;
pub use score::*;
pub use segment::*;
