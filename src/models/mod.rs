pub mod finding;
pub mod report;
pub mod turn;

pub use finding::*;
pub use report::*;
pub use turn::*;
