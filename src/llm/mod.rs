pub mod client;
pub mod prompts;
pub mod reply;

pub use client::*;
pub use prompts::*;
pub use reply::*;
