mod pacing;
mod runner;

pub use pacing::*;
pub use runner::*;
