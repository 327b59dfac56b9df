pub mod cli;
pub mod flicker_config;
pub mod flicker_rng;

pub use cli::*;
pub use flicker_config::*;
pub use flicker_rng::*;
