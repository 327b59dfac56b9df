pub mod flicker;

pub use flicker::*;
