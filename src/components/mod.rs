pub mod countdown;
pub mod flicker;

pub use countdown::*;
pub use flicker::*;
