pub mod flicker;
pub mod input;
