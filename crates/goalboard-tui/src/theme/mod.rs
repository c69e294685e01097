pub mod colors;
pub mod styles;

pub use colors::*;
pub use styles::*;
