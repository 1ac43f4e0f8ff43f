pub mod defs;
pub mod geometry;
pub mod utils;
