pub mod config;
pub mod error;
pub mod gate;
pub mod geometry;
pub mod phase;
