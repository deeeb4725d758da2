pub mod driver;
pub mod surface;
pub mod types;
