pub mod app;
pub mod data;
pub mod error;
pub mod grid_system;
pub mod renderer;

pub use error::GridError;
