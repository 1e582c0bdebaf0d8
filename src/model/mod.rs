pub mod cell;
pub mod config;
pub mod grid;
pub mod recommendation;

pub use cell::*;
pub use config::*;
pub use grid::*;
pub use recommendation::*;
