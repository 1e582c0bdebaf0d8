pub mod app;
pub mod input;
pub mod render;
pub mod style;
pub mod theme;

pub use app::run;
