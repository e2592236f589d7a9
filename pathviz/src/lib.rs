//! pathviz: a terminal visualizer for step-by-step grid path searches.

pub mod app;
pub mod colors;
pub mod config;
pub mod error;
pub mod log;
pub mod msg;
pub mod scatter;
pub mod screen;
pub mod solve;
pub mod term;

pub use app::Visualizer;
pub use config::Config;
pub use error::AppError;
