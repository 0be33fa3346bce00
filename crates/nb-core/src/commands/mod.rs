//! Command implementations for the nb-core binary.
//!
//! Each command returns a serializable report that also implements
//! `Display` for text output; printing is left to `main`.

pub mod config;
pub mod demo;
pub mod movies;

pub use config::{show_config, ConfigView};
pub use demo::{run_demo, DemoReport};
pub use movies::{run_movies, MovieReport};
