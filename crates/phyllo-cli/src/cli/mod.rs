//! CLI command implementations.
//!
//! This module contains the implementations for the various CLI subcommands:
//! - `generate` - Emit SVG markup or JSON points
//! - `stats` - Print nearest-neighbor stats
//! - `render` - Rasterize to PNG
//! - `benchmark` - Time generation and stats
//!
//! plus the settings snapshot shared by all of them and the TUI.

pub mod common;
pub mod settings;
pub mod generate;
pub mod stats;
pub mod render;
pub mod benchmark;

pub use settings::{Settings, SettingsError};
pub use generate::cmd_generate;
pub use stats::{cmd_stats, stats_report};
pub use render::{cmd_render, drawing_to_image, RenderError};
pub use benchmark::cmd_benchmark;
