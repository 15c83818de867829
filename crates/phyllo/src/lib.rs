//! # phyllo
//!
//! Point arrangements inside a circle: sunflower (phyllotaxis) spirals and
//! concentric ring lattices, their nearest-neighbor statistics, and SVG
//! export.
//!
//! ## Rust Lesson #1: Modules
//!
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level
//!
//! Every function here is a pure function of its inputs. There is no global
//! state; callers pass a parameter snapshot and get a fresh result back.

pub mod geometry;
pub mod points;
pub mod render;
pub mod scene;
pub mod stats;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use geometry::{round_coord, Line, Point};
pub use points::{generate_points, GenerationParams, Mode, ModeMetadata};
pub use render::{render_points, Drawing, Shape, Style};
pub use scene::Scene;
pub use stats::{compute_point_stats, nearest_neighbor_distances, PointStats};
pub use svg::drawing_to_svg;
