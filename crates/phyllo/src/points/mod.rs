//! Point generators for circular arrangements.
//!
//! Every generator is a pure function of its parameters and returns points
//! centered on the origin, already rounded to display precision. The caller
//! translates them to the canvas center.

mod lattice;
mod sunflower;

pub use lattice::{generate_lattice, lattice_ring_count};
pub use sunflower::{boundary_count, generate_sunflower, Stride, GOLDEN_RATIO};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::geometry::Point;

/// Metadata describing a mode for UI display.
#[derive(Debug, Clone, Copy)]
pub struct ModeMetadata {
    /// Brief description of the arrangement
    pub description: &'static str,
    /// Whether `alpha` affects this mode
    pub uses_alpha: bool,
    /// Whether `layers`, `nPerLayer` and `twist` affect this mode
    pub uses_rings: bool,
}

impl ModeMetadata {
    /// Create new mode metadata.
    pub const fn new(description: &'static str, uses_alpha: bool, uses_rings: bool) -> Self {
        Self { description, uses_alpha, uses_rings }
    }
}

/// Available generation modes.
///
/// ## Rust Lesson #3: `#[serde(other)]`
///
/// Settings files are typed by hand, so a misspelled mode must not abort
/// loading. `#[serde(other)]` routes every unknown string to `Unknown`,
/// and `Unknown` generates nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    #[serde(rename = "sunflower")]
    Sunflower,
    #[serde(rename = "sunflowerGeodesic", alias = "sunflower-geodesic", alias = "geodesic")]
    SunflowerGeodesic,
    #[serde(rename = "lattice", alias = "hexLattice", alias = "hex-lattice", alias = "hex")]
    Lattice,
    #[serde(other, rename = "unknown")]
    Unknown,
}

impl Mode {
    /// Get all recognized modes.
    pub fn all() -> &'static [Mode] {
        &[Mode::Sunflower, Mode::SunflowerGeodesic, Mode::Lattice]
    }

    /// Get mode name as string.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Sunflower => "sunflower",
            Mode::SunflowerGeodesic => "sunflowerGeodesic",
            Mode::Lattice => "lattice",
            Mode::Unknown => "unknown",
        }
    }

    /// Get UI metadata for this mode.
    pub fn metadata(&self) -> ModeMetadata {
        match self {
            Mode::Sunflower =>
                ModeMetadata::new("Phyllotaxis spiral, golden angle 2π/φ²", true, false),
            Mode::SunflowerGeodesic =>
                ModeMetadata::new("Phyllotaxis spiral, stride 360·φ degrees", true, false),
            Mode::Lattice =>
                ModeMetadata::new("Concentric rings, thinned to n points", false, true),
            Mode::Unknown =>
                ModeMetadata::new("Unrecognized mode, generates nothing", false, false),
        }
    }

    /// Parse mode from string. Unrecognized names map to [`Mode::Unknown`].
    pub fn from_name(name: &str) -> Mode {
        match name.to_lowercase().as_str() {
            "sunflower" => Mode::Sunflower,
            "sunflowergeodesic" | "sunflower-geodesic" | "geodesic" => Mode::SunflowerGeodesic,
            "lattice" | "hexlattice" | "hex-lattice" | "hex" => Mode::Lattice,
            _ => Mode::Unknown,
        }
    }

    /// The next recognized mode, wrapping around. Used by UI cycling.
    pub fn next(&self) -> Mode {
        let all = Mode::all();
        match all.iter().position(|m| m == self) {
            Some(i) => all[(i + 1) % all.len()],
            None => all[0],
        }
    }

    /// The previous recognized mode, wrapping around.
    pub fn prev(&self) -> Mode {
        let all = Mode::all();
        match all.iter().position(|m| m == self) {
            Some(0) | None => all[all.len() - 1],
            Some(i) => all[i - 1],
        }
    }
}

/// Inputs to a generation pass.
///
/// No clamping happens here: bounding `n`, `layers` and `size` to sensible
/// values is the job of whoever builds the parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub mode: Mode,
    /// Requested point count
    pub n: usize,
    /// Boundary smoothness; `round(alpha * sqrt(n))` points sit on the rim
    pub alpha: f64,
    /// Diameter of the boundary circle in drawing units
    pub size: f64,
    /// Ring count (lattice only)
    pub layers: usize,
    /// Extra points per ring per ring index (lattice only)
    pub n_per_layer: f64,
    /// Per-ring rotation, in multiples of π per ring index (lattice only)
    pub twist: f64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            mode: Mode::Sunflower,
            n: 500,
            alpha: 2.0,
            size: 400.0,
            layers: 12,
            n_per_layer: 6.0,
            twist: 0.0,
        }
    }
}

/// Generate the point set for `params`.
///
/// This is the main entry point for point generation. An unrecognized mode
/// yields an empty set, not an error.
pub fn generate_points(params: &GenerationParams) -> Vec<Point> {
    let points = match params.mode {
        Mode::Sunflower => {
            generate_sunflower(params.n, params.alpha, params.size, Stride::Golden)
        }
        Mode::SunflowerGeodesic => {
            generate_sunflower(params.n, params.alpha, params.size, Stride::Geodesic)
        }
        Mode::Lattice => generate_lattice(
            params.n,
            params.layers,
            params.n_per_layer,
            params.size,
            params.twist,
        ),
        Mode::Unknown => {
            warn!("unrecognized mode, generating an empty point set");
            Vec::new()
        }
    };

    debug!(mode = params.mode.name(), requested = params.n, produced = points.len(), "generated points");
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_accepts_aliases() {
        assert_eq!(Mode::from_name("sunflower"), Mode::Sunflower);
        assert_eq!(Mode::from_name("sunflowerGeodesic"), Mode::SunflowerGeodesic);
        assert_eq!(Mode::from_name("geodesic"), Mode::SunflowerGeodesic);
        assert_eq!(Mode::from_name("hexLattice"), Mode::Lattice);
        assert_eq!(Mode::from_name("LATTICE"), Mode::Lattice);
        assert_eq!(Mode::from_name("voronoi"), Mode::Unknown);
    }

    #[test]
    fn names_round_trip_through_from_name() {
        for mode in Mode::all() {
            assert_eq!(Mode::from_name(mode.name()), *mode);
        }
    }

    #[test]
    fn unknown_mode_generates_nothing() {
        let params = GenerationParams { mode: Mode::Unknown, ..Default::default() };
        assert!(generate_points(&params).is_empty());
    }

    #[test]
    fn dispatch_matches_direct_calls() {
        let params = GenerationParams { n: 50, ..Default::default() };
        assert_eq!(
            generate_points(&params),
            generate_sunflower(50, params.alpha, params.size, Stride::Golden)
        );

        let params = GenerationParams { mode: Mode::Lattice, n: 40, ..Default::default() };
        assert_eq!(
            generate_points(&params),
            generate_lattice(40, params.layers, params.n_per_layer, params.size, params.twist)
        );
    }

    #[test]
    fn mode_cycling_wraps() {
        assert_eq!(Mode::Lattice.next(), Mode::Sunflower);
        assert_eq!(Mode::Sunflower.prev(), Mode::Lattice);
        assert_eq!(Mode::Unknown.next(), Mode::Sunflower);
    }

    #[test]
    fn every_mode_has_a_description() {
        for mode in Mode::all() {
            assert!(!mode.metadata().description.is_empty());
        }
    }
}
