//! Control-panel settings snapshot.
//!
//! A `Settings` value is what the sliders and toggles hold at one moment.
//! It can be loaded from YAML, overridden by command-line flags, edited
//! live in the TUI, and turned into the library's parameter types.
//!
//! UI bounds are applied here with [`Settings::clamped`]; the library never
//! clamps its inputs.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use phyllo::{GenerationParams, Mode, Scene, Style};

/// Inclusive UI bounds for each numeric control.
pub const N_RANGE: (usize, usize) = (1, 2000);
pub const ALPHA_RANGE: (f64, f64) = (0.0, 3.0);
pub const LAYERS_RANGE: (usize, usize) = (1, 42);
pub const PER_LAYER_RANGE: (f64, f64) = (0.0, 20.0);
pub const SIZE_RANGE: (f64, f64) = (10.0, 1000.0);
pub const RADIUS_RANGE: (f64, f64) = (0.0, 100.0);
pub const TWIST_RANGE: (f64, f64) = (0.0, 0.5);

/// Error loading a settings file.
#[derive(Debug)]
pub enum SettingsError {
    Io(String),
    Parse(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(msg) => write!(f, "Failed to read settings file: {}", msg),
            SettingsError::Parse(msg) => write!(f, "Failed to parse settings YAML: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}

/// One snapshot of every control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub mode: Mode,
    pub n: usize,
    pub alpha: f64,
    pub layers: usize,
    pub n_per_layer: f64,
    /// Canvas side in drawing units
    pub size: f64,
    /// Dot radius
    pub radius: f64,
    pub twist: f64,
    /// Show markup instead of the picture (TUI)
    pub svg: bool,
    pub center: bool,
    pub crosshair: bool,
    /// Shrink the generation circle by the dot radius on every side
    pub adjust_size_to_fit_radius: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let params = GenerationParams::default();
        Self {
            mode: params.mode,
            n: params.n,
            alpha: params.alpha,
            layers: params.layers,
            n_per_layer: params.n_per_layer,
            size: params.size,
            radius: 4.0,
            twist: params.twist,
            svg: false,
            center: false,
            crosshair: false,
            adjust_size_to_fit_radius: true,
        }
    }
}

impl Settings {
    /// Load settings from a YAML file. Missing keys keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| SettingsError::Io(format!("{}: {}", path.as_ref().display(), e)))?;

        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings =
            serde_yaml::from_str(content).map_err(|e| SettingsError::Parse(e.to_string()))?;
        debug!(mode = settings.mode.name(), n = settings.n, "loaded settings");
        Ok(settings)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, SettingsError> {
        serde_yaml::to_string(self).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    /// Copy with every numeric control pulled into its UI range.
    ///
    /// Non-finite reals fall back to the low bound.
    pub fn clamped(&self) -> Self {
        Self {
            n: self.n.clamp(N_RANGE.0, N_RANGE.1),
            alpha: clamp_real(self.alpha, ALPHA_RANGE),
            layers: self.layers.clamp(LAYERS_RANGE.0, LAYERS_RANGE.1),
            n_per_layer: clamp_real(self.n_per_layer, PER_LAYER_RANGE),
            size: clamp_real(self.size, SIZE_RANGE),
            radius: clamp_real(self.radius, RADIUS_RANGE),
            twist: clamp_real(self.twist, TWIST_RANGE),
            ..self.clone()
        }
    }

    /// Diameter handed to the generator.
    ///
    /// With `adjust_size_to_fit_radius`, rim dots end exactly at the canvas
    /// edge instead of being cut in half.
    pub fn generation_size(&self) -> f64 {
        if self.adjust_size_to_fit_radius {
            self.size - 2.0 * self.radius
        } else {
            self.size
        }
    }

    pub fn params(&self) -> GenerationParams {
        GenerationParams {
            mode: self.mode,
            n: self.n,
            alpha: self.alpha,
            size: self.generation_size(),
            layers: self.layers,
            n_per_layer: self.n_per_layer,
            twist: self.twist,
        }
    }

    pub fn style(&self) -> Style {
        Style { center: self.center, crosshair: self.crosshair }
    }

    /// Generate, measure and draw in one pass.
    pub fn scene(&self) -> Scene {
        Scene::compose(&self.params(), self.style(), self.radius, self.size)
    }
}

fn clamp_real(value: f64, (lo, hi): (f64, f64)) -> f64 {
    if value.is_finite() { value.clamp(lo, hi) } else { lo }
}

/// Example settings file, printed by `phyllo settings`.
pub const EXAMPLE_YAML: &str = r##"# Example phyllo settings
# Every key is optional; missing keys use the defaults shown here.

mode: sunflower          # sunflower | sunflowerGeodesic | lattice (alias: hexLattice)
n: 500                   # point count (1-2000)
alpha: 2                 # boundary smoothness (0-3)

# lattice only
layers: 12               # ring count (1-42)
nPerLayer: 6             # ring density growth (0-20)
twist: 0                 # per-ring rotation in multiples of pi (0-0.5)

size: 400                # canvas size (10-1000)
radius: 4                # dot radius (0-100)
adjustSizeToFitRadius: true

center: false            # mark exact coordinates
crosshair: false         # draw a cross through each point
svg: false               # TUI: show markup instead of the picture
"##;
