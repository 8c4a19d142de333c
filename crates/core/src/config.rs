//! Crystal and analysis settings loaded from TOML.
//!
//! ```toml
//! [crystal]
//! lattice = "square"
//! num_bands = 6
//! resolution = 32
//! interp = 4
//! periods = 3
//! use_xy = true
//! k_point_max = 0.2
//!
//! [analysis]
//! frequency_tolerance = 0.01
//! freq_tolerance = 0.01
//! ```

use serde::{Deserialize, Serialize};

use crate::grouping::DEFAULT_FREQUENCY_TOLERANCE;
use crate::lattice::{interpolate, xy_path, LatticeKind};
use crate::lookup::DEFAULT_FREQ_TOLERANCE;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// ============================================================================
// Crystal Settings
// ============================================================================

/// Grid points per lattice constant, either uniform or per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Resolution {
    Uniform(usize),
    PerAxis([usize; 3]),
}

impl Resolution {
    pub fn per_axis(self) -> [usize; 3] {
        match self {
            Resolution::Uniform(n) => [n; 3],
            Resolution::PerAxis(axes) => axes,
        }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Resolution::Uniform(default_resolution())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrystalSettings {
    #[serde(default = "default_lattice")]
    pub lattice: LatticeKind,
    #[serde(default = "default_num_bands")]
    pub num_bands: usize,
    #[serde(default)]
    pub resolution: Resolution,
    /// Points inserted between consecutive path wavevectors.
    #[serde(default = "default_interp")]
    pub interp: usize,
    /// Unit cells drawn per axis when rendering fields.
    #[serde(default = "default_periods")]
    pub periods: usize,
    /// Use the X → Γ → Y path instead of the lattice's corner path.
    #[serde(default = "default_use_xy")]
    pub use_xy: bool,
    #[serde(default = "default_k_point_max")]
    pub k_point_max: f64,
    /// Explicit path; overrides both presets when non-empty.
    #[serde(default)]
    pub k_points: Vec<[f64; 3]>,
}

fn default_lattice() -> LatticeKind {
    LatticeKind::Square
}

fn default_num_bands() -> usize {
    6
}

fn default_resolution() -> usize {
    32
}

fn default_interp() -> usize {
    4
}

fn default_periods() -> usize {
    3
}

fn default_use_xy() -> bool {
    true
}

fn default_k_point_max() -> f64 {
    0.2
}

impl Default for CrystalSettings {
    fn default() -> Self {
        Self {
            lattice: default_lattice(),
            num_bands: default_num_bands(),
            resolution: Resolution::default(),
            interp: default_interp(),
            periods: default_periods(),
            use_xy: default_use_xy(),
            k_point_max: default_k_point_max(),
            k_points: Vec::new(),
        }
    }
}

impl CrystalSettings {
    /// Path nodes: explicit list, else the XY path, else the lattice preset.
    pub fn k_points(&self) -> Vec<[f64; 3]> {
        if !self.k_points.is_empty() {
            self.k_points.clone()
        } else if self.use_xy {
            xy_path(self.k_point_max)
        } else {
            self.lattice.default_k_path()
        }
    }

    /// Path nodes with `interp` points inserted between each pair.
    pub fn k_points_interpolated(&self) -> Vec<[f64; 3]> {
        interpolate(self.interp, &self.k_points())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_bands == 0 {
            return Err(ConfigError::Invalid("num_bands must be at least 1".into()));
        }
        if self.resolution.per_axis().iter().any(|&n| n == 0) {
            return Err(ConfigError::Invalid("resolution must be positive".into()));
        }
        if self.periods == 0 {
            return Err(ConfigError::Invalid("periods must be at least 1".into()));
        }
        if self.use_xy && !(self.k_point_max > 0.0 && self.k_point_max.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "k_point_max must be positive, got {}",
                self.k_point_max
            )));
        }
        if self.k_points.iter().flatten().any(|c| !c.is_finite()) {
            return Err(ConfigError::Invalid("k_points must be finite".into()));
        }
        Ok(())
    }
}

// ============================================================================
// Analysis Defaults
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Chained tolerance for frequency clustering.
    #[serde(default = "default_frequency_tolerance")]
    pub frequency_tolerance: f64,
    /// Half-width of the lookup frequency window.
    #[serde(default = "default_freq_tolerance")]
    pub freq_tolerance: f64,
    /// Match wavevectors within this distance instead of exactly.
    #[serde(default)]
    pub k_max_distance: Option<f64>,
}

fn default_frequency_tolerance() -> f64 {
    DEFAULT_FREQUENCY_TOLERANCE
}

fn default_freq_tolerance() -> f64 {
    DEFAULT_FREQ_TOLERANCE
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            frequency_tolerance: default_frequency_tolerance(),
            freq_tolerance: default_freq_tolerance(),
            k_max_distance: None,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("frequency_tolerance", self.frequency_tolerance),
            ("freq_tolerance", self.freq_tolerance),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        if let Some(d) = self.k_max_distance {
            if !(d >= 0.0 && d.is_finite()) {
                return Err(ConfigError::Invalid(format!(
                    "k_max_distance must be non-negative, got {d}"
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// File Configuration
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrystalConfig {
    #[serde(default)]
    pub crystal: CrystalSettings,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl CrystalConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        let config: CrystalConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.crystal.validate()?;
        self.analysis.validate()
    }
}
