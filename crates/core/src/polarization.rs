//! Polarization tags and solver run modes.
//!
//! Polarization is an open set: any tag the caller chooses is accepted and
//! compared by exact string equality. By default a run is tagged with the name
//! of the [`Runner`] that produced it, minus the `run_` prefix.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModeError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polarization(String);

impl Polarization {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Polarization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Polarization {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Polarization {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<Runner> for Polarization {
    fn from(value: Runner) -> Self {
        value.default_polarization()
    }
}

/// Run modes understood by the external band solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Runner {
    #[serde(rename = "run")]
    All,
    #[serde(rename = "run_te")]
    Te,
    #[serde(rename = "run_tm")]
    Tm,
    #[serde(rename = "run_zeven")]
    ZEven,
    #[serde(rename = "run_zodd")]
    ZOdd,
    #[serde(rename = "run_yeven")]
    YEven,
    #[serde(rename = "run_yodd")]
    YOdd,
    #[serde(rename = "run_te_yeven")]
    TeYEven,
    #[serde(rename = "run_te_yodd")]
    TeYOdd,
    #[serde(rename = "run_tm_yeven")]
    TmYEven,
    #[serde(rename = "run_tm_yodd")]
    TmYOdd,
}

impl Runner {
    pub const ALL: [Runner; 11] = [
        Runner::All,
        Runner::Te,
        Runner::Tm,
        Runner::ZEven,
        Runner::ZOdd,
        Runner::YEven,
        Runner::YOdd,
        Runner::TeYEven,
        Runner::TeYOdd,
        Runner::TmYEven,
        Runner::TmYOdd,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Runner::All => "run",
            Runner::Te => "run_te",
            Runner::Tm => "run_tm",
            Runner::ZEven => "run_zeven",
            Runner::ZOdd => "run_zodd",
            Runner::YEven => "run_yeven",
            Runner::YOdd => "run_yodd",
            Runner::TeYEven => "run_te_yeven",
            Runner::TeYOdd => "run_te_yodd",
            Runner::TmYEven => "run_tm_yeven",
            Runner::TmYOdd => "run_tm_yodd",
        }
    }

    /// Tag given to modes from this runner when the caller supplies none.
    pub fn default_polarization(self) -> Polarization {
        let name = self.as_str();
        Polarization::new(name.strip_prefix("run_").unwrap_or(name))
    }
}

impl fmt::Display for Runner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Runner {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Runner::ALL
            .into_iter()
            .find(|runner| runner.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Runner::ALL.iter().map(|r| r.as_str()).collect();
                ModeError::invalid_choice("runner", s, &names)
            })
    }
}
