//! Kerf presets and the request document accepted by the CLI.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::solver::Solver;
use crate::types::{CutRequest, Mode, OptimizationResult, StockOffering};

/// Cap on units after quantity expansion, per side, enforced before solving.
pub const MAX_EXPANDED_UNITS: u64 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KerfPreset {
    pub name: &'static str,
    pub label: &'static str,
    pub value: f64,
}

pub static KERF_PRESETS: [KerfPreset; 4] = [
    KerfPreset {
        name: "standard",
        label: "Standard (1/8\")",
        value: 0.125,
    },
    KerfPreset {
        name: "thin",
        label: "Thin Kerf (3/32\")",
        value: 0.09375,
    },
    KerfPreset {
        name: "thick",
        label: "Thick Blade (5/32\")",
        value: 0.15625,
    },
    KerfPreset {
        name: "none",
        label: "No Kerf",
        value: 0.0,
    },
];

pub const DEFAULT_KERF: f64 = 0.125;

pub fn kerf_preset(name: &str) -> Option<&'static KerfPreset> {
    KERF_PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}

fn default_kerf() -> f64 {
    DEFAULT_KERF
}

/// A complete optimization request, as posted by the web front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeRequest {
    pub mode: Mode,
    pub cuts: Vec<CutRequest>,
    pub stock: Vec<StockOffering>,
    #[serde(default = "default_kerf")]
    pub kerf: f64,
}

impl OptimizeRequest {
    pub fn from_json_str(json: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, InputError> {
        let json = std::fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn run(&self) -> OptimizationResult {
        Solver::new(self.mode, self.kerf).solve(&self.cuts, &self.stock)
    }
}
