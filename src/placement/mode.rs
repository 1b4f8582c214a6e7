//! Window state applied on the target monitor

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the launched window occupies its target monitor
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum PlacementMode {
    /// Maximize on the target monitor
    #[default]
    Maximize,
    /// Cover the monitor's work area without maximizing
    WorkArea,
    /// Keep the window's size and move it onto the target monitor
    Normal,
}

impl PlacementMode {
    /// All modes in GUI order
    pub const ALL: [Self; 3] = [Self::Maximize, Self::WorkArea, Self::Normal];

    /// Spelling used on the command line and in the config file
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Maximize => "maximize",
            Self::WorkArea => "workarea",
            Self::Normal => "normal",
        }
    }

    /// Label shown in the behavior picker
    pub const fn label(self) -> &'static str {
        match self {
            Self::Maximize => "Maximize (recommended)",
            Self::WorkArea => "Fit to work area",
            Self::Normal => "Normal window",
        }
    }

    /// Position in `ALL`
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&m| m == self).unwrap_or(0)
    }

    /// Mode at a picker position, defaulting to `Maximize`
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }
}

impl fmt::Display for PlacementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlacementMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown placement mode '{s}' (expected maximize, workarea or normal)"))
    }
}
