//! Produced phases tracked by the ledger

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ForecastError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Gas,
    Oil,
    Ngl,
    Water,
}

impl Phase {
    /// Ledger column order
    pub const ALL: [Phase; 4] = [Phase::Gas, Phase::Oil, Phase::Ngl, Phase::Water];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Gas => "gas",
            Phase::Oil => "oil",
            Phase::Ngl => "ngl",
            Phase::Water => "water",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Phase::Gas => 0,
            Phase::Oil => 1,
            Phase::Ngl => 2,
            Phase::Water => 3,
        }
    }

    pub fn entry_rate_column(&self) -> String {
        format!("entry_{}_rate", self.as_str())
    }

    pub fn exit_rate_column(&self) -> String {
        format!("exit_{}_rate", self.as_str())
    }

    pub fn volume_column(&self) -> String {
        format!("{}_volume", self.as_str())
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gas" => Ok(Phase::Gas),
            "oil" => Ok(Phase::Oil),
            "ngl" => Ok(Phase::Ngl),
            "water" => Ok(Phase::Water),
            other => Err(ForecastError::config(format!("unknown phase '{}'", other))),
        }
    }
}
