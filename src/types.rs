//! Common types used throughout deerberry
//!
//! This module contains shared type definitions and type aliases
//! used across multiple modules.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Ordered query parameter list
pub type QueryParams = Vec<(String, String)>;

// ============================================================================
// Investment Type
// ============================================================================

/// Which investments to list
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvestmentType {
    /// Investments still repaying
    #[default]
    Current,
    /// Repaid or otherwise closed investments
    Finished,
}

impl InvestmentType {
    /// Value of the `type` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentType::Current => "CURRENT",
            InvestmentType::Finished => "FINISHED",
        }
    }
}

impl fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
