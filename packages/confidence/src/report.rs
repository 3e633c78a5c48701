//! Scoring output types.

use serde::{Deserialize, Serialize};

/// Why a layer lost confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    /// Symbolic role with no literal content and no binding
    Unbound,
    /// Rect area below the plausible minimum
    Tiny,
    /// Aspect ratio beyond the configured maximum
    Distorted,
    /// Text size outside the plausible range
    FontOutOfRange,
    /// Geometry too degenerate to score (non-finite numbers)
    Unscorable,
}

/// Severity of a flag, for review gating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagSeverity {
    Error,
    Warning,
}

impl Flag {
    pub fn severity(&self) -> FlagSeverity {
        match self {
            Flag::Unbound | Flag::Unscorable => FlagSeverity::Error,
            Flag::Tiny | Flag::Distorted | Flag::FontOutOfRange => FlagSeverity::Warning,
        }
    }
}

/// Score and findings for one layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerConfidence {
    pub layer_id: String,
    /// Heuristic trust estimate in [0, 1]
    pub score: f64,
    pub flags: Vec<Flag>,
}

impl LayerConfidence {
    pub fn has_error_flag(&self) -> bool {
        self.flags
            .iter()
            .any(|flag| flag.severity() == FlagSeverity::Error)
    }
}

/// Score and findings for a whole template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceReport {
    pub document_id: String,
    pub overall_confidence: f64,
    pub layers: Vec<LayerConfidence>,
    /// Union of every flag present on at least one layer
    pub flags: Vec<Flag>,
}

impl ConfidenceReport {
    pub fn has_error_flag(&self) -> bool {
        self.flags
            .iter()
            .any(|flag| flag.severity() == FlagSeverity::Error)
    }
}
