use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Visual style requested from the generation service.
///
/// Serialized lowercase on the wire (`{"style": "minimal"}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Modern,
    Minimal,
    Corporate,
    Creative,
    Elegant,
}

impl Style {
    pub const ALL: [Style; 5] = [
        Style::Modern,
        Style::Minimal,
        Style::Corporate,
        Style::Creative,
        Style::Elegant,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Modern => "modern",
            Style::Minimal => "minimal",
            Style::Corporate => "corporate",
            Style::Creative => "creative",
            Style::Elegant => "elegant",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown style '{0}', expected one of: modern, minimal, corporate, creative, elegant")]
pub struct UnknownStyle(String);

impl FromStr for Style {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Style::ALL
            .iter()
            .copied()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| UnknownStyle(s.to_string()))
    }
}

/// Request body for custom generation (`POST /generate`).
///
/// Random generation carries no body; there is no request type for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub style: Style,
}

/// Success body returned by both service operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub html: String,
    /// Generations remaining in the daily quota.
    pub remaining: u32,
    /// Epoch seconds at which the quota resets. Absent when the service has
    /// nothing to report; the display layer keeps its previous value then.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_time: Option<f64>,
}
