/// Convenience result type used across crater-glyph.
pub type GlyphResult<T> = Result<T, GlyphError>;

/// Error taxonomy for the IO and configuration boundary.
///
/// The render core itself never fails: sparse records, unmapped codes and missing silhouettes
/// are recovered with documented fallbacks (see [`crate::Recovery`]). These variants only surface
/// from loading, configuration and encoding.
#[derive(thiserror::Error, Debug)]
pub enum GlyphError {
    /// Invalid caller-provided options or records.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while loading or parsing silhouette assets.
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors while rasterizing, flattening or encoding frames.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlyphError {
    /// Build a [`GlyphError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GlyphError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`GlyphError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`GlyphError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for GlyphError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

/// Degradation field a recovered ordinal came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DegradationField {
    /// `rim_degradation`.
    Rim,
    /// `ejecta_degradation`.
    Ejecta,
    /// `floor_degradation`.
    Floor,
}

impl std::fmt::Display for DegradationField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Rim => "rim",
            Self::Ejecta => "ejecta",
            Self::Floor => "floor",
        })
    }
}

/// A sparse-input condition that was recovered locally with a documented fallback.
///
/// Recoveries are reported next to the output (and logged at `debug`), never returned as
/// failures.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum Recovery {
    /// A silhouette key did not resolve; the fallback silhouette was drawn instead.
    #[error("missing silhouette '{key}', substituted '{fallback}'")]
    MissingAssetReference {
        /// Requested asset key.
        key: String,
        /// Substituted asset key.
        fallback: String,
    },

    /// A morphology code had no alias entry; the raw code was used as the asset name.
    #[error("unmapped morphology code '{code}', using it as the asset name")]
    UnmappedMorphologyCode {
        /// The raw code.
        code: String,
    },

    /// A degradation ordinal was missing or outside 1..=4; neutral gray was used.
    #[error("invalid {field} degradation ordinal {value:?}, using neutral gray")]
    InvalidDegradationOrdinal {
        /// Which record field.
        field: DegradationField,
        /// Raw value, `None` when missing.
        value: Option<f64>,
    },
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
