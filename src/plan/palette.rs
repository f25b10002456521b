use crate::{
    foundation::core::Rgba8,
    record::model::{DegradationLevel, Ordinal},
};

/// Neutral gray used for missing or invalid degradation ordinals and unclassified floors.
pub const NEUTRAL_GRAY: Rgba8 = Rgba8::opaque_hex(0x808080);

/// Ground-plane accent for classified craters on light backgrounds.
pub const GROUND_ACCENT_LIGHT: Rgba8 = Rgba8::opaque_hex(0xF57435);
/// Ground-plane accent for classified craters on dark backgrounds.
pub const GROUND_ACCENT_DARK: Rgba8 = Rgba8::opaque_hex(0x000000);
/// Ground-plane neutral for unclassified craters on light backgrounds.
pub const GROUND_NEUTRAL_LIGHT: Rgba8 = Rgba8::opaque_hex(0xFFFFFF);
/// Ground-plane neutral for unclassified craters on dark backgrounds.
pub const GROUND_NEUTRAL_DARK: Rgba8 = NEUTRAL_GRAY;

/// Palette entry for a degradation level.
pub fn level_color(level: DegradationLevel) -> Rgba8 {
    match level {
        DegradationLevel::Fresh => Rgba8::opaque_hex(0x00BFFF),
        DegradationLevel::Moderate => Rgba8::opaque_hex(0xFFF598),
        DegradationLevel::Degraded => Rgba8::opaque_hex(0xBE501E),
        DegradationLevel::Severe => Rgba8::opaque_hex(0xE59898),
    }
}

/// Map a degradation ordinal to its palette color.
///
/// Total: 1..=4 map to the four palette entries, anything else (missing, out of range,
/// fractional, NaN) maps to [`NEUTRAL_GRAY`].
pub fn degradation_color(ordinal: Option<Ordinal>) -> Rgba8 {
    ordinal
        .and_then(Ordinal::level)
        .map(level_color)
        .unwrap_or(NEUTRAL_GRAY)
}

#[cfg(test)]
#[path = "../../tests/unit/plan/palette.rs"]
mod tests;
