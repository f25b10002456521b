use serde::{Deserialize, Deserializer, Serialize};

use crate::foundation::math::Fnv1a64;

/// Classification attributes of one modeled crater.
///
/// Records are validated upstream; this type only tolerates the sparse shapes the source data
/// actually has (missing ordinals, numeric strings, holes in the ejecta list). Field names accept
/// both the canonical camelCase form and the legacy data-provider names (`internalMorph`,
/// `layerNumber`, `ejcSvg`, `hasRd`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CraterRecord {
    /// Stable crater identifier.
    #[serde(default, deserialize_with = "de_id")]
    pub id: String,
    /// Interior morphology code; empty when unclassified.
    #[serde(default, alias = "internalMorph", deserialize_with = "de_morphology")]
    pub morphology_code: String,
    /// Number of ejecta layers (0..=3 expected, clamped by the planner).
    #[serde(default, alias = "layerNumber", deserialize_with = "de_layer_count")]
    pub layer_count: i64,
    /// Ordered ejecta silhouette codes; `None` or `""` marks a hole.
    #[serde(default, alias = "ejcSvg")]
    pub ejecta_morph_codes: Vec<Option<String>>,
    /// Rim degradation ordinal (1..=4).
    #[serde(default, deserialize_with = "de_ordinal")]
    pub rim_degradation: Option<Ordinal>,
    /// Ejecta degradation ordinal (1..=4).
    #[serde(default, deserialize_with = "de_ordinal")]
    pub ejecta_degradation: Option<Ordinal>,
    /// Floor degradation ordinal (1..=4).
    #[serde(default, deserialize_with = "de_ordinal")]
    pub floor_degradation: Option<Ordinal>,
    /// Whether the crater shows a ray feature.
    #[serde(default, alias = "hasRd", deserialize_with = "de_flag")]
    pub has_ray_feature: bool,
}

impl CraterRecord {
    /// Empty record with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Ejecta code at `index`, treating `None` and empty strings as holes.
    pub fn ejecta_code(&self, index: usize) -> Option<&str> {
        self.ejecta_morph_codes
            .get(index)
            .and_then(|c| c.as_deref())
            .filter(|c| !c.is_empty())
    }

    /// Hash of every field that influences layer planning.
    ///
    /// Two records with the same key produce identical descriptor lists.
    pub fn render_key(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_bytes(self.id.as_bytes());
        h.write_u8(0);
        h.write_bytes(self.morphology_code.as_bytes());
        h.write_u8(0);
        h.write_u64(self.layer_count as u64);
        for code in &self.ejecta_morph_codes {
            match code {
                Some(c) => {
                    h.write_u8(1);
                    h.write_bytes(c.as_bytes());
                }
                None => h.write_u8(2),
            }
            h.write_u8(0);
        }
        for ordinal in [
            self.rim_degradation,
            self.ejecta_degradation,
            self.floor_degradation,
        ] {
            match ordinal {
                Some(o) => {
                    h.write_u8(1);
                    h.write_u64(o.0.to_bits());
                }
                None => h.write_u8(2),
            }
        }
        h.finish()
    }
}

/// Raw degradation ordinal as supplied by the data source.
///
/// Kept as `f64` so out-of-range, fractional and NaN inputs survive until the palette lookup,
/// which maps all of them to the neutral fallback.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Ordinal(pub f64);

impl Ordinal {
    /// The matching degradation level, if the ordinal is exactly 1, 2, 3 or 4.
    pub fn level(self) -> Option<DegradationLevel> {
        let v = self.0;
        if !v.is_finite() || v.fract() != 0.0 {
            return None;
        }
        match v as i64 {
            1 => Some(DegradationLevel::Fresh),
            2 => Some(DegradationLevel::Moderate),
            3 => Some(DegradationLevel::Degraded),
            4 => Some(DegradationLevel::Severe),
            _ => None,
        }
    }
}

impl From<i64> for Ordinal {
    fn from(v: i64) -> Self {
        Self(v as f64)
    }
}

impl From<f64> for Ordinal {
    fn from(v: f64) -> Self {
        Self(v)
    }
}

/// Erosion severity on the 1..=4 scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DegradationLevel {
    /// Ordinal 1.
    Fresh,
    /// Ordinal 2.
    Moderate,
    /// Ordinal 3.
    Degraded,
    /// Ordinal 4.
    Severe,
}

impl DegradationLevel {
    /// All levels in ordinal order.
    pub const ALL: [Self; 4] = [Self::Fresh, Self::Moderate, Self::Degraded, Self::Severe];

    /// Numeric ordinal (1..=4).
    pub fn ordinal(self) -> u8 {
        match self {
            Self::Fresh => 1,
            Self::Moderate => 2,
            Self::Degraded => 3,
            Self::Severe => 4,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScalarRepr {
    Bool(bool),
    Num(f64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MorphRepr {
    Text(String),
    List(Vec<Option<String>>),
}

fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<ScalarRepr>::deserialize(deserializer)? {
        None => String::new(),
        Some(ScalarRepr::Text(s)) => s,
        Some(ScalarRepr::Num(n)) if n.fract() == 0.0 => format!("{}", n as i64),
        Some(ScalarRepr::Num(n)) => n.to_string(),
        Some(ScalarRepr::Bool(b)) => b.to_string(),
    })
}

fn de_morphology<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<MorphRepr>::deserialize(deserializer)? {
        None => String::new(),
        Some(MorphRepr::Text(s)) => s,
        Some(MorphRepr::List(items)) => items
            .into_iter()
            .flatten()
            .next()
            .unwrap_or_default(),
    })
}

fn de_layer_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<ScalarRepr>::deserialize(deserializer)? {
        None | Some(ScalarRepr::Bool(_)) => 0,
        Some(ScalarRepr::Num(n)) if n.is_finite() => n.trunc() as i64,
        Some(ScalarRepr::Num(_)) => 0,
        Some(ScalarRepr::Text(s)) => parse_leading_int(&s).unwrap_or(0),
    })
}

fn de_ordinal<'de, D>(deserializer: D) -> Result<Option<Ordinal>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<ScalarRepr>::deserialize(deserializer)? {
        None | Some(ScalarRepr::Bool(_)) => None,
        Some(ScalarRepr::Num(n)) => Some(Ordinal(n)),
        Some(ScalarRepr::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(Ordinal(s.parse::<f64>().unwrap_or(f64::NAN)))
            }
        }
    })
}

fn de_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<ScalarRepr>::deserialize(deserializer)? {
        None => false,
        Some(ScalarRepr::Bool(b)) => b,
        Some(ScalarRepr::Num(n)) => n == 1.0,
        Some(ScalarRepr::Text(s)) => matches!(s.trim(), "1" | "true"),
    })
}

fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|v| sign * v)
}

#[cfg(test)]
#[path = "../../tests/unit/record/model.rs"]
mod tests;
