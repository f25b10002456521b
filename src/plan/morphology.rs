/// Interior morphology class, resolved from a classification code.
///
/// The set is closed: every code either resolves through the alias table to a known variant, is
/// empty ([`Morphology::None`]), or is carried verbatim as [`Morphology::Unknown`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Morphology {
    /// No interior classification.
    None,
    /// Complex crater with a central mound (`CpxCMa`).
    CentralMound,
    /// Complex crater with a central peak (`CpxCpk`).
    CentralPeak,
    /// Complex crater with a central pit (`CpxCpt`).
    CentralPit,
    /// Complex crater with a peak ring (`CpxPkRg`).
    PeakRing,
    /// Complex crater with a summit pit (`CpxSuPt`).
    SummitPit,
    /// Complex crater with uncertain interior (`CpxUnc`).
    Uncertain,
    /// Complex flat-floored crater (`CpxFF`).
    FlatFloor,
    /// Basin (`Bsn`).
    Basin,
    /// Simple bowl crater (`Smp`).
    Simple,
    /// Code with no alias entry, kept verbatim.
    Unknown(String),
}

/// Exact, case-sensitive code table. Abbreviations and spelling variants map to the canonical
/// variant; canonical codes map to themselves.
const ALIASES: &[(&str, Morphology)] = &[
    ("CpxCMa", Morphology::CentralMound),
    ("CMa", Morphology::CentralMound),
    ("CpxCpk", Morphology::CentralPeak),
    ("CpxCPk", Morphology::CentralPeak),
    ("CPk", Morphology::CentralPeak),
    ("CpxCpt", Morphology::CentralPit),
    ("CpxCPt", Morphology::CentralPit),
    ("CPt", Morphology::CentralPit),
    ("SmpCPt", Morphology::CentralPit),
    ("CpxPkRg", Morphology::PeakRing),
    ("PkRg", Morphology::PeakRing),
    ("CpxSuPt", Morphology::SummitPit),
    ("SuPt", Morphology::SummitPit),
    ("CpxUnc", Morphology::Uncertain),
    ("Unc", Morphology::Uncertain),
    ("CpxFF", Morphology::FlatFloor),
    ("Bsn", Morphology::Basin),
    ("Smp", Morphology::Simple),
];

/// Every code the alias table recognizes, in table order.
pub fn known_morphology_codes() -> impl Iterator<Item = &'static str> {
    ALIASES.iter().map(|(code, _)| *code)
}

/// Resolve a raw morphology code. Matching is exact and case-sensitive; only `""` is unclassified.
pub fn resolve_morphology(code: &str) -> Morphology {
    if code.is_empty() {
        return Morphology::None;
    }
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == code)
        .map(|(_, m)| m.clone())
        .unwrap_or_else(|| Morphology::Unknown(code.to_owned()))
}

impl Morphology {
    /// Canonical asset name, e.g. `CpxPkRg`. `None` for an empty code.
    pub fn canonical_code(&self) -> Option<&str> {
        Some(match self {
            Self::None => return None,
            Self::CentralMound => "CpxCMa",
            Self::CentralPeak => "CpxCpk",
            Self::CentralPit => "CpxCpt",
            Self::PeakRing => "CpxPkRg",
            Self::SummitPit => "CpxSuPt",
            Self::Uncertain => "CpxUnc",
            Self::FlatFloor => "CpxFF",
            Self::Basin => "Bsn",
            Self::Simple => "Smp",
            Self::Unknown(raw) => raw.as_str(),
        })
    }

    /// Flat-floor, basin and simple craters have no interior-structure layer.
    pub fn excludes_interior(&self) -> bool {
        matches!(
            self,
            Self::None | Self::FlatFloor | Self::Basin | Self::Simple
        )
    }

    /// Asset name for the interior-structure layer, when one is drawn.
    pub fn interior_asset_name(&self) -> Option<&str> {
        if self.excludes_interior() {
            None
        } else {
            self.canonical_code()
        }
    }

    /// True for [`Morphology::Unknown`].
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/morphology.rs"]
mod tests;
