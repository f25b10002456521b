use std::sync::Arc;

use anyhow::Context;

use crate::{
    assets::builtin::BuiltinSilhouettes,
    foundation::error::{GlyphResult, Recovery},
};

/// Family of silhouette outlines, one per layer role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SilhouetteKind {
    /// Floor outline under every other layer.
    Floor,
    /// Ejecta ring outline, named by ejecta morphology code.
    Ejecta,
    /// Crater rim.
    Rim,
    /// Ground plane.
    Ground,
    /// Interior structure, named by canonical morphology code.
    Interior,
    /// Substitutes for unresolved keys.
    Fallback,
}

impl SilhouetteKind {
    /// All kinds, in directory scan order.
    pub const ALL: [Self; 6] = [
        Self::Floor,
        Self::Ejecta,
        Self::Rim,
        Self::Ground,
        Self::Interior,
        Self::Fallback,
    ];

    /// Directory name used by [`crate::SvgDirectory`] and the `kind/name` display form.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Floor => "floor",
            Self::Ejecta => "ejecta",
            Self::Rim => "rim",
            Self::Ground => "ground",
            Self::Interior => "interior",
            Self::Fallback => "fallback",
        }
    }
}

/// Identity of a silhouette asset: a kind plus a name within that kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AssetKey {
    /// Silhouette family.
    pub kind: SilhouetteKind,
    /// Name within the family, e.g. `CpxPkRg`.
    pub name: String,
}

impl AssetKey {
    /// Build a key.
    pub fn new(kind: SilhouetteKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// The documented substitute for unresolvable keys (`fallback/unknown`).
    pub fn unknown() -> Self {
        Self::new(SilhouetteKind::Fallback, "unknown")
    }
}

impl std::fmt::Display for AssetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.kind.dir_name(), self.name)
    }
}

/// A parsed vector outline defining a layer's fillable and maskable region.
#[derive(Clone)]
pub struct Silhouette {
    tree: Arc<usvg::Tree>,
}

impl std::fmt::Debug for Silhouette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let size = self.tree.size();
        f.debug_struct("Silhouette")
            .field("width", &size.width())
            .field("height", &size.height())
            .finish()
    }
}

impl Silhouette {
    /// Parse SVG bytes into a silhouette.
    pub fn from_svg_bytes(bytes: &[u8]) -> GlyphResult<Self> {
        let opts = usvg::Options::default();
        let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
        Ok(Self {
            tree: Arc::new(tree),
        })
    }

    /// Parse an SVG document string into a silhouette.
    pub fn from_svg_str(svg: &str) -> GlyphResult<Self> {
        Self::from_svg_bytes(svg.as_bytes())
    }

    /// Intrinsic `(width, height)` of the document.
    pub fn size(&self) -> (f32, f32) {
        let size = self.tree.size();
        (size.width(), size.height())
    }

    pub(crate) fn tree(&self) -> &usvg::Tree {
        &self.tree
    }
}

/// Resolves asset keys to silhouettes.
///
/// Implementations return `None` for keys they do not know; substitution of the fallback
/// silhouette is the compositor's job, never the source's.
pub trait SilhouetteSource: Send + Sync {
    /// Look up `key`.
    fn resolve(&self, key: &AssetKey) -> Option<Silhouette>;
}

/// Ordered stack of silhouette sources over the built-in geometry.
///
/// Overlays are consulted first (most recently added first), then the built-ins. The
/// `fallback/unknown` silhouette is always available.
#[derive(Clone)]
pub struct SilhouetteLibrary {
    overlays: Vec<Arc<dyn SilhouetteSource>>,
    builtin: Arc<BuiltinSilhouettes>,
    unknown: Silhouette,
}

impl std::fmt::Debug for SilhouetteLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SilhouetteLibrary")
            .field("overlays", &self.overlays.len())
            .finish()
    }
}

impl SilhouetteLibrary {
    /// Library containing only the built-in geometry.
    pub fn builtin() -> GlyphResult<Self> {
        let builtin = BuiltinSilhouettes::new()?;
        let unknown = builtin.unknown();
        Ok(Self {
            overlays: Vec::new(),
            builtin: Arc::new(builtin),
            unknown,
        })
    }

    /// Add a source consulted before every previously added one.
    pub fn with_overlay(mut self, source: impl SilhouetteSource + 'static) -> Self {
        self.overlays.insert(0, Arc::new(source));
        self
    }

    /// Resolve `key`, substituting `fallback/unknown` when nothing matches.
    pub fn resolve_or_fallback(&self, key: &AssetKey) -> (Silhouette, Option<Recovery>) {
        if let Some(found) = self.resolve(key) {
            return (found, None);
        }
        tracing::debug!(%key, "silhouette missing, using fallback");
        (
            self.unknown.clone(),
            Some(Recovery::MissingAssetReference {
                key: key.to_string(),
                fallback: AssetKey::unknown().to_string(),
            }),
        )
    }
}

impl SilhouetteSource for SilhouetteLibrary {
    fn resolve(&self, key: &AssetKey) -> Option<Silhouette> {
        self.overlays
            .iter()
            .find_map(|s| s.resolve(key))
            .or_else(|| self.builtin.resolve(key))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/silhouette.rs"]
mod tests;
