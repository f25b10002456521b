use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    assets::silhouette::{AssetKey, Silhouette, SilhouetteKind, SilhouetteSource},
    foundation::error::{GlyphError, GlyphResult},
};

/// Silhouettes loaded from an SVG directory tree.
///
/// Layout: `<root>/<kind>/<name>.svg`, where `<kind>` is one of `floor`, `ejecta`, `rim`,
/// `ground`, `interior`, `fallback` (see [`SilhouetteKind::dir_name`]). The rim and ground
/// outlines are `rim/rim.svg` and `ground/ground.svg`.
///
/// All IO and parsing happens in [`SvgDirectory::load`]; resolution afterwards is a map lookup.
/// Files that fail to parse are skipped with a warning so one broken asset does not take the
/// whole set down.
#[derive(Clone, Debug)]
pub struct SvgDirectory {
    root: PathBuf,
    silhouettes: HashMap<AssetKey, Silhouette>,
}

impl SvgDirectory {
    /// Scan and parse every silhouette under `root`.
    #[tracing::instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn load(root: impl AsRef<Path>) -> GlyphResult<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(GlyphError::validation(format!(
                "silhouette root '{}' is not a directory",
                root.display()
            )));
        }

        let mut silhouettes = HashMap::new();
        for kind in SilhouetteKind::ALL {
            let dir = root.join(kind.dir_name());
            let Ok(rd) = std::fs::read_dir(&dir) else {
                continue;
            };
            for entry in rd.flatten() {
                let path = entry.path();
                if !is_svg_file(&path) {
                    continue;
                }
                let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                match read_silhouette(&path) {
                    Ok(s) => {
                        silhouettes.insert(AssetKey::new(kind, name), s);
                    }
                    Err(err) => {
                        tracing::warn!(path = %path.display(), error = %err, "skipping silhouette");
                    }
                }
            }
        }

        tracing::debug!(count = silhouettes.len(), "loaded silhouettes");
        Ok(Self { root, silhouettes })
    }

    /// Directory the silhouettes were loaded from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of loaded silhouettes.
    pub fn len(&self) -> usize {
        self.silhouettes.len()
    }

    /// True when no silhouette was loaded.
    pub fn is_empty(&self) -> bool {
        self.silhouettes.is_empty()
    }
}

impl SilhouetteSource for SvgDirectory {
    fn resolve(&self, key: &AssetKey) -> Option<Silhouette> {
        self.silhouettes.get(key).cloned()
    }
}

fn is_svg_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

fn read_silhouette(path: &Path) -> GlyphResult<Silhouette> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read silhouette bytes from '{}'", path.display()))?;
    Silhouette::from_svg_bytes(&bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/directory.rs"]
mod tests;
