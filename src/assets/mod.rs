pub(crate) mod builtin;
pub(crate) mod directory;
pub(crate) mod silhouette;
