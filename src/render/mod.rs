pub(crate) mod blend;
pub(crate) mod compositor;
pub(crate) mod flatten;
pub(crate) mod mask;
