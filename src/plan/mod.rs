pub(crate) mod morphology;
pub(crate) mod palette;
pub(crate) mod planner;
