pub(crate) mod generator;
pub(crate) mod registry;
pub(crate) mod rng;
