pub(crate) mod builder;
pub(crate) mod duration;
pub(crate) mod spec;
