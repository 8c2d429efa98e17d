pub(crate) mod cycle;
pub(crate) mod ease;
pub(crate) mod interp;
pub(crate) mod spring;
