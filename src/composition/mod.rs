pub(crate) mod finger_family;
pub(crate) mod fingerprint;
pub(crate) mod registry;
pub(crate) mod schema;
