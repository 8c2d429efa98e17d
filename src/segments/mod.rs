pub(crate) mod backdrop;
pub(crate) mod burst;
pub(crate) mod draw;
pub(crate) mod finger;
pub(crate) mod jigsaw;
pub(crate) mod mystery;
pub(crate) mod object;
pub(crate) mod outro;
pub(crate) mod reveal;
