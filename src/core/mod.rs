//! Core processing building blocks: crop planning, resizing and the thumbnail
//! generator, plus the serializable options. These are the primitives consumed
//! by the `field` and high-level `api` modules.
pub mod params;
pub mod processing;
