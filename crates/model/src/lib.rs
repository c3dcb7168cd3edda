//! vsm-model: Value stream map types and deserialization.
//!
//! Provides the wire structs mirroring the server's VSM JSON payload
//! ([`json`]), the immutable graph built from it ([`types`]), and the
//! page-level entity address used to pick which map to fetch
//! ([`page_meta`]).
//!
//! The entry points are [`parse_vsm`] / [`parse_vsm_str`], which turn a
//! payload into a [`Vsm`], and [`to_vsm_json`], which writes it back out.
//! Parsing is pure: no I/O, no logging.

pub mod deserialize;
pub mod error;
pub mod json;
pub mod page_meta;
pub mod types;

pub use deserialize::{parse_vsm, parse_vsm_str, to_vsm_json};
pub use error::VsmError;
pub use page_meta::{Entity, MaterialMeta, PageMeta, PipelineMeta};
pub use types::*;
