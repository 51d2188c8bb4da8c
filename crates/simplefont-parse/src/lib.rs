//! simplefont-parse: loading simple fonts out of a PDF object graph.
//!
//! Reads font dictionaries through the [`ObjectStore`] seam (implemented for
//! [`lopdf::Document`]), parses ToUnicode CMaps, projects font descriptors
//! and hands the results to `simplefont-core` for encoding resolution and
//! text measurement. [`SimpleFont::load`] ties it together.

pub mod cmap;
pub mod descriptor;
pub mod error;
pub mod font_encoding;
pub mod font_metrics;
pub mod object_store;
pub mod simple_font;

pub use cmap::ToUnicodeCMap;
pub use descriptor::{DescriptorProjection, project_descriptor};
pub use error::BackendError;
pub use font_encoding::{is_symbolic, read_encoding_spec};
pub use font_metrics::{char_range, extract_font_metrics};
pub use object_store::{MemoryStore, ObjectStore};
pub use simple_font::SimpleFont;
pub use simplefont_core;
