//! HTTP protocol layer module
//!
//! Content negotiation building blocks, decoupled from any server loop:
//! weighted header parsing, language and format negotiation, the format
//! registry and Cache-Control assembly.

pub mod accept;
pub mod cache;
pub mod format;
pub mod language;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use accept::WeightedValue;
pub use language::{is_language_accepted, resolve_language};
pub use mime::{Format, FormatRegistry};
pub use response::{apply_negotiation, build_406_response, build_negotiated_response};
