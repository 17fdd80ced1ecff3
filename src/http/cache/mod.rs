//! HTTP cache control module
//!
//! Builds `Cache-Control` and `Expires` response headers from declarative
//! directives.

mod directives;
mod expires;

pub use directives::{
    build, Directive, DirectiveSet, DirectiveValue, Directives, Entry, FlagName, ValueName,
};
pub use expires::{http_date, Expires};
