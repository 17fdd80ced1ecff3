//! HTTP content negotiation for web actions
//!
//! Decides, per request, the response format, the language to serve and the
//! `Cache-Control` header value:
//!
//! ```
//! use action_negotiation::{Action, Settings};
//! use hyper::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
//!
//! let settings = Settings::builder().default_language("en-US").build().unwrap();
//!
//! let mut headers = HeaderMap::new();
//! headers.insert(ACCEPT, HeaderValue::from_static("text/html, application/xhtml+xml, */*"));
//! headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("da, en;q=0.6"));
//!
//! let mut action = Action::new(&settings, &headers);
//! assert_eq!(action.format().as_str(), "html");
//! assert_eq!(action.content_type(), "text/html; charset=utf-8");
//! assert_eq!(action.language(), "da");
//!
//! action.cache_control(["public", "no_cache"]);
//! assert_eq!(action.directives().header_value(), "public, no-cache");
//! ```

pub mod action;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;

pub use action::Action;
pub use crate::config::{Config, Settings};
pub use controller::Controller;
pub use error::{Error, Result, UnknownFormatError};
