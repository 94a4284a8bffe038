//! softwrap - a soft-wrap line-layout engine
//!
//! This crate computes visual line breaks ("soft wraps") for a text buffer
//! given a swappable width provider and monospace font metrics. Wrapped text
//! may lie inside injected language regions (e.g. HTML embedded in a host
//! file); the content type active at an offset decides which break
//! boundaries are preferred there.
//!
//! Soft wraps are display-only: they are never stored in the underlying text.

pub mod config;
pub mod document;
pub mod engine;
pub mod injection;
pub mod tracing;
pub mod util;
pub mod width;

// Re-export commonly used types
pub use config::WrapConfig;
pub use document::Document;
pub use engine::{LayoutError, SoftWrapEngine, WrapPoint};
pub use injection::{ContentType, Injection, InjectionSet};
pub use width::{ClosureWidthProvider, FixedWidthProvider, FontMetrics, WidthProvider};
