//! # Links
//!
//! Link and embed spans of a document and the lookup from a click position
//! to the span under it.
//!
//! ## Modules
//!
//! - **`span`**: `LinkSpan`, `LinkKind` and the per-document `DocumentLinks`
//! - **`locate`**: first-match lookup of the span under a click, with the
//!   rendered-embed fallback
//! - **`scan`**: builds `DocumentLinks` from markdown text for hosts without
//!   their own link index
//! - **`cursor`** / **`kinds`**: scanner internals

pub mod cursor;
pub mod kinds;
pub mod locate;
pub mod scan;
pub mod span;

pub use locate::{LocatedLink, locate, locate_click};
pub use scan::{scan_buffer, scan_links};
pub use span::{DocumentLinks, LinkKind, LinkSpan};
