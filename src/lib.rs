//! Wildperm: hierarchical, wildcard-capable permission matching.
//!
//! A permission is a delimited name such as `files.read.reports`. A subject
//! holds **permissions**; an action requests one. Wildperm decides whether a
//! held permission, or a whole [`PermissionSet`], **grants** the request.
//!
//! - An exact permission grants only its own name.
//! - A wildcard permission treats the wildcard segment (`*` by default) as
//!   matching any single segment, and a trailing wildcard as matching any
//!   number of further segments.
//!
//! # Example
//!
//! ```
//! use wildperm::{Permission, PermissionSet};
//!
//! let held: PermissionSet = [
//!     // Everything under files.read
//!     Permission::wildcard("files.read.*"),
//!     // One specific write
//!     Permission::new("files.write.reports"),
//! ]
//! .into_iter()
//! .collect();
//!
//! assert!(held.grants_permission("files.read.reports"));
//! assert!(held.grants_permission("files.read.reports.2024"));
//! assert!(held.grants_permission("files.write.reports"));
//! assert!(!held.grants_permission("files.write.invoices"));
//!
//! // Inverse query: does the subject hold anything under files.write?
//! assert!(held.has_any_permission("files.write.*"));
//! ```

mod error;
mod factory;
mod matching;
mod options;
mod permission;
mod set;

pub use error::PermissionError;
pub use factory::PermissionFactory;
pub use options::{DEFAULT_DELIMITER, DEFAULT_WILDCARD, PermissionOptions};
pub use permission::{MatchKind, Permission, PermissionRef, as_wildcard_permission};
pub use set::PermissionSet;
