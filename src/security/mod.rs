//! Destination policy subsystem.
//!
//! # Data Flow
//! ```text
//! Decoded destination URL
//!     → access_control.rs (host allow-list)
//!     → [upstream fetch]
//!     → mime.rs (content-type allow-list)
//! ```
//!
//! # Design Decisions
//! - Policies are built once from config and never mutated
//! - Empty allow-list = unrestricted; anything else fails closed

pub mod access_control;
pub mod mime;

pub use access_control::HostAllowList;
pub use mime::{InvalidMimePattern, MimeAllowList, MimePattern};
