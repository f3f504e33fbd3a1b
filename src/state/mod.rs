//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth`, `ballot`, `nomination`) so pages can
//! depend on small focused models. Only `auth` is application-wide; the
//! wizards live for the lifetime of their page.

pub mod auth;
pub mod ballot;
pub mod nomination;
