//! Data access for the voting UI.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` is the demo backend (auth round trips and election data) and
//! `types` defines the shapes it returns.

pub mod api;
pub mod types;
