//! Reusable UI components shared by the route pages.
//!
//! ARCHITECTURE
//! ============
//! Components read application state from context and stay free of
//! page-specific data fetching.

pub mod loading_spinner;
pub mod nav_bar;
pub mod route_guard;
