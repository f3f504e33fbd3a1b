//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (fetching demo data, driving a
//! wizard, calling the session store) and delegates shared chrome to
//! `components`.

pub mod admin;
pub mod elections;
pub mod home;
pub mod login;
pub mod nominate;
pub mod register;
pub mod results;
pub mod verify_otp;
pub mod voting_booth;
