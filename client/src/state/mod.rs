//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! Each module holds one reactive model provided through context; today that
//! is only the auth session.

pub mod auth;
