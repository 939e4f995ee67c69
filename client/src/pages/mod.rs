//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates shared chrome to
//! `components`. Access control lives in `app::Guarded`, not in pages.

pub mod chat;
pub mod home;
pub mod login;
pub mod register;
pub mod subscription;
