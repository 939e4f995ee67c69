//! Browser helpers shared by pages and components.
//!
//! SYSTEM CONTEXT
//! ==============
//! `storage` persists the token in `localStorage`; `auth` runs the session
//! guard against router transitions.

pub mod auth;
pub mod storage;
