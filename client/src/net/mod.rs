//! Networking modules for the REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` moves requests over `gloo-net`; `api` binds the `session`
//! client and store to the reactive auth state.

pub mod api;
pub mod transport;
