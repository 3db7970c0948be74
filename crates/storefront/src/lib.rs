//! Marigold Storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod debounce;
pub mod error;
pub mod middleware;
pub mod notify;
pub mod query;
pub mod routes;
pub mod state;
