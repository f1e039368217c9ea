//! Terminal front end for the proxy admin tables.
//!
//! Loads a JSON snapshot of one collection, drives a table session from
//! command-line flags and renders it as text.

pub mod args;
pub mod error;
pub mod paths;
pub mod preferences;
pub mod render;
pub mod session;
