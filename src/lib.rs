//! Bukubridge: keeps a local bookmark cache in step with a buku native
//! messaging host.
//!
//! This library crate exposes all modules for use by embedders and integration tests.

pub mod app;
pub mod database;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod services;
pub mod types;
