//! Library entry for shopfront exposing the catalog engine for integration tests.
//!
//! The engine keeps one authoritative filter record, mirrors it into a
//! shareable link, and synchronizes it with an asynchronous catalog service
//! where only the most recent request may update the listing.

pub mod app;
pub mod args;
pub mod error;
pub mod events;
pub mod logic;
pub mod route;
pub mod sources;
pub mod state;
pub mod theme;
pub mod ui;
pub mod util;
