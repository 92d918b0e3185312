//! stepwise-web: HTTP front end for the Stepwise solution generator.
//! Provides:
//!   - JSON API: submit a problem, list history, fetch one record
//!   - Server-rendered solver page with history browser
//!   - Live events for history refresh

pub mod config;
pub mod router;
pub mod handlers;
pub mod state;
pub mod sse;
