//! HTTP handlers for all web routes.

pub mod pages;
pub mod solve;
pub mod system;

/// Navigation HTML shared across all pages
pub const NAV_HTML: &str = include_str!("../../templates/nav.html");
