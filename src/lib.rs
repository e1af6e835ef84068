pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod planner;
pub mod scorer;
pub mod selector;
pub mod templates;
// cmd and reports are binary modules (see main.rs).
