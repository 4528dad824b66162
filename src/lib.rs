//! Notes Dashboard library
//!
//! Note stores, the version history viewer and the egui pages built on them.

pub mod app;
pub mod backend;
pub mod config;
pub mod constant;
pub mod messages;
pub mod models;
pub mod notify;
pub mod style;
pub mod ui;
pub mod worker;
