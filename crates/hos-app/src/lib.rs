//! Application service layer - trip planning, config, export, logging

pub mod app;
pub mod config;
pub mod export;
pub mod logging;
pub mod providers;
