pub mod catalog;
pub mod clients;
pub mod config;
pub mod error;
pub mod export;
pub mod formatter;
pub mod ranking;
pub mod report;
pub mod scoring;
pub mod session;
pub mod telemetry;
pub mod tui;

