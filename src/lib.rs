//! Insurance-cost dashboard: load a policy-holder table, filter it by range
//! and category, and show the matching rows with charge statistics and
//! histograms.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
