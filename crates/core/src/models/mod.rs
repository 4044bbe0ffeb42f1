pub mod analytics;
pub mod asset;
pub mod chart;
pub mod holding;
pub mod portfolio;
pub mod report;
pub mod settings;
