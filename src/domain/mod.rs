// Domain layer - Core business models
pub mod chart;
pub mod dashboard;
pub mod metrics;
pub mod notification;
pub mod report;
pub mod summary;
pub mod theme;
