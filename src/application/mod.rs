// Application layer - Use cases and ports
pub mod chart_builder;
pub mod chart_registry;
pub mod chart_surface;
pub mod fetch_error;
pub mod lifecycle;
pub mod notification_service;
pub mod stats_repository;
pub mod stats_service;
