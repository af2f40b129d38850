// Infrastructure layer - External dependencies and adapters
pub mod canvas_surface;
pub mod chunked_json;
pub mod config;
pub mod http_repository;
pub mod http_response;
