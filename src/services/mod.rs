/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Canonical serialization and content digests for save data.
pub mod integrity;
/// Cloud save persistence with integrity verification.
pub mod save_service;
/// Leaderboard submissions and rank queries.
pub mod score_service;
