/// Health probe payloads.
pub mod health;
/// Cloud save request and response payloads.
pub mod save;
/// Leaderboard request and response payloads.
pub mod score;
/// Validation helpers shared by DTOs.
pub mod validation;
