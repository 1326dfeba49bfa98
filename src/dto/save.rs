use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::dao::models::SaveEntity;
use crate::dto::validation::validate_checksum;

/// Payload used to replace a player's cloud save.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SaveGameRequest {
    /// Player the save belongs to.
    #[validate(length(min = 1))]
    pub player_id: String,
    /// Authoritative game state, an arbitrary JSON document.
    #[schema(value_type = Object)]
    pub data: Value,
    /// MD5 hex digest of the canonical serialization of `data`.
    ///
    /// The canonicalization algorithm is a shared contract with the game
    /// client; see [`crate::services::integrity`].
    #[validate(custom(function = "validate_checksum"))]
    pub checksum: String,
}

/// Acknowledgement returned after a successful save.
#[derive(Debug, Serialize, ToSchema)]
pub struct SaveGameResponse {
    /// Always true when the save was written.
    pub success: bool,
}

/// A player's current cloud save.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoadSaveResponse {
    /// Player the save belongs to.
    pub player_id: String,
    /// The stored game state.
    #[schema(value_type = Object)]
    pub data: Value,
    /// RFC 3339 timestamp of the last successful write.
    pub updated_at: String,
}

impl From<SaveEntity> for LoadSaveResponse {
    fn from(value: SaveEntity) -> Self {
        Self {
            player_id: value.player_id,
            data: value.data,
            updated_at: value.updated_at,
        }
    }
}

/// Acknowledgement returned after a delete, present or not.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteSaveResponse {
    /// Always true; deleting a missing save also succeeds.
    pub success: bool,
}
