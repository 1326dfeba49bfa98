use tracing::debug;
use validator::Validate;

use crate::{
    dao::models::NewSaveEntity,
    dto::save::{DeleteSaveResponse, LoadSaveResponse, SaveGameRequest, SaveGameResponse},
    error::ServiceError,
    services::integrity,
    state::SharedState,
};

/// Replace a player's cloud save after verifying its integrity digest.
///
/// The digest is recomputed over the canonical serialization of `data` and
/// compared with the caller-supplied checksum before anything touches
/// storage, so a mismatch leaves the prior save untouched.
pub async fn save_game(
    state: &SharedState,
    request: SaveGameRequest,
) -> Result<SaveGameResponse, ServiceError> {
    request.validate()?;

    let expected = integrity::checksum(&request.data);
    if expected != request.checksum {
        debug!(
            player_id = %request.player_id,
            "rejecting save with mismatched checksum"
        );
        return Err(ServiceError::IntegrityMismatch);
    }

    let entity = NewSaveEntity {
        player_id: request.player_id,
        data: request.data,
        checksum: request.checksum,
    };
    state.store().upsert_save(entity).await?;

    Ok(SaveGameResponse { success: true })
}

/// Load a player's current save, failing with `NotFound` when none exists.
pub async fn load_game(
    state: &SharedState,
    player_id: String,
) -> Result<LoadSaveResponse, ServiceError> {
    let Some(save) = state.store().find_save(player_id.clone()).await? else {
        return Err(ServiceError::NotFound(format!(
            "save for player `{player_id}` not found"
        )));
    };

    Ok(save.into())
}

/// Remove a player's save; deleting a missing save also succeeds.
pub async fn delete_save(
    state: &SharedState,
    player_id: String,
) -> Result<DeleteSaveResponse, ServiceError> {
    state.store().delete_save(player_id).await?;
    Ok(DeleteSaveResponse { success: true })
}
