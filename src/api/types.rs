use serde::{Deserialize, Serialize};

use crate::models::{Game, NewGame};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDto {
    pub id: i32,
    pub publisher_id: Option<String>,
    pub name: String,
    pub platform: Option<String>,
    pub store_id: Option<String>,
    pub bundle_id: Option<String>,
    pub app_version: Option<String>,
    pub is_published: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Game> for GameDto {
    fn from(game: Game) -> Self {
        Self {
            id: game.id,
            publisher_id: game.publisher_id,
            name: game.name,
            platform: game.platform,
            store_id: game.store_id,
            bundle_id: game.bundle_id,
            app_version: game.app_version,
            is_published: game.is_published,
            created_at: game.created_at,
            updated_at: game.updated_at,
        }
    }
}

/// Full game payload for create and update. Update replaces every mutable
/// field, so an omitted optional field becomes null on the row.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRequest {
    pub publisher_id: Option<String>,
    pub name: String,
    pub platform: Option<String>,
    pub store_id: Option<String>,
    pub bundle_id: Option<String>,
    pub app_version: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

impl GameRequest {
    #[must_use]
    pub fn into_fields(self) -> NewGame {
        NewGame {
            publisher_id: self.publisher_id,
            name: self.name,
            platform: self.platform,
            store_id: self.store_id,
            bundle_id: self.bundle_id,
            app_version: self.app_version,
            is_published: self.is_published,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchGamesRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub platform: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeletedGameDto {
    pub id: i32,
}
