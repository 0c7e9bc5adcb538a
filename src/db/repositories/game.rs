use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::entities::{games, prelude::*};
use crate::models::{Game, NewGame};

/// Repository for game catalog operations
pub struct GameRepository {
    conn: DatabaseConnection,
}

impl GameRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_game_model(m: games::Model) -> Game {
        Game {
            id: m.id,
            publisher_id: m.publisher_id,
            name: m.name,
            platform: m.platform,
            store_id: m.store_id,
            bundle_id: m.bundle_id,
            app_version: m.app_version,
            is_published: m.is_published,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }

    fn active_model(fields: &NewGame, now: &str) -> games::ActiveModel {
        games::ActiveModel {
            publisher_id: Set(fields.publisher_id.clone()),
            name: Set(fields.name.clone()),
            platform: Set(fields.platform.clone()),
            store_id: Set(fields.store_id.clone()),
            bundle_id: Set(fields.bundle_id.clone()),
            app_version: Set(fields.app_version.clone()),
            is_published: Set(fields.is_published),
            created_at: Set(Some(now.to_string())),
            updated_at: Set(Some(now.to_string())),
            ..Default::default()
        }
    }

    pub async fn list(&self) -> Result<Vec<Game>> {
        let rows = Games::find()
            .order_by_asc(games::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_game_model).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<Game>> {
        let row = Games::find_by_id(id).one(&self.conn).await?;
        Ok(row.map(Self::map_game_model))
    }

    pub async fn create(&self, fields: &NewGame) -> Result<Game> {
        let now = Utc::now().to_rfc3339();
        let inserted = Self::active_model(fields, &now).insert(&self.conn).await?;
        Ok(Self::map_game_model(inserted))
    }

    pub async fn bulk_create(&self, games: &[NewGame]) -> Result<u64> {
        if games.is_empty() {
            return Ok(0);
        }

        let now = Utc::now().to_rfc3339();
        let rows: Vec<games::ActiveModel> = games
            .iter()
            .map(|fields| Self::active_model(fields, &now))
            .collect();

        Games::insert_many(rows).exec(&self.conn).await?;
        info!("Bulk inserted {} games", games.len());

        Ok(games.len() as u64)
    }

    /// Replaces the six mutable fields and the published flag. Omitted
    /// optional fields become NULL; `id` and `created_at` never change.
    pub async fn update(&self, id: i32, fields: &NewGame) -> Result<Option<Game>> {
        let Some(existing) = Games::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut model: games::ActiveModel = existing.into();
        model.publisher_id = Set(fields.publisher_id.clone());
        model.name = Set(fields.name.clone());
        model.platform = Set(fields.platform.clone());
        model.store_id = Set(fields.store_id.clone());
        model.bundle_id = Set(fields.bundle_id.clone());
        model.app_version = Set(fields.app_version.clone());
        model.is_published = Set(fields.is_published);
        model.updated_at = Set(Some(Utc::now().to_rfc3339()));

        let updated = model.update(&self.conn).await?;
        Ok(Some(Self::map_game_model(updated)))
    }

    pub async fn remove(&self, id: i32) -> Result<bool> {
        let result = Games::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn search(&self, name: &str, platform: Option<&str>) -> Result<Vec<Game>> {
        let mut query = Games::find().filter(games::Column::Name.contains(name));

        if let Some(platform) = platform {
            query = query.filter(games::Column::Platform.eq(platform));
        }

        let rows = query
            .order_by_asc(games::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_game_model).collect())
    }
}
