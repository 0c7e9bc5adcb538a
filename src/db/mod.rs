use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::models::{Game, NewGame};

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn game_repo(&self) -> repositories::game::GameRepository {
        repositories::game::GameRepository::new(self.conn.clone())
    }

    pub async fn list_games(&self) -> Result<Vec<Game>> {
        self.game_repo().list().await
    }

    pub async fn get_game(&self, id: i32) -> Result<Option<Game>> {
        self.game_repo().get(id).await
    }

    pub async fn create_game(&self, fields: &NewGame) -> Result<Game> {
        self.game_repo().create(fields).await
    }

    pub async fn bulk_create_games(&self, games: &[NewGame]) -> Result<u64> {
        self.game_repo().bulk_create(games).await
    }

    pub async fn update_game(&self, id: i32, fields: &NewGame) -> Result<Option<Game>> {
        self.game_repo().update(id, fields).await
    }

    pub async fn delete_game(&self, id: i32) -> Result<bool> {
        self.game_repo().remove(id).await
    }

    pub async fn search_games(&self, name: &str, platform: Option<&str>) -> Result<Vec<Game>> {
        self.game_repo().search(name, platform).await
    }
}
