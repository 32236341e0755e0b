//! Character repository implementation for SQLite
//!
//! Each character is stored as one JSON document. A patch is a read-merge-write
//! inside one transaction. SQLite opens that transaction deferred, so two of them
//! racing on the pool could both read and then fail to upgrade to a write lock
//! with SQLITE_BUSY. Writes through one repository are therefore serialized by
//! `write_lock`. The database file is assumed to have a single writing process.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tokio::sync::Mutex;

use crate::application::ports::outbound::{CharacterRepositoryPort, RepositoryError};
use crate::domain::entities::{Character, Item};
use crate::domain::value_objects::{CharacterId, CharacterPatch, ItemId};

fn db_error(err: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(err.to_string())
}

pub struct SqliteCharacterRepository {
    pool: SqlitePool,
    write_lock: Mutex<()>,
}

impl SqliteCharacterRepository {
    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        // Create table if not exists
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS characters (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                data TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
        "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self {
            pool,
            write_lock: Mutex::new(()),
        })
    }

    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = SqlitePool::connect(database_url).await?;
        Self::new(pool).await
    }

    /// Read a character, change it, write it back in one transaction
    async fn modify<T>(
        &self,
        id: CharacterId,
        change: impl FnOnce(&mut Character) -> T + Send,
    ) -> Result<T, RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let row: Option<(String,)> = sqlx::query_as("SELECT data FROM characters WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error)?;
        let (data,) = row.ok_or(RepositoryError::NotFound(id))?;

        let mut character: Character = serde_json::from_str(&data)?;
        let result = change(&mut character);
        character.updated_at = Utc::now();

        sqlx::query("UPDATE characters SET name = ?, data = ?, updated_at = ? WHERE id = ?")
            .bind(&character.name)
            .bind(serde_json::to_string(&character)?)
            .bind(character.updated_at.to_rfc3339())
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;
        Ok(result)
    }
}

#[async_trait]
impl CharacterRepositoryPort for SqliteCharacterRepository {
    async fn create(&self, character: &Character) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO characters (id, name, data, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(character.id.to_string())
        .bind(&character.name)
        .bind(serde_json::to_string(character)?)
        .bind(character.created_at.to_rfc3339())
        .bind(character.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        tracing::debug!("Created character: {}", character.name);
        Ok(())
    }

    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepositoryError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT data FROM characters WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.map(|(data,)| serde_json::from_str(&data).map_err(RepositoryError::from))
            .transpose()
    }

    async fn list(&self) -> Result<Vec<Character>, RepositoryError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT data FROM characters ORDER BY created_at ASC")
                .fetch_all(&self.pool)
                .await
                .map_err(db_error)?;

        rows.into_iter()
            .map(|(data,)| serde_json::from_str(&data).map_err(RepositoryError::from))
            .collect()
    }

    async fn delete(&self, id: CharacterId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM characters WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn apply_patch(
        &self,
        id: CharacterId,
        patch: &CharacterPatch,
    ) -> Result<(), RepositoryError> {
        self.modify(id, |character| patch.apply(character)).await?;
        tracing::debug!(character_id = %id, "Applied patch: {:?}", patch.touched_fields());
        Ok(())
    }

    async fn add_item(&self, id: CharacterId, item: &Item) -> Result<(), RepositoryError> {
        let item = item.clone();
        self.modify(id, move |character| character.add_item(item))
            .await
    }

    async fn remove_item(&self, id: CharacterId, item_id: ItemId) -> Result<bool, RepositoryError> {
        self.modify(id, |character| character.remove_item(item_id).is_some())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ItemType;
    use crate::domain::value_objects::{DieSize, IntoxicationStage, SkillKey};
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::sync::Arc;

    async fn repository() -> SqliteCharacterRepository {
        // One connection, otherwise every connection opens its own empty in-memory database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        SqliteCharacterRepository::new(pool).await.unwrap()
    }

    async fn shared_cache_repository(name: &str) -> SqliteCharacterRepository {
        let options: SqliteConnectOptions = format!("sqlite:file:{}?mode=memory&cache=shared", name)
            .parse()
            .unwrap();
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .unwrap();
        SqliteCharacterRepository::new(pool).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_get_list_delete() {
        let repo = repository().await;
        let first = Character::new("Anne Bonny", DieSize::D6);
        let second = Character::new("Mary Read", DieSize::D8);
        repo.create(&first).await.unwrap();
        repo.create(&second).await.unwrap();

        let loaded = repo.get(first.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Anne Bonny");
        assert_eq!(loaded.skills, first.skills);

        assert_eq!(repo.list().await.unwrap().len(), 2);

        assert!(repo.delete(first.id).await.unwrap());
        assert!(!repo.delete(first.id).await.unwrap());
        assert!(repo.get(first.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_apply_patch_merges_changed_fields() {
        let repo = repository().await;
        let before = Character::new("Anne Bonny", DieSize::D8);
        repo.create(&before).await.unwrap();

        let after = before
            .clone()
            .map_skill(SkillKey::Sea, |s| s.reduce_die())
            .drink();
        let patch = CharacterPatch::diff(&before, &after);
        repo.apply_patch(before.id, &patch).await.unwrap();

        let stored = repo.get(before.id).await.unwrap().unwrap();
        assert_eq!(stored.condition.intoxication, IntoxicationStage::Dizzy);
        // Unwounded, so the drink restored it.
        assert_eq!(stored.skills[&SkillKey::Sea].value, DieSize::D8);
        assert_eq!(stored.name, "Anne Bonny");
    }

    #[tokio::test]
    async fn test_patch_unknown_character() {
        let repo = repository().await;
        let err = repo
            .apply_patch(CharacterId::new(), &CharacterPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_items() {
        let repo = repository().await;
        let character = Character::new("Anne Bonny", DieSize::D6);
        repo.create(&character).await.unwrap();

        let item = crate::domain::entities::Item::new("Cutlass", ItemType::Weapon);
        repo.add_item(character.id, &item).await.unwrap();
        let stored = repo.get(character.id).await.unwrap().unwrap();
        assert_eq!(stored.items.len(), 1);

        assert!(repo.remove_item(character.id, item.id).await.unwrap());
        assert!(!repo.remove_item(character.id, item.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_item_adds_all_land() {
        let repo = Arc::new(shared_cache_repository("concurrent_item_adds").await);
        let character = Character::new("Anne Bonny", DieSize::D6);
        repo.create(&character).await.unwrap();

        let handles: Vec<_> = (0..8)
            .map(|n| {
                let repo = Arc::clone(&repo);
                let item = Item::new(format!("Pistol {}", n), ItemType::Weapon);
                tokio::spawn(async move { repo.add_item(character.id, &item).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = repo.get(character.id).await.unwrap().unwrap();
        assert_eq!(stored.items.len(), 8);
    }
}
