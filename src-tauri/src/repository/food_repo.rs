//! Food Repository Implementation
//!
//! SQLite-backed implementation of Repository<Food>. Each food is one JSON
//! document keyed by id.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashSet;

use super::db::DbConn;
use super::traits::Repository;
use crate::domain::{DomainError, DomainResult, Food};

/// SQLite implementation of Food repository
pub struct FoodRepository {
    conn: DbConn,
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn load(conn: &Connection, id: &str) -> DomainResult<Option<Food>> {
    let doc: Option<String> = conn
        .query_row("SELECT doc FROM foods WHERE id = ?1", params![id], |row| row.get(0))
        .optional()?;
    Ok(match doc {
        Some(doc) => Some(serde_json::from_str(&doc)?),
        None => None,
    })
}

fn store(conn: &Connection, food: &Food) -> DomainResult<usize> {
    let doc = serde_json::to_string(food)?;
    Ok(conn.execute(
        "UPDATE foods SET doc = ?1, updated_at = ?2 WHERE id = ?3",
        params![doc, now(), food.id],
    )?)
}

impl FoodRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    /// Partial update of the availability flag only
    pub async fn set_availability(&self, id: &str, available: bool) -> DomainResult<Food> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        let mut food = load(&tx, id)?.ok_or_else(|| DomainError::NotFound(format!("food {}", id)))?;
        food.available = available;
        store(&tx, &food)?;
        tx.commit()?;
        Ok(food)
    }

    /// Image URIs referenced by any stored food
    pub async fn referenced_images(&self) -> DomainResult<HashSet<String>> {
        Ok(self.list().await?.into_iter().map(|f| f.image).collect())
    }
}

#[async_trait]
impl Repository<Food> for FoodRepository {
    async fn create(&self, entity: &Food) -> DomainResult<Food> {
        entity.validate()?;
        let conn = self.conn.lock().await;
        let doc = serde_json::to_string(entity)?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO foods (id, doc, updated_at) VALUES (?1, ?2, ?3)",
            params![entity.id, doc, now()],
        )?;
        if inserted == 0 {
            return Err(DomainError::Conflict(format!("food {} already exists", entity.id)));
        }
        Ok(entity.clone())
    }

    async fn find_by_id(&self, id: &String) -> DomainResult<Option<Food>> {
        let conn = self.conn.lock().await;
        load(&conn, id)
    }

    async fn list(&self) -> DomainResult<Vec<Food>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare("SELECT doc FROM foods ORDER BY seq ASC")?;
        let docs = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut foods = Vec::new();
        for doc in docs {
            foods.push(serde_json::from_str(&doc?)?);
        }
        Ok(foods)
    }

    async fn update(&self, entity: &Food) -> DomainResult<Food> {
        entity.validate()?;
        let conn = self.conn.lock().await;
        if store(&conn, entity)? == 0 {
            return Err(DomainError::NotFound(format!("food {}", entity.id)));
        }
        Ok(entity.clone())
    }

    async fn delete(&self, id: &String) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let removed = conn.execute("DELETE FROM foods WHERE id = ?1", params![id])?;
        if removed == 0 {
            return Err(DomainError::NotFound(format!("food {}", id)));
        }
        Ok(())
    }
}
