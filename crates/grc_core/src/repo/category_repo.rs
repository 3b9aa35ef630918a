use super::{parse_epoch_ms, parse_uuid, RepoError, RepoResult, ResourceRepository};
use crate::model::category::Category;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const CATEGORY_SELECT_SQL: &str = "SELECT uuid, name, created_at, updated_at FROM categories";

pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ResourceRepository<Category> for SqliteCategoryRepository<'_> {
    fn create(&self, record: &Category) -> RepoResult<Uuid> {
        self.conn.execute(
            "INSERT INTO categories (uuid, name) VALUES (?1, ?2);",
            params![record.uuid.to_string(), record.name.as_str()],
        )?;
        Ok(record.uuid)
    }

    fn update(&self, record: &Category) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE categories
             SET name = ?1, updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?2;",
            params![record.name.as_str(), record.uuid.to_string()],
        )?;
        if changed == 0 {
            return Err(not_found(record.uuid));
        }
        Ok(())
    }

    fn get(&self, id: Uuid) -> RepoResult<Option<Category>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CATEGORY_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_category_row(row)?)),
            None => Ok(None),
        }
    }

    fn list(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CATEGORY_SELECT_SQL} ORDER BY updated_at DESC, name ASC, uuid ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }
        Ok(categories)
    }

    fn delete(&self, id: Uuid) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM categories WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

fn not_found(id: Uuid) -> RepoError {
    RepoError::NotFound {
        resource: "category",
        id,
    }
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    let uuid_text: String = row.get("uuid")?;
    Ok(Category {
        uuid: parse_uuid("categories", &uuid_text)?,
        name: row.get("name")?,
        created_at: Some(parse_epoch_ms("categories.created_at", row.get("created_at")?)?),
        updated_at: Some(parse_epoch_ms("categories.updated_at", row.get("updated_at")?)?),
    })
}
