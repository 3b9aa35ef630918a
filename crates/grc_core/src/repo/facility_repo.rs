use super::{parse_epoch_ms, parse_uuid, RepoError, RepoResult, ResourceRepository};
use crate::model::facility::{Facility, FacilityStatus};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const FACILITY_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    slug,
    status,
    description,
    notes,
    reference_url,
    start_date,
    end_date,
    created_at,
    updated_at
FROM facilities";

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct SqliteFacilityRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFacilityRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ResourceRepository<Facility> for SqliteFacilityRepository<'_> {
    fn create(&self, record: &Facility) -> RepoResult<Uuid> {
        self.conn.execute(
            "INSERT INTO facilities (
                uuid,
                title,
                slug,
                status,
                description,
                notes,
                reference_url,
                start_date,
                end_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                record.uuid.to_string(),
                record.title.as_str(),
                record.slug.as_deref(),
                record.status.as_str(),
                record.description.as_deref(),
                record.notes.as_deref(),
                record.reference_url.as_deref(),
                record.start_date.map(date_to_db),
                record.end_date.map(date_to_db),
            ],
        )?;
        Ok(record.uuid)
    }

    fn update(&self, record: &Facility) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE facilities
             SET
                title = ?1,
                slug = ?2,
                status = ?3,
                description = ?4,
                notes = ?5,
                reference_url = ?6,
                start_date = ?7,
                end_date = ?8,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?9;",
            params![
                record.title.as_str(),
                record.slug.as_deref(),
                record.status.as_str(),
                record.description.as_deref(),
                record.notes.as_deref(),
                record.reference_url.as_deref(),
                record.start_date.map(date_to_db),
                record.end_date.map(date_to_db),
                record.uuid.to_string(),
            ],
        )?;
        if changed == 0 {
            return Err(not_found(record.uuid));
        }
        Ok(())
    }

    fn get(&self, id: Uuid) -> RepoResult<Option<Facility>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{FACILITY_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_facility_row(row)?)),
            None => Ok(None),
        }
    }

    fn list(&self) -> RepoResult<Vec<Facility>> {
        let mut stmt = self.conn.prepare(&format!(
            "{FACILITY_SELECT_SQL} ORDER BY updated_at DESC, title ASC, uuid ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut facilities = Vec::new();
        while let Some(row) = rows.next()? {
            facilities.push(parse_facility_row(row)?);
        }
        Ok(facilities)
    }

    fn delete(&self, id: Uuid) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM facilities WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

fn not_found(id: Uuid) -> RepoError {
    RepoError::NotFound {
        resource: "facility",
        id,
    }
}

fn parse_facility_row(row: &Row<'_>) -> RepoResult<Facility> {
    let uuid_text: String = row.get("uuid")?;
    let status_text: String = row.get("status")?;
    let status = FacilityStatus::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid status `{status_text}` in facilities.status"))
    })?;

    Ok(Facility {
        uuid: parse_uuid("facilities", &uuid_text)?,
        title: row.get("title")?,
        slug: row.get("slug")?,
        status,
        description: row.get("description")?,
        notes: row.get("notes")?,
        reference_url: row.get("reference_url")?,
        start_date: parse_date_column(row, "start_date")?,
        end_date: parse_date_column(row, "end_date")?,
        created_at: Some(parse_epoch_ms("facilities.created_at", row.get("created_at")?)?),
        updated_at: Some(parse_epoch_ms("facilities.updated_at", row.get("updated_at")?)?),
    })
}

fn parse_date_column(row: &Row<'_>, column: &str) -> RepoResult<Option<NaiveDate>> {
    match row.get::<_, Option<String>>(column)? {
        Some(text) => NaiveDate::parse_from_str(&text, DATE_FORMAT)
            .map(Some)
            .map_err(|_| RepoError::InvalidData(format!("invalid date `{text}` in facilities.{column}"))),
        None => Ok(None),
    }
}

fn date_to_db(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
