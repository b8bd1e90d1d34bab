//! Row-to-domain conversion helpers shared by the `SQLite` repositories.

use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use kbadmin_core::{DocIndex, IndexDocument, RepositoryError, SearchTemplate};

pub(crate) const INDEX_SELECT_COLUMNS: &str =
    "id, index_name, roles_allowed, is_in_vector_store, created_at, updated_at";

pub(crate) const DOCUMENT_SELECT_COLUMNS: &str =
    "id, index_id, file_name, file_url, is_in_vector_store, created_at";

pub(crate) const TEMPLATE_SELECT_COLUMNS: &str =
    "id, template_name, roles_assigned, prompt_content, created_by, created_at, updated_at";

/// Parse a timestamp column. SQLite's `datetime('now')` default writes
/// `YYYY-MM-DD HH:MM:SS`; RFC 3339 is accepted as well.
pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, RepositoryError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| RepositoryError::Serialization(format!("invalid timestamp '{raw}': {e}")))
}

fn parse_optional_timestamp(
    raw: Option<String>,
) -> Result<Option<DateTime<Utc>>, RepositoryError> {
    raw.map(|value| parse_timestamp(&value)).transpose()
}

fn get_column<'r, T>(row: &'r SqliteRow, column: &str) -> Result<T, RepositoryError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(column)
        .map_err(|e| RepositoryError::Storage(format!("column '{column}': {e}")))
}

pub(crate) fn row_to_index(row: &SqliteRow) -> Result<DocIndex, RepositoryError> {
    let created_at: String = get_column(row, "created_at")?;
    let updated_at: Option<String> = get_column(row, "updated_at")?;
    Ok(DocIndex {
        id: get_column(row, "id")?,
        index_name: get_column(row, "index_name")?,
        roles_allowed: get_column(row, "roles_allowed")?,
        synced: get_column(row, "is_in_vector_store")?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_optional_timestamp(updated_at)?,
    })
}

pub(crate) fn row_to_document(row: &SqliteRow) -> Result<IndexDocument, RepositoryError> {
    let created_at: String = get_column(row, "created_at")?;
    Ok(IndexDocument {
        id: get_column(row, "id")?,
        index_id: get_column(row, "index_id")?,
        file_name: get_column(row, "file_name")?,
        file_url: get_column(row, "file_url")?,
        synced: get_column(row, "is_in_vector_store")?,
        created_at: parse_timestamp(&created_at)?,
    })
}

pub(crate) fn row_to_template(row: &SqliteRow) -> Result<SearchTemplate, RepositoryError> {
    let created_at: String = get_column(row, "created_at")?;
    let updated_at: Option<String> = get_column(row, "updated_at")?;
    Ok(SearchTemplate {
        id: get_column(row, "id")?,
        template_name: get_column(row, "template_name")?,
        roles_assigned: get_column(row, "roles_assigned")?,
        prompt_content: get_column(row, "prompt_content")?,
        created_by: get_column(row, "created_by")?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_optional_timestamp(updated_at)?,
    })
}

/// Map an insert/update failure, surfacing unique-index violations as
/// `AlreadyExists` so callers can distinguish duplicates from outages.
pub(crate) fn map_write_error(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return RepositoryError::AlreadyExists(what.to_string());
        }
    }
    RepositoryError::Storage(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sqlite_default_format() {
        let parsed = parse_timestamp("2026-03-01 12:30:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-03-01T12:30:00+00:00");
    }

    #[test]
    fn parses_rfc3339() {
        assert!(parse_timestamp("2026-03-01T12:30:00Z").is_ok());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
    }
}
