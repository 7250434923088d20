use crate::db::uuid_column;
use crate::models::{Tag, UpdateTag};
use crate::services::error::{map_unique_violation, ServiceError, ServiceResult, Violations};
use crate::Database;
use rusqlite::{Connection, OptionalExtension, Row};
use uuid::Uuid;

pub const MAX_TAG_NAME_LENGTH: usize = 50;

const DUPLICATE_NAME: &str = "A tag with this name already exists";

fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Tag name cannot be empty".to_string());
    }
    if name.chars().count() > MAX_TAG_NAME_LENGTH {
        return Err(format!(
            "Tag name must be {} characters or less",
            MAX_TAG_NAME_LENGTH
        ));
    }
    Ok(())
}

/// An empty or missing description falls back to the tag name.
fn effective_description(name: &str, description: Option<&str>) -> String {
    match description.map(str::trim) {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => name.to_string(),
    }
}

fn row_to_tag(row: &Row<'_>) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: uuid_column(row, 0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        created_at: row.get(3)?,
    })
}

pub(crate) fn fetch_tag(conn: &Connection, id: Uuid) -> ServiceResult<Option<Tag>> {
    let tag = conn
        .query_row(
            "SELECT id, name, description, created_at FROM tags WHERE id = ?",
            [id.to_string()],
            row_to_tag,
        )
        .optional()?;
    Ok(tag)
}

fn name_taken(conn: &Connection, name: &str, except: Option<Uuid>) -> ServiceResult<bool> {
    let except = except.map(|id| id.to_string()).unwrap_or_default();
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM tags WHERE name = ?1 AND id != ?2",
        (name, except),
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

pub fn create_tag(db: &Database, name: &str, description: Option<&str>) -> ServiceResult<Tag> {
    let name = name.trim();
    let mut violations = Violations::new();
    violations.check(validate_name(name), "name");
    violations.into_result()?;

    let conn = db.get()?;
    if name_taken(&conn, name, None)? {
        return Err(ServiceError::invalid("name", DUPLICATE_NAME));
    }

    let id = Uuid::new_v4();
    let description = effective_description(name, description);
    conn.execute(
        "INSERT INTO tags (id, name, description) VALUES (?, ?, ?)",
        (id.to_string(), name, &description),
    )
    .map_err(|e| map_unique_violation(e, "tags.name", "name", DUPLICATE_NAME))?;

    fetch_tag(&conn, id)?.ok_or_else(|| ServiceError::not_found("Tag"))
}

pub fn list_tags(db: &Database) -> ServiceResult<Vec<Tag>> {
    let conn = db.get()?;
    let mut stmt = conn.prepare("SELECT id, name, description, created_at FROM tags ORDER BY name")?;
    let tags = stmt
        .query_map([], row_to_tag)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tags)
}

pub fn list_tags_with_prefix(db: &Database, prefix: &str) -> ServiceResult<Vec<Tag>> {
    let conn = db.get()?;
    let mut stmt = conn.prepare(
        "SELECT id, name, description, created_at FROM tags
         WHERE substr(name, 1, length(?1)) = ?1 ORDER BY name",
    )?;
    let tags = stmt
        .query_map([prefix], row_to_tag)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tags)
}

pub fn get_tag(db: &Database, id: Uuid) -> ServiceResult<Tag> {
    let conn = db.get()?;
    fetch_tag(&conn, id)?.ok_or_else(|| ServiceError::not_found("Tag"))
}

pub fn update_tag(db: &Database, id: Uuid, update: &UpdateTag) -> ServiceResult<Tag> {
    let conn = db.get()?;
    let current = fetch_tag(&conn, id)?.ok_or_else(|| ServiceError::not_found("Tag"))?;

    let name = update
        .name
        .as_deref()
        .map(str::trim)
        .unwrap_or(&current.name)
        .to_string();
    let mut violations = Violations::new();
    violations.check(validate_name(&name), "name");
    violations.into_result()?;

    if name_taken(&conn, &name, Some(id))? {
        return Err(ServiceError::invalid("name", DUPLICATE_NAME));
    }

    let description = match update.description.as_deref() {
        Some(d) => effective_description(&name, Some(d)),
        None => current.description,
    };

    conn.execute(
        "UPDATE tags SET name = ?, description = ? WHERE id = ?",
        (&name, &description, id.to_string()),
    )
    .map_err(|e| map_unique_violation(e, "tags.name", "name", DUPLICATE_NAME))?;

    fetch_tag(&conn, id)?.ok_or_else(|| ServiceError::not_found("Tag"))
}

/// Deletes a tag. Links from photos and videos are removed with it; the media
/// items themselves are kept.
pub fn delete_tag(db: &Database, id: Uuid) -> ServiceResult<()> {
    let conn = db.get()?;
    let affected = conn.execute("DELETE FROM tags WHERE id = ?", [id.to_string()])?;
    if affected == 0 {
        return Err(ServiceError::not_found("Tag"));
    }
    Ok(())
}
