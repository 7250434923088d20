use crate::db::uuid_column;
use crate::models::{MediaItem, MediaKind, MediaUpdate, NewMedia, Tag};
use crate::services::error::{ServiceError, ServiceResult, Violations};
use crate::services::tags::fetch_tag;
use crate::Database;
use rusqlite::{Connection, OptionalExtension, Row};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

pub const MAX_TITLE_LENGTH: usize = 100;

fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title cannot be empty".to_string());
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(format!(
            "Title must be {} characters or less",
            MAX_TITLE_LENGTH
        ));
    }
    Ok(())
}

fn not_found(kind: MediaKind) -> ServiceError {
    match kind {
        MediaKind::Photo => ServiceError::not_found("Photo"),
        MediaKind::Video => ServiceError::not_found("Video"),
    }
}

fn row_to_item(kind: MediaKind, row: &Row<'_>) -> rusqlite::Result<MediaItem> {
    Ok(MediaItem {
        id: uuid_column(row, 0)?,
        kind,
        title: row.get(1)?,
        description: row.get(2)?,
        file: row.get(3)?,
        tags: Vec::new(),
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

/// Fills in the tag sets of `items` with one query.
fn attach_tags(conn: &Connection, kind: MediaKind, items: &mut [MediaItem]) -> ServiceResult<()> {
    if items.is_empty() {
        return Ok(());
    }

    let ids: Vec<String> = items.iter().map(|item| item.id.to_string()).collect();
    let placeholders = ids.iter().map(|_| "?").collect::<Vec<_>>().join(",");
    let sql = format!(
        "SELECT l.{col}, t.id, t.name, t.description, t.created_at
         FROM tags t
         JOIN {links} l ON t.id = l.tag_id
         WHERE l.{col} IN ({placeholders})
         ORDER BY t.name",
        col = kind.link_column(),
        links = kind.link_table(),
        placeholders = placeholders,
    );

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> =
        ids.iter().map(|id| id as &dyn rusqlite::ToSql).collect();

    let mut tags_by_item: HashMap<Uuid, Vec<Tag>> = HashMap::new();
    let rows = stmt.query_map(params.as_slice(), |row| {
        let item_id = uuid_column(row, 0)?;
        let tag = Tag {
            id: uuid_column(row, 1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            created_at: row.get(4)?,
        };
        Ok((item_id, tag))
    })?;
    for row in rows {
        let (item_id, tag) = row?;
        tags_by_item.entry(item_id).or_default().push(tag);
    }

    for item in items.iter_mut() {
        item.tags = tags_by_item.remove(&item.id).unwrap_or_default();
    }
    Ok(())
}

fn fetch_item(conn: &Connection, kind: MediaKind, id: Uuid) -> ServiceResult<Option<MediaItem>> {
    let sql = format!(
        "SELECT id, title, description, file, created_at, updated_at FROM {} WHERE id = ?",
        kind.table()
    );
    let item = conn
        .query_row(&sql, [id.to_string()], |row| row_to_item(kind, row))
        .optional()?;

    match item {
        Some(item) => {
            let mut items = [item];
            attach_tags(conn, kind, &mut items)?;
            let [item] = items;
            Ok(Some(item))
        }
        None => Ok(None),
    }
}

/// Ensures every id names an existing tag, returning them without duplicates.
fn resolve_tag_ids(conn: &Connection, tag_ids: &[Uuid]) -> ServiceResult<Vec<Uuid>> {
    let mut seen = HashSet::new();
    let mut resolved = Vec::with_capacity(tag_ids.len());
    for id in tag_ids {
        if !seen.insert(*id) {
            continue;
        }
        if fetch_tag(conn, *id)?.is_none() {
            return Err(ServiceError::not_found(format!("Tag {}", id)));
        }
        resolved.push(*id);
    }
    Ok(resolved)
}

fn replace_links(conn: &Connection, kind: MediaKind, item_id: Uuid, tag_ids: &[Uuid]) -> ServiceResult<()> {
    conn.execute(
        &format!(
            "DELETE FROM {} WHERE {} = ?",
            kind.link_table(),
            kind.link_column()
        ),
        [item_id.to_string()],
    )?;

    let mut stmt = conn.prepare(&format!(
        "INSERT INTO {} ({}, tag_id) VALUES (?, ?)",
        kind.link_table(),
        kind.link_column()
    ))?;
    for tag_id in tag_ids {
        stmt.execute((item_id.to_string(), tag_id.to_string()))?;
    }
    Ok(())
}

pub fn create_media(db: &Database, kind: MediaKind, new: &NewMedia) -> ServiceResult<MediaItem> {
    let title = new.title.trim();
    let mut violations = Violations::new();
    violations.check(validate_title(title), "title");
    violations.into_result()?;

    let mut conn = db.get()?;
    let tx = conn.transaction()?;

    let tag_ids = resolve_tag_ids(&tx, &new.tags)?;
    let id = Uuid::new_v4();
    tx.execute(
        &format!(
            "INSERT INTO {} (id, title, description) VALUES (?, ?, ?)",
            kind.table()
        ),
        (
            id.to_string(),
            title,
            new.description.as_deref().unwrap_or(""),
        ),
    )?;
    replace_links(&tx, kind, id, &tag_ids)?;

    let item = fetch_item(&tx, kind, id)?.ok_or_else(|| not_found(kind))?;
    tx.commit()?;

    tracing::debug!("Created {} {}", kind, id);
    Ok(item)
}

pub fn list_media(db: &Database, kind: MediaKind) -> ServiceResult<Vec<MediaItem>> {
    let conn = db.get()?;
    let sql = format!(
        "SELECT id, title, description, file, created_at, updated_at FROM {} ORDER BY created_at DESC, title",
        kind.table()
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut items = stmt
        .query_map([], |row| row_to_item(kind, row))?
        .collect::<Result<Vec<_>, _>>()?;
    drop(stmt);

    attach_tags(&conn, kind, &mut items)?;
    Ok(items)
}

pub fn get_media(db: &Database, kind: MediaKind, id: Uuid) -> ServiceResult<MediaItem> {
    let conn = db.get()?;
    fetch_item(&conn, kind, id)?.ok_or_else(|| not_found(kind))
}

/// Returns every item of `kind` carrying the tag called `tag_name`.
pub fn list_by_tag(db: &Database, kind: MediaKind, tag_name: &str) -> ServiceResult<Vec<MediaItem>> {
    let conn = db.get()?;
    let sql = format!(
        "SELECT m.id, m.title, m.description, m.file, m.created_at, m.updated_at
         FROM {table} m
         JOIN {links} l ON m.id = l.{col}
         JOIN tags t ON l.tag_id = t.id
         WHERE t.name = ?
         ORDER BY m.created_at DESC, m.title",
        table = kind.table(),
        links = kind.link_table(),
        col = kind.link_column(),
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut items = stmt
        .query_map([tag_name], |row| row_to_item(kind, row))?
        .collect::<Result<Vec<_>, _>>()?;
    drop(stmt);

    attach_tags(&conn, kind, &mut items)?;
    Ok(items)
}

pub fn update_media(
    db: &Database,
    kind: MediaKind,
    id: Uuid,
    update: &MediaUpdate,
) -> ServiceResult<MediaItem> {
    let mut conn = db.get()?;
    let tx = conn.transaction()?;

    let current = fetch_item(&tx, kind, id)?.ok_or_else(|| not_found(kind))?;

    let title = update
        .title
        .as_deref()
        .map(str::trim)
        .unwrap_or(&current.title)
        .to_string();
    let mut violations = Violations::new();
    violations.check(validate_title(&title), "title");
    violations.into_result()?;

    let description = update.description.clone().unwrap_or(current.description);

    tx.execute(
        &format!(
            "UPDATE {} SET title = ?, description = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
            kind.table()
        ),
        (&title, &description, id.to_string()),
    )?;

    if let Some(tag_ids) = &update.tags {
        let tag_ids = resolve_tag_ids(&tx, tag_ids)?;
        replace_links(&tx, kind, id, &tag_ids)?;
    }

    let item = fetch_item(&tx, kind, id)?.ok_or_else(|| not_found(kind))?;
    tx.commit()?;
    Ok(item)
}

/// Sets the stored file reference, returning the reference it replaced.
///
/// References are only ever produced by the file store, never taken from
/// request bodies.
pub fn attach_file(
    db: &Database,
    kind: MediaKind,
    id: Uuid,
    reference: &str,
) -> ServiceResult<(MediaItem, Option<String>)> {
    set_file(db, kind, id, Some(reference))
}

/// Clears the stored file reference, returning the one that was removed.
pub fn detach_file(
    db: &Database,
    kind: MediaKind,
    id: Uuid,
) -> ServiceResult<(MediaItem, Option<String>)> {
    set_file(db, kind, id, None)
}

fn set_file(
    db: &Database,
    kind: MediaKind,
    id: Uuid,
    reference: Option<&str>,
) -> ServiceResult<(MediaItem, Option<String>)> {
    let mut conn = db.get()?;
    let tx = conn.transaction()?;
    let previous: Option<String> = tx
        .query_row(
            &format!("SELECT file FROM {} WHERE id = ?", kind.table()),
            [id.to_string()],
            |row| row.get(0),
        )
        .optional()?
        .ok_or_else(|| not_found(kind))?;

    tx.execute(
        &format!(
            "UPDATE {} SET file = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
            kind.table()
        ),
        (reference, id.to_string()),
    )?;

    let item = fetch_item(&tx, kind, id)?.ok_or_else(|| not_found(kind))?;
    tx.commit()?;
    Ok((item, previous))
}

/// Deletes an item and its tag links, returning the removed record so the
/// caller can clean up any stored file.
pub fn delete_media(db: &Database, kind: MediaKind, id: Uuid) -> ServiceResult<MediaItem> {
    let conn = db.get()?;
    let item = fetch_item(&conn, kind, id)?.ok_or_else(|| not_found(kind))?;
    conn.execute(
        &format!("DELETE FROM {} WHERE id = ?", kind.table()),
        [id.to_string()],
    )?;
    Ok(item)
}
