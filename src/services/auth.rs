use crate::db::uuid_column;
use crate::models::{Account, NewAccount, ProfileUpdate};
use crate::services::error::{map_unique_violation, ServiceError, ServiceResult, Violations};
use crate::Database;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use rusqlite::{Connection, OptionalExtension, Row};
use std::sync::OnceLock;
use uuid::Uuid;

const MAX_USERNAME_LENGTH: usize = 255;
const MAX_EMAIL_LENGTH: usize = 200;
const MAX_NAME_LENGTH: usize = 200;

const ACCOUNT_COLUMNS: &str = "id, email, username, first_name, last_name, password_hash, is_active, is_staff, is_superuser, created_at, updated_at";

const DUPLICATE_EMAIL: &str = "An account with this email already exists";
const DUPLICATE_USERNAME: &str = "An account with this username already exists";

fn validate_username(username: &str) -> Result<(), String> {
    if username.trim().is_empty() {
        return Err("Please provide a username".to_string());
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(format!(
            "Username must be {} characters or less",
            MAX_USERNAME_LENGTH
        ));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), String> {
    if email.trim().is_empty() {
        return Err("Please provide an email".to_string());
    }
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(format!("Email must be {} characters or less", MAX_EMAIL_LENGTH));
    }
    match email.rsplit_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err("Enter a valid email address".to_string()),
    }
}

fn validate_name(name: &Option<String>) -> Result<(), String> {
    match name {
        Some(n) if n.chars().count() > MAX_NAME_LENGTH => Err(format!(
            "Name must be {} characters or less",
            MAX_NAME_LENGTH
        )),
        _ => Ok(()),
    }
}

/// `None` keeps the current value; an empty string clears it.
fn updated_name(update: Option<&str>, current: Option<String>) -> Option<String> {
    match update.map(str::trim) {
        Some("") => None,
        Some(name) => Some(name.to_string()),
        None => current,
    }
}

/// Lower-cases the domain part of an email address, leaving the local part as given.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

pub fn hash_password(password: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ServiceError::Internal(format!("Password hashing failed: {}", e)))?;
    Ok(hash.to_string())
}

/// A genuine argon2 hash, computed once, verified against when no real hash
/// exists so failures take the same time either way.
pub(crate) fn dummy_hash() -> Option<&'static str> {
    static DUMMY: OnceLock<Option<String>> = OnceLock::new();
    DUMMY
        .get_or_init(|| hash_password("media-vault-dummy-password").ok())
        .as_deref()
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => {
            burn_dummy_verification(password);
            return false;
        }
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

fn burn_dummy_verification(password: &str) {
    if let Some(dummy) = dummy_hash().and_then(|h| PasswordHash::new(h).ok()) {
        let _ = Argon2::default().verify_password(password.as_bytes(), &dummy);
    }
}

fn row_to_account(row: &Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        id: uuid_column(row, 0)?,
        email: row.get(1)?,
        username: row.get(2)?,
        first_name: row.get(3)?,
        last_name: row.get(4)?,
        password_hash: row.get(5)?,
        is_active: row.get(6)?,
        is_staff: row.get(7)?,
        is_superuser: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

fn fetch_account(conn: &Connection, id: Uuid) -> ServiceResult<Option<Account>> {
    let sql = format!("SELECT {} FROM accounts WHERE id = ?", ACCOUNT_COLUMNS);
    let account = conn
        .query_row(&sql, [id.to_string()], row_to_account)
        .optional()?;
    Ok(account)
}

fn value_taken(
    conn: &Connection,
    column: &str,
    value: &str,
    except: Option<Uuid>,
) -> ServiceResult<bool> {
    let sql = format!(
        "SELECT COUNT(*) FROM accounts WHERE {} = ?1 AND id != ?2",
        column
    );
    let except = except.map(|id| id.to_string()).unwrap_or_default();
    let count: i64 = conn.query_row(&sql, (value, except), |row| row.get(0))?;
    Ok(count > 0)
}

fn map_account_conflict(err: rusqlite::Error) -> ServiceError {
    match map_unique_violation(err, "accounts.email", "email", DUPLICATE_EMAIL) {
        ServiceError::Database(err) => {
            map_unique_violation(err, "accounts.username", "username", DUPLICATE_USERNAME)
        }
        other => other,
    }
}

fn insert_account(db: &Database, new: &NewAccount, admin: bool) -> ServiceResult<Account> {
    let email = normalize_email(&new.email);
    let username = new.username.trim().to_string();

    let mut violations = Violations::new();
    violations.check(validate_email(&email), "email");
    violations.check(validate_username(&username), "username");
    violations.check(validate_name(&new.first_name), "first_name");
    violations.check(validate_name(&new.last_name), "last_name");
    if new.password.is_empty() {
        violations.push("password", "Please provide a password");
    }
    violations.into_result()?;

    let conn = db.get()?;

    let mut violations = Violations::new();
    if value_taken(&conn, "email", &email, None)? {
        violations.push("email", DUPLICATE_EMAIL);
    }
    if value_taken(&conn, "username", &username, None)? {
        violations.push("username", DUPLICATE_USERNAME);
    }
    violations.into_result()?;

    let id = Uuid::new_v4();
    let password_hash = hash_password(&new.password)?;
    conn.execute(
        "INSERT INTO accounts (id, email, username, password_hash, first_name, last_name, is_staff, is_superuser)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
        rusqlite::params![
            id.to_string(),
            email,
            username,
            password_hash,
            new.first_name,
            new.last_name,
            admin,
        ],
    )
    .map_err(map_account_conflict)?;

    fetch_account(&conn, id)?.ok_or_else(|| ServiceError::not_found("Account"))
}

/// Registers a regular account: active, not staff, not superuser.
pub fn create_account(db: &Database, new: &NewAccount) -> ServiceResult<Account> {
    let account = insert_account(db, new, false)?;
    tracing::info!("Account '{}' created", account.username);
    Ok(account)
}

/// Registers an account with staff and superuser privileges.
pub fn create_admin_account(
    db: &Database,
    email: &str,
    username: &str,
    password: &str,
) -> ServiceResult<Account> {
    let new = NewAccount {
        email: email.to_string(),
        username: username.to_string(),
        password: password.to_string(),
        first_name: None,
        last_name: None,
    };
    let account = insert_account(db, &new, true)?;
    tracing::info!("Admin account '{}' created", account.username);
    Ok(account)
}

pub fn verify_credentials(db: &Database, email: &str, password: &str) -> ServiceResult<Account> {
    let email = normalize_email(email);
    let conn = db.get()?;
    let sql = format!("SELECT {} FROM accounts WHERE email = ?", ACCOUNT_COLUMNS);
    let account = conn.query_row(&sql, [&email], row_to_account).optional()?;
    drop(conn);

    match account {
        Some(account) if verify_password(password, &account.password_hash) && account.is_active => {
            Ok(account)
        }
        Some(_) => {
            tracing::warn!("Failed login for '{}'", email);
            Err(ServiceError::Authentication(
                "No active account found with the given credentials".to_string(),
            ))
        }
        None => {
            burn_dummy_verification(password);
            tracing::warn!("Failed login for unknown email '{}'", email);
            Err(ServiceError::Authentication(
                "No active account found with the given credentials".to_string(),
            ))
        }
    }
}

pub fn list_accounts(db: &Database) -> ServiceResult<Vec<Account>> {
    let conn = db.get()?;
    let sql = format!(
        "SELECT {} FROM accounts ORDER BY created_at, username",
        ACCOUNT_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let accounts = stmt
        .query_map([], row_to_account)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(accounts)
}

pub fn get_account(db: &Database, id: Uuid) -> ServiceResult<Account> {
    let conn = db.get()?;
    fetch_account(&conn, id)?.ok_or_else(|| ServiceError::not_found("Account"))
}

pub fn update_profile(db: &Database, id: Uuid, update: &ProfileUpdate) -> ServiceResult<Account> {
    let conn = db.get()?;
    let current = fetch_account(&conn, id)?.ok_or_else(|| ServiceError::not_found("Account"))?;

    let email = update
        .email
        .as_deref()
        .map(normalize_email)
        .unwrap_or(current.email);
    let username = update
        .username
        .as_deref()
        .map(|u| u.trim().to_string())
        .unwrap_or(current.username);
    let first_name = updated_name(update.first_name.as_deref(), current.first_name);
    let last_name = updated_name(update.last_name.as_deref(), current.last_name);

    let mut violations = Violations::new();
    violations.check(validate_email(&email), "email");
    violations.check(validate_username(&username), "username");
    violations.check(validate_name(&first_name), "first_name");
    violations.check(validate_name(&last_name), "last_name");
    violations.into_result()?;

    let mut violations = Violations::new();
    if value_taken(&conn, "email", &email, Some(id))? {
        violations.push("email", DUPLICATE_EMAIL);
    }
    if value_taken(&conn, "username", &username, Some(id))? {
        violations.push("username", DUPLICATE_USERNAME);
    }
    violations.into_result()?;

    conn.execute(
        "UPDATE accounts SET email = ?1, username = ?2, first_name = ?3, last_name = ?4,
         updated_at = CURRENT_TIMESTAMP WHERE id = ?5",
        rusqlite::params![email, username, first_name, last_name, id.to_string()],
    )
    .map_err(map_account_conflict)?;

    fetch_account(&conn, id)?.ok_or_else(|| ServiceError::not_found("Account"))
}

pub fn delete_account(db: &Database, id: Uuid) -> ServiceResult<()> {
    let conn = db.get()?;
    let affected = conn.execute("DELETE FROM accounts WHERE id = ?", [id.to_string()])?;
    if affected == 0 {
        return Err(ServiceError::not_found("Account"));
    }
    tracing::info!("Account {} deleted", id);
    Ok(())
}

pub fn has_accounts(db: &Database) -> ServiceResult<bool> {
    let conn = db.get()?;
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))?;
    Ok(count > 0)
}
