//! Field Validation
//!
//! Validation rules for contact and user input. All string fields are trimmed
//! before their lengths are checked, and lengths are counted in characters.

use std::sync::LazyLock;

use regex::Regex;

use crate::shared::contact::{ContactDraft, ContactFields};
use crate::shared::error::SharedError;

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 100;
pub const PHONE_MAX: usize = 20;
pub const ADDRESS_MAX: usize = 200;
pub const NOTES_MAX: usize = 500;

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 30;
pub const PASSWORD_MIN: usize = 6;

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s\-()]+$").expect("phone pattern is valid"));

/// Validate and normalize contact input
///
/// # Errors
///
/// Returns `SharedError::ValidationError` naming the first offending field.
pub fn validate_contact(draft: &ContactDraft) -> Result<ContactFields, SharedError> {
    let name = draft.name.trim();
    let phone = draft.phone.trim();
    let address = draft.address.trim();
    let notes = draft.notes.as_deref().map(str::trim).unwrap_or_default();

    if name.is_empty() || phone.is_empty() || address.is_empty() {
        let field = if name.is_empty() {
            "name"
        } else if phone.is_empty() {
            "phone"
        } else {
            "address"
        };
        return Err(SharedError::validation(field, "Name, phone, and address are required"));
    }

    let name_len = name.chars().count();
    if name_len < NAME_MIN {
        return Err(SharedError::validation(
            "name",
            format!("Name must be at least {} characters long", NAME_MIN),
        ));
    }
    if name_len > NAME_MAX {
        return Err(SharedError::validation(
            "name",
            format!("Name must be at most {} characters long", NAME_MAX),
        ));
    }

    if phone.chars().count() > PHONE_MAX || !PHONE_PATTERN.is_match(phone) {
        return Err(SharedError::validation("phone", "Invalid phone number format"));
    }

    if address.chars().count() > ADDRESS_MAX {
        return Err(SharedError::validation(
            "address",
            format!("Address must be at most {} characters long", ADDRESS_MAX),
        ));
    }

    if notes.chars().count() > NOTES_MAX {
        return Err(SharedError::validation(
            "notes",
            format!("Notes must be at most {} characters long", NOTES_MAX),
        ));
    }

    Ok(ContactFields {
        name: name.to_string(),
        phone: phone.to_string(),
        address: address.to_string(),
        notes: notes.to_string(),
    })
}

/// Validate new-user credentials, returning the trimmed username
pub fn validate_credentials(username: &str, password: &str) -> Result<String, SharedError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(SharedError::validation(
            if username.is_empty() { "username" } else { "password" },
            "Username and password are required",
        ));
    }

    let len = username.chars().count();
    if len < USERNAME_MIN {
        return Err(SharedError::validation(
            "username",
            format!("Username must be at least {} characters long", USERNAME_MIN),
        ));
    }
    if len > USERNAME_MAX {
        return Err(SharedError::validation(
            "username",
            format!("Username must be at most {} characters long", USERNAME_MAX),
        ));
    }

    if password.chars().count() < PASSWORD_MIN {
        return Err(SharedError::validation(
            "password",
            format!("Password must be at least {} characters long", PASSWORD_MIN),
        ));
    }

    Ok(username.to_string())
}
