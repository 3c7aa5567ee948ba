//! Form validation for user drafts.
//!
//! Runs entirely client-side, before a create or update request is issued.
//! Errors are collected per field so a form can render them inline; a draft
//! that fails validation never produces a network call.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{FieldError, Result, RosterError};
use crate::model::UserDraft;

pub const NAME_MIN_CHARS: usize = 2;
pub const USERNAME_MIN_CHARS: usize = 3;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").unwrap());

/// Validate a draft against the form rules. All failing fields are reported
/// at once. `website` is the only optional field.
pub fn validate_draft(draft: &UserDraft) -> Result<()> {
    let mut errors = Vec::new();

    if draft.name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    } else if draft.name.chars().count() < NAME_MIN_CHARS {
        errors.push(FieldError::new(
            "name",
            format!("Name must be at least {} characters", NAME_MIN_CHARS),
        ));
    }

    if draft.username.trim().is_empty() {
        errors.push(FieldError::new("username", "Username is required"));
    } else if draft.username.chars().count() < USERNAME_MIN_CHARS {
        errors.push(FieldError::new(
            "username",
            format!("Username must be at least {} characters", USERNAME_MIN_CHARS),
        ));
    }

    if draft.email.trim().is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !EMAIL_RE.is_match(&draft.email) {
        errors.push(FieldError::new("email", "Invalid email address"));
    }

    if draft.phone.trim().is_empty() {
        errors.push(FieldError::new("phone", "Phone is required"));
    }

    if draft.company.trim().is_empty() {
        errors.push(FieldError::new("company", "Company is required"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(RosterError::Validation(errors))
    }
}
