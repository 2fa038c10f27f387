use crate::{CoreError, CoreResult};

/// Invite codes shorter than this are rejected before any network call.
pub const INVITE_CODE_MIN_LEN: usize = 6;
pub const INVITE_CODE_MAX_LEN: usize = 8;

/// The create-trip form caps the preferred-places list.
pub const MAX_PREFERRED_PLACES: usize = 5;

pub fn validate_trip_name(name: &str) -> CoreResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::ValidationError(
            "Trip name cannot be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Invite codes are entered case-insensitively; the wire form is uppercase
/// and capped at 8 characters.
pub fn normalize_invite_code(code: &str) -> String {
    code.trim()
        .chars()
        .take(INVITE_CODE_MAX_LEN)
        .collect::<String>()
        .to_uppercase()
}

pub fn validate_invite_code(code: &str) -> CoreResult<String> {
    let normalized = normalize_invite_code(code);
    if normalized.len() < INVITE_CODE_MIN_LEN {
        return Err(CoreError::ValidationError("Invalid code".to_string()));
    }
    Ok(normalized)
}

pub fn validate_credentials(username: &str, password: &str) -> CoreResult<()> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(CoreError::ValidationError(
            "Please fill in all fields".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_preferred_places(places: &[String]) -> CoreResult<()> {
    if places.len() > MAX_PREFERRED_PLACES {
        return Err(CoreError::ValidationError(format!(
            "Add up to {} places",
            MAX_PREFERRED_PLACES
        )));
    }
    Ok(())
}
