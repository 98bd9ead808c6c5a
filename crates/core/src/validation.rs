//! Field checks applied to request bodies before any store access.

use crate::errors::{CampusError, CampusResult};

/// Returns the trimmed value, or a validation error naming the field.
pub fn require<'a>(field: &str, value: &'a str) -> CampusResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CampusError::Validation(format!("{field} is required")));
    }
    Ok(trimmed)
}

/// Fails with one message listing every blank field, in the order given.
pub fn require_all(fields: &[(&str, &str)]) -> CampusResult<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CampusError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/// Widths of the stored text columns, in characters.
pub mod limits {
    pub const USER_ID: usize = 50;
    pub const DISPLAY_NAME: usize = 50;
    pub const STUDENT_ID: usize = 20;
    pub const PERSON_NAME: usize = 25;
    pub const MIDDLE_INITIAL: usize = 1;
    pub const COURSE: usize = 10;
    pub const ORGANIZATION: usize = 50;
    pub const ACTIVITY_NAME: usize = 50;
    pub const DESCRIPTION: usize = 200;
    pub const SPOT: usize = 8;
    pub const VEHICLE: usize = 30;
}

/// Fails on the first field whose trimmed value has more than `max`
/// characters.
pub fn limit_all(fields: &[(&str, &str, usize)]) -> CampusResult<()> {
    for &(name, value, max) in fields {
        if value.trim().chars().count() > max {
            return Err(CampusError::Validation(format!(
                "{name} must be at most {max} characters"
            )));
        }
    }
    Ok(())
}

/// Blank optional strings are stored as absent.
pub fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Spot codes compare case-insensitively and ignore surrounding whitespace.
pub fn normalize_spot(spot: &str) -> String {
    spot.trim().to_uppercase()
}
