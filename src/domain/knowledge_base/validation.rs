//! Knowledge base identifier validation

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::DomainError;

/// Maximum length for document ids and collection names
pub const MAX_ID_LENGTH: usize = 128;

/// Alphanumeric start, then alphanumerics, hyphens, underscores or dots
static ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]*$").expect("static id pattern is valid")
});

fn validate_identifier(kind: &str, id: &str) -> Result<(), DomainError> {
    if id.is_empty() {
        return Err(DomainError::validation(format!("{} cannot be empty", kind)));
    }

    if id.len() > MAX_ID_LENGTH {
        return Err(DomainError::validation(format!(
            "{} too long: {} characters (max {})",
            kind,
            id.len(),
            MAX_ID_LENGTH
        )));
    }

    if !ID_PATTERN.is_match(id) {
        return Err(DomainError::validation(format!(
            "Invalid {} '{}': use letters, digits, '-', '_' or '.'",
            kind.to_lowercase(),
            id
        )));
    }

    Ok(())
}

/// Validate a caller supplied document id
pub fn validate_document_id(id: &str) -> Result<(), DomainError> {
    validate_identifier("Document ID", id)
}

/// Validate a collection name
pub fn validate_collection_name(name: &str) -> Result<(), DomainError> {
    validate_identifier("Collection name", name)
}
