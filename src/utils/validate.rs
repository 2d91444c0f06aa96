use crate::utils::error::AppError;

/// Rejects missing or blank required fields before touching the database.
pub fn require_fields(fields: &[(&str, &str)]) -> Result<(), AppError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "All fields ({}) are required",
            missing.join(", ")
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_non_blank_values() {
        assert!(require_fields(&[("name", "Alice"), ("email", "a@x.com")]).is_ok());
    }

    #[test]
    fn rejects_blank_and_whitespace_values() {
        assert!(require_fields(&[("name", "")]).is_err());
        assert!(require_fields(&[("name", "   ")]).is_err());
    }

    #[test]
    fn names_every_missing_field() {
        let err = require_fields(&[("name", ""), ("email", "a@x.com"), ("phone", " ")])
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("name"));
        assert!(msg.contains("phone"));
        assert!(!msg.contains("email"));
    }
}
