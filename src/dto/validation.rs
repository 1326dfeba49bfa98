//! Validation helpers for DTOs.

use validator::ValidationError;

/// Expected length of an MD5 hex digest.
const CHECKSUM_LENGTH: usize = 32;

/// Validates that a save checksum is exactly 32 lowercase hexadecimal characters.
///
/// # Examples
///
/// ```ignore
/// validate_checksum("f41ad2148f7ffc640dfefb9b802f0ad3") // Ok
/// validate_checksum("F41AD2148F7FFC640DFEFB9B802F0AD3") // Err - uppercase
/// validate_checksum("f41ad2")                           // Err - too short
/// ```
pub fn validate_checksum(checksum: &str) -> Result<(), ValidationError> {
    if checksum.len() != CHECKSUM_LENGTH {
        let mut err = ValidationError::new("checksum_length");
        err.message = Some(
            format!(
                "Checksum must be exactly {CHECKSUM_LENGTH} characters (got {})",
                checksum.len()
            )
            .into(),
        );
        return Err(err);
    }

    if !checksum
        .chars()
        .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
    {
        let mut err = ValidationError::new("checksum_format");
        err.message = Some("Checksum must contain only lowercase hexadecimal characters".into());
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_checksum_valid() {
        assert!(validate_checksum("f41ad2148f7ffc640dfefb9b802f0ad3").is_ok());
        assert!(validate_checksum("00000000000000000000000000000000").is_ok());
        assert!(validate_checksum("99914b932bd37a50b983c5e7c90ae93b").is_ok());
    }

    #[test]
    fn test_validate_checksum_invalid_length() {
        assert!(validate_checksum("f41ad2148f7ffc640dfefb9b802f0ad").is_err()); // too short
        assert!(validate_checksum("f41ad2148f7ffc640dfefb9b802f0ad3f").is_err()); // too long
        assert!(validate_checksum("").is_err()); // empty
    }

    #[test]
    fn test_validate_checksum_invalid_format() {
        assert!(validate_checksum("F41AD2148F7FFC640DFEFB9B802F0AD3").is_err()); // uppercase
        assert!(validate_checksum("g41ad2148f7ffc640dfefb9b802f0ad3").is_err()); // invalid hex
        assert!(validate_checksum("f41ad2148f7ffc640dfefb9b802f0ad ").is_err()); // space
    }
}
