//! Input validation for registry writes.

use crate::model::NewMember;
use crate::{Error, Result};

/// Username: at least 3 characters once trimmed.
pub fn username(value: &str) -> Result<()> {
    if value.trim().chars().count() < 3 {
        return Err(Error::Validation("Username must be at least 3 characters".into()));
    }
    Ok(())
}

/// Email: non-empty, an `@` that is neither first nor last, and a `.`
/// somewhere after it.
pub fn email(value: &str) -> Result<()> {
    let e = value.trim();
    if e.is_empty() {
        return Err(Error::Validation("Email required".into()));
    }
    let valid = match e.find('@') {
        Some(at) if at > 0 && at < e.len() - 1 => e[at..].contains('.'),
        _ => false,
    };
    if !valid {
        return Err(Error::Validation("Invalid email format".into()));
    }
    Ok(())
}

/// Card names must not be blank.
pub fn card_name(value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation("Card name required".into()));
    }
    Ok(())
}

pub fn new_member(member: &NewMember) -> Result<()> {
    username(&member.username)?;
    email(&member.email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username() {
        assert!(username("bob").is_ok());
        assert!(username("  al ").is_err());
        assert!(username("").is_err());
    }

    #[test]
    fn test_email() {
        assert!(email("duck@pond.io").is_ok());
        assert!(email(" duck@pond.io ").is_ok());
        assert!(email("").is_err());
        assert!(email("@pond.io").is_err());
        assert!(email("duck@").is_err());
        assert!(email("duck@pond").is_err());
        assert!(email("duck.pond").is_err());
    }

    #[test]
    fn test_card_name() {
        assert!(card_name("Mallards").is_ok());
        assert!(card_name("   ").is_err());
    }
}
