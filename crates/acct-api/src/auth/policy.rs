//! Registration input policy
//!
//! Rules are checked in a fixed order and only the first failure is
//! reported, so the same payload always yields the same message.
//!
//! Lengths are measured in bytes. The phone bounds include a leading `+`
//! and a two-digit country code on top of a 10 to 13 digit number.

use super::models::RegistrationRequest;
use thiserror::Error;
use unicode_general_category::{get_general_category, GeneralCategory};

pub const PHONE_MIN_LEN: usize = 10 + 2;
pub const PHONE_MAX_LEN: usize = 13 + 2;
pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 60;
pub const PASSWORD_MIN_LEN: usize = 6;
pub const PASSWORD_MAX_LEN: usize = 64;

/// The first registration rule a payload breaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolicyViolation {
    #[error("phone number must be at least 10 characters")]
    PhoneTooShort,

    #[error("phone number must be at most 13 characters")]
    PhoneTooLong,

    #[error("full name must be at least 3 characters")]
    NameTooShort,

    #[error("full name must be at most 60 characters")]
    NameTooLong,

    #[error("password must be at least 6 characters")]
    PasswordTooShort,

    #[error("password must be at most 64 characters")]
    PasswordTooLong,

    #[error("password must be at least has 1 capital")]
    MissingUppercase,

    #[error("password must be at least has 1 special character")]
    MissingSpecialCharacter,
}

/// Validate a registration payload
///
/// # Returns
///
/// * `Ok(())` - All rules pass
/// * `Err(PolicyViolation)` - The first rule that failed
pub fn validate_registration(request: &RegistrationRequest) -> Result<(), PolicyViolation> {
    validate_phone_number(&request.phone_number)?;
    validate_full_name(&request.full_name)?;
    validate_password(&request.password)
}

fn validate_phone_number(phone_number: &str) -> Result<(), PolicyViolation> {
    if phone_number.len() < PHONE_MIN_LEN {
        return Err(PolicyViolation::PhoneTooShort);
    }
    if phone_number.len() > PHONE_MAX_LEN {
        return Err(PolicyViolation::PhoneTooLong);
    }
    Ok(())
}

fn validate_full_name(full_name: &str) -> Result<(), PolicyViolation> {
    if full_name.len() < NAME_MIN_LEN {
        return Err(PolicyViolation::NameTooShort);
    }
    if full_name.len() > NAME_MAX_LEN {
        return Err(PolicyViolation::NameTooLong);
    }
    Ok(())
}

/// Unicode category Lu
fn is_uppercase_letter(c: char) -> bool {
    get_general_category(c) == GeneralCategory::UppercaseLetter
}

/// Unicode categories Lu, Ll, Lt, Lm and Lo
fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// Password strength check
///
/// Characters are classified by Unicode general category. Any character
/// that is neither an uppercase letter (Lu) nor a letter (L*) counts as
/// "special", so digits, whitespace and combining marks satisfy the last
/// rule. Letter numbers such as U+2160 are not capitals.
pub fn validate_password(password: &str) -> Result<(), PolicyViolation> {
    if password.len() < PASSWORD_MIN_LEN {
        return Err(PolicyViolation::PasswordTooShort);
    }
    if password.len() > PASSWORD_MAX_LEN {
        return Err(PolicyViolation::PasswordTooLong);
    }

    let mut has_uppercase = false;
    let mut has_special = false;
    for c in password.chars() {
        if is_uppercase_letter(c) {
            has_uppercase = true;
        } else if !is_letter(c) {
            has_special = true;
        }
    }

    if !has_uppercase {
        return Err(PolicyViolation::MissingUppercase);
    }
    if !has_special {
        return Err(PolicyViolation::MissingSpecialCharacter);
    }
    Ok(())
}
