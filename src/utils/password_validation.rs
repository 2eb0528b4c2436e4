use std::sync::LazyLock;

use regex::Regex;

use crate::utils::error::CustomError;

// Only the leading run is checked; trailing characters are accepted.
static NICKNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]{3,}").expect("nickname pattern is valid"));

pub const MIN_PASSWORD_LENGTH: usize = 4;

pub fn validate_nickname(nickname: &str) -> Result<(), CustomError> {
    if !NICKNAME_PATTERN.is_match(nickname) {
        return Err(CustomError::PreconditionFailedError(
            "닉네임의 형식이 일치하지 않습니다.".into(),
        ));
    }
    Ok(())
}

/// Check the password rules in order: length, nickname containment, confirmation.
pub fn validate_password(nickname: &str, password: &str, confirm: &str) -> Result<(), CustomError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CustomError::PreconditionFailedError(
            "패스워드 형식이 일치하지 않습니다.".into(),
        ));
    }

    if password.contains(nickname) {
        return Err(CustomError::PreconditionFailedError(
            "패스워드에 닉네임이 포함되어 있습니다.".into(),
        ));
    }

    if password != confirm {
        return Err(CustomError::PreconditionFailedError(
            "패스워드가 일치하지 않습니다.".into(),
        ));
    }

    Ok(())
}
