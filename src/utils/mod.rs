pub mod body;
pub mod error;
pub mod password_validation;
