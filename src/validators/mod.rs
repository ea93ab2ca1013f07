pub mod addon_validator;
pub mod login_validator;
