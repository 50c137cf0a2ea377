use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Shared input for both note creation and note editing; the same validation
/// applies to either.
#[derive(Debug, Deserialize)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
}

fn required(name: &str, value: &str) -> Result<(), ApiError> {
    if value.is_empty() {
        return Err(ApiError::Validation(format!("{name} is required")));
    }
    Ok(())
}

fn bounded(name: &str, value: &str, max: usize) -> Result<(), ApiError> {
    required(name, value)?;
    if value.chars().count() > max {
        return Err(ApiError::Validation(format!(
            "{name} must be at most {max} characters"
        )));
    }
    Ok(())
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), ApiError> {
        bounded("Username", &self.username, 20)?;
        bounded("Password", &self.password, 100)?;
        bounded("Email", &self.email, 50)?;
        bounded("First name", &self.first_name, 30)?;
        bounded("Last name", &self.last_name, 30)
    }
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ApiError> {
        required("Username", &self.username)?;
        required("Password", &self.password)
    }
}

impl NoteInput {
    pub fn validate(&self) -> Result<(), ApiError> {
        bounded("Title", &self.title, 100)?;
        required("Content", &self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_form() -> RegisterForm {
        RegisterForm {
            username: "alice".into(),
            password: "pw1".into(),
            email: "a@x.com".into(),
            first_name: "A".into(),
            last_name: "L".into(),
        }
    }

    #[test]
    fn valid_registration_passes() {
        assert!(register_form().validate().is_ok());
    }

    #[test]
    fn empty_username_is_rejected() {
        let mut form = register_form();
        form.username.clear();
        let err = form.validate().unwrap_err();
        assert!(matches!(err, ApiError::Validation(m) if m.contains("Username")));
    }

    #[test]
    fn oversized_username_is_rejected() {
        let mut form = register_form();
        form.username = "a".repeat(21);
        assert!(form.validate().is_err());
    }

    #[test]
    fn username_at_limit_passes() {
        let mut form = register_form();
        form.username = "a".repeat(20);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn note_title_bounds() {
        let ok = NoteInput {
            title: "T".repeat(100),
            content: "C".into(),
        };
        assert!(ok.validate().is_ok());

        let too_long = NoteInput {
            title: "T".repeat(101),
            content: "C".into(),
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn note_content_must_be_non_empty() {
        let note = NoteInput {
            title: "T".into(),
            content: String::new(),
        };
        assert!(note.validate().is_err());
    }
}
