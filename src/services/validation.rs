use std::sync::LazyLock;

use regex::Regex;

use crate::models::{ErrorMap, Field, FormData};

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

// Optional leading '+', then at least ten digits, spaces, hyphens or parentheses.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s()-]{10,}$").expect("valid phone pattern"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid email pattern"));

/// Checks every field of the form and returns the messages of the ones that fail.
/// All fields are checked, an earlier failure never hides a later one.
pub fn validate(form: &FormData) -> ErrorMap {
    let mut errors = ErrorMap::new();
    for field in Field::all() {
        if let Some(message) = validate_field(field, form.get(field)) {
            errors.insert(field, message);
        }
    }
    errors
}

pub fn validate_field(field: Field, value: &str) -> Option<&'static str> {
    match field {
        Field::Username => {
            if value.is_empty() {
                Some("Username is required")
            } else if value.chars().count() < MIN_USERNAME_LEN {
                Some("Username must be at least 3 characters")
            } else {
                None
            }
        }
        Field::Phone => {
            if value.is_empty() {
                Some("Phone number is required")
            } else if !PHONE_RE.is_match(value) {
                Some("Please enter a valid phone number")
            } else {
                None
            }
        }
        Field::Email => {
            if value.is_empty() {
                Some("Email is required")
            } else if !EMAIL_RE.is_match(value) {
                Some("Please enter a valid email address")
            } else {
                None
            }
        }
        Field::Password => {
            if value.is_empty() {
                Some("Password is required")
            } else if value.chars().count() < MIN_PASSWORD_LEN {
                Some("Password must be at least 6 characters")
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> FormData {
        FormData {
            username: "ada".into(),
            phone: "+1 (555) 123-4567".into(),
            email: "user@example.com".into(),
            password: "abcdef".into(),
        }
    }

    #[test]
    fn valid_form_has_no_errors() {
        assert!(validate(&valid_form()).is_empty());
    }

    #[test]
    fn each_empty_field_is_reported_alone() {
        for field in Field::all() {
            let mut form = valid_form();
            form.set(field, String::new());
            let errors = validate(&form);
            assert_eq!(errors.fields().collect::<Vec<_>>(), vec![field]);
            assert!(errors.get(field).unwrap().ends_with("is required"));
        }
    }

    #[test]
    fn all_failures_are_collected() {
        let errors = validate(&FormData::default());
        assert_eq!(errors.fields().count(), 4);

        let form = FormData {
            username: "ab".into(),
            phone: "12345".into(),
            email: "not-an-email".into(),
            password: "abc".into(),
        };
        let errors = validate(&form);
        assert_eq!(
            errors.get(Field::Username),
            Some("Username must be at least 3 characters")
        );
        assert_eq!(errors.get(Field::Phone), Some("Please enter a valid phone number"));
        assert_eq!(errors.get(Field::Email), Some("Please enter a valid email address"));
        assert_eq!(
            errors.get(Field::Password),
            Some("Password must be at least 6 characters")
        );
    }

    #[test]
    fn username_length_boundary() {
        assert!(validate_field(Field::Username, "ab").is_some());
        assert!(validate_field(Field::Username, "abc").is_none());
        assert!(validate_field(Field::Username, "émi").is_none());
    }

    #[test]
    fn phone_pattern() {
        assert!(validate_field(Field::Phone, "12345").is_some());
        assert!(validate_field(Field::Phone, "+1 (555) 123-4567").is_none());
        assert!(validate_field(Field::Phone, "0123456789").is_none());
        assert!(validate_field(Field::Phone, "555-123-456x").is_some());
        assert!(validate_field(Field::Phone, "++1234567890").is_some());
        assert!(validate_field(Field::Phone, "123456789+").is_some());
    }

    #[test]
    fn email_pattern() {
        assert!(validate_field(Field::Email, "not-an-email").is_some());
        assert!(validate_field(Field::Email, "user@example").is_some());
        assert!(validate_field(Field::Email, "user@example.com").is_none());
        assert!(validate_field(Field::Email, "@example.com").is_some());
    }

    #[test]
    fn password_length_boundary() {
        assert!(validate_field(Field::Password, "abc").is_some());
        assert!(validate_field(Field::Password, "abcde").is_some());
        assert!(validate_field(Field::Password, "abcdef").is_none());
    }
}
