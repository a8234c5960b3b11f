//! Field-level validation for inbound user payloads.
//!
//! Every rule is evaluated independently so a single response can report all
//! failing fields. Violations are ordered by field declaration order:
//! `name`, `email`, `address`, `role`.

use std::fmt;

use super::user::{Role, UserCandidate};

/// User fields subject to validation, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UserField {
    Name,
    Email,
    Address,
    Role,
}

impl UserField {
    /// Wire name of the field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Address => "address",
            Self::Role => "role",
        }
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machine-readable reason a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationCode {
    MissingField,
    InvalidRole,
}

impl ViolationCode {
    /// Snake-case identifier used in error details.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidRole => "invalid_role",
        }
    }
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    field: UserField,
    code: ViolationCode,
    message: String,
}

impl FieldViolation {
    fn missing(field: UserField) -> Self {
        Self {
            field,
            code: ViolationCode::MissingField,
            message: format!("{field} is required"),
        }
    }

    fn invalid_role() -> Self {
        Self {
            field: UserField::Role,
            code: ViolationCode::InvalidRole,
            message: "role must be `true` or `false`".to_owned(),
        }
    }

    /// Offending field.
    pub fn field(&self) -> UserField {
        self.field
    }

    /// Reason code.
    pub fn code(&self) -> ViolationCode {
        self.code
    }

    /// Human-readable explanation.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Non-empty, ordered list of field violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    /// Iterate violations in field declaration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &FieldViolation> {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.0.iter().map(|v| v.field.as_str()).collect();
        write!(f, "{}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// A candidate that passed every rule, borrowing its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedUser<'a> {
    pub(crate) name: &'a str,
    pub(crate) email: &'a str,
    pub(crate) address: &'a str,
    pub(crate) role: Role,
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|text| !text.is_empty())
}

/// Check every rule and collect all failures.
///
/// # Examples
/// ```
/// use user_directory::domain::UserCandidate;
/// use user_directory::domain::validation::validate;
///
/// let errors = validate(&UserCandidate::default()).expect_err("empty payload");
/// assert_eq!(errors.iter().len(), 4);
/// ```
pub fn validate(candidate: &UserCandidate) -> Result<ValidatedUser<'_>, ValidationErrors> {
    let mut violations = Vec::new();

    let name = present(candidate.name.as_ref());
    if name.is_none() {
        violations.push(FieldViolation::missing(UserField::Name));
    }
    let email = present(candidate.email.as_ref());
    if email.is_none() {
        violations.push(FieldViolation::missing(UserField::Email));
    }
    let address = present(candidate.address.as_ref());
    if address.is_none() {
        violations.push(FieldViolation::missing(UserField::Address));
    }
    let role = match candidate.role.as_deref() {
        None => {
            violations.push(FieldViolation::missing(UserField::Role));
            None
        }
        Some(raw) => match Role::parse(raw) {
            Ok(role) => Some(role),
            Err(_) => {
                violations.push(FieldViolation::invalid_role());
                None
            }
        },
    };

    match (name, email, address, role) {
        (Some(name), Some(email), Some(address), Some(role)) if violations.is_empty() => {
            Ok(ValidatedUser {
                name,
                email,
                address,
                role,
            })
        }
        _ => Err(ValidationErrors(violations)),
    }
}

/// Boolean form of [`validate`] used by the REST add path.
pub fn is_valid_user(candidate: &UserCandidate) -> bool {
    validate(candidate).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn valid_candidate() -> UserCandidate {
        UserCandidate {
            name: Some("Alverta Lang".into()),
            email: Some("Tillman.Rice@yahoo.com".into()),
            address: Some("51405 Zemlak Viaduct, Lake Alex 08214".into()),
            role: Some("true".into()),
        }
    }

    fn fields(errors: &ValidationErrors) -> Vec<UserField> {
        errors.iter().map(FieldViolation::field).collect()
    }

    #[rstest]
    fn accepts_complete_candidate(valid_candidate: UserCandidate) {
        let validated = validate(&valid_candidate).expect("valid candidate");
        assert_eq!(validated.name, "Alverta Lang");
        assert!(bool::from(validated.role));
        assert!(is_valid_user(&valid_candidate));
    }

    #[rstest]
    fn empty_payload_reports_every_field_in_order() {
        let errors = validate(&UserCandidate::default()).expect_err("empty payload");
        assert_eq!(
            fields(&errors),
            vec![
                UserField::Name,
                UserField::Email,
                UserField::Address,
                UserField::Role
            ]
        );
        assert!(
            errors
                .iter()
                .all(|violation| violation.code() == ViolationCode::MissingField)
        );
    }

    #[rstest]
    fn empty_strings_count_as_missing(valid_candidate: UserCandidate) {
        let candidate = UserCandidate {
            name: Some(String::new()),
            address: Some(String::new()),
            ..valid_candidate
        };
        let errors = validate(&candidate).expect_err("blank fields");
        assert_eq!(fields(&errors), vec![UserField::Name, UserField::Address]);
    }

    #[rstest]
    fn whitespace_is_not_trimmed(valid_candidate: UserCandidate) {
        let candidate = UserCandidate {
            email: Some(" ".into()),
            ..valid_candidate
        };
        assert!(is_valid_user(&candidate));
    }

    #[rstest]
    #[case("yes")]
    #[case("")]
    #[case("null")]
    #[case("tru")]
    #[case("false!")]
    fn invalid_role_fails_even_when_other_fields_are_valid(
        valid_candidate: UserCandidate,
        #[case] role: &str,
    ) {
        let candidate = UserCandidate {
            role: Some(role.into()),
            ..valid_candidate
        };
        let errors = validate(&candidate).expect_err("invalid role");
        assert_eq!(errors.iter().len(), 1);
        let violation = errors.iter().next().expect("one violation");
        assert_eq!(violation.field(), UserField::Role);
        assert_eq!(violation.code(), ViolationCode::InvalidRole);
        assert!(!is_valid_user(&candidate));
    }

    #[rstest]
    #[case("TRUE")]
    #[case("fAlSe")]
    fn role_is_case_insensitive(valid_candidate: UserCandidate, #[case] role: &str) {
        let candidate = UserCandidate {
            role: Some(role.into()),
            ..valid_candidate
        };
        assert!(is_valid_user(&candidate));
    }

    #[rstest]
    fn display_lists_fields() {
        let errors = validate(&UserCandidate::default()).expect_err("empty payload");
        assert_eq!(errors.to_string(), "name, email, address, role");
    }
}
