//! Normalisation of validated client payloads into [`NewUser`].
//!
//! Today this is a straight projection of the recognised fields. It is the
//! place to add trimming or case-folding without touching validation or the
//! transport adapters.

use super::user::NewUser;
use super::validation::ValidatedUser;

/// Copy the allow-listed fields of a validated candidate into an owned
/// [`NewUser`].
pub fn normalize(validated: ValidatedUser<'_>) -> NewUser {
    let ValidatedUser {
        name,
        email,
        address,
        role,
    } = validated;
    NewUser {
        name: name.to_owned(),
        email: email.to_owned(),
        address: address.to_owned(),
        role,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserCandidate;
    use crate::domain::validation::validate;

    #[test]
    fn copies_fields_without_touching_the_candidate() {
        let candidate = UserCandidate {
            name: Some("  Ada ".into()),
            email: Some("ada@example.com".into()),
            address: Some("1 Analytical Way".into()),
            role: Some("FALSE".into()),
        };
        let snapshot = candidate.clone();

        let new_user = normalize(validate(&candidate).expect("valid candidate"));

        assert_eq!(candidate, snapshot);
        assert_eq!(new_user.name, "  Ada ");
        assert_eq!(new_user.email, "ada@example.com");
        assert_eq!(new_user.address, "1 Analytical Way");
        assert!(!bool::from(new_user.role));
    }
}
