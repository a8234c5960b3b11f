//! GraphQL object and input types.

use async_graphql::{
    ID, InputObject, InputValueError, InputValueResult, Scalar, ScalarType, SimpleObject, Value,
};

use crate::domain::{CreateUserOutcome, RemoveUserOutcome, User, UserCandidate};

/// A user record.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "User")]
pub struct UserObject {
    pub id: ID,
    pub name: String,
    pub email: String,
    pub address: String,
    pub role: bool,
}

impl From<User> for UserObject {
    fn from(user: User) -> Self {
        Self {
            id: ID(user.id.into()),
            name: user.name,
            email: user.email,
            address: user.address,
            role: user.role.into(),
        }
    }
}

/// Role as submitted by a client: a boolean or a `true`/`false` string.
///
/// Any other literal is kept as text so the validator can name the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleInput(pub String);

#[Scalar(name = "RoleInput")]
impl ScalarType for RoleInput {
    fn parse(value: Value) -> InputValueResult<Self> {
        match value {
            Value::Boolean(flag) => Ok(Self(flag.to_string())),
            Value::String(text) => Ok(Self(text)),
            Value::Null => Err(InputValueError::expected_type(Value::Null)),
            other => Ok(Self(other.to_string())),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.clone())
    }
}

/// Input of `createUser`. Fields are nullable so missing values are reported
/// by the resolver, one error per field.
#[derive(Debug, Default, InputObject)]
pub struct CreateUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub role: Option<RoleInput>,
}

impl From<CreateUserInput> for UserCandidate {
    fn from(input: CreateUserInput) -> Self {
        Self {
            name: input.name,
            email: input.email,
            address: input.address,
            role: input.role.map(|role| role.0),
        }
    }
}

#[derive(Debug, SimpleObject)]
pub struct CreateUserPayload {
    pub success: bool,
    pub user: UserObject,
}

impl From<CreateUserOutcome> for CreateUserPayload {
    fn from(outcome: CreateUserOutcome) -> Self {
        Self {
            success: outcome.success,
            user: outcome.user.into(),
        }
    }
}

#[derive(Debug, SimpleObject)]
pub struct RemoveUserPayload {
    pub success: bool,
    /// Status message reported by the datasource.
    pub message: String,
}

impl From<RemoveUserOutcome> for RemoveUserPayload {
    fn from(outcome: RemoveUserOutcome) -> Self {
        Self {
            success: outcome.success,
            message: outcome.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::Number;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Boolean(true), "true")]
    #[case(Value::String("FALSE".into()), "FALSE")]
    #[case(Value::Number(Number::from(1)), "1")]
    fn role_input_keeps_textual_form(#[case] raw: Value, #[case] expected: &str) {
        let role = <RoleInput as ScalarType>::parse(raw).expect("parsed");
        assert_eq!(role.0, expected);
    }

    #[rstest]
    fn input_converts_to_candidate() {
        let input = CreateUserInput {
            name: Some("Ada".into()),
            role: Some(RoleInput("true".into())),
            ..CreateUserInput::default()
        };
        let candidate = UserCandidate::from(input);
        assert_eq!(candidate.name.as_deref(), Some("Ada"));
        assert_eq!(candidate.email, None);
        assert_eq!(candidate.role.as_deref(), Some("true"));
    }
}
