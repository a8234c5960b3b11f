//! Query and mutation roots.

use async_graphql::{Context, EmptySubscription, Object, Result, Schema};
use tracing::debug;

use super::error::{graphql_error, graphql_errors};
use super::types::{CreateUserInput, CreateUserPayload, RemoveUserPayload, UserObject};
use crate::domain::{UserCandidate, UserDirectoryService};

/// Executable schema type served by the GraphQL endpoint.
pub type UserDirectorySchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with `service` available to every resolver.
pub fn build_schema(service: UserDirectoryService) -> UserDirectorySchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(service)
        .finish()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// First user whose name matches exactly.
    async fn user(&self, ctx: &Context<'_>, name: String) -> Result<UserObject> {
        let service = ctx.data::<UserDirectoryService>()?;
        service
            .get_user(&name)
            .await
            .map(UserObject::from)
            .map_err(|err| graphql_error(&err))
    }

    /// Users sharing a name, at most `first` of them (default 10).
    async fn user_list(
        &self,
        ctx: &Context<'_>,
        name: String,
        first: Option<i32>,
    ) -> Result<Vec<UserObject>> {
        let service = ctx.data::<UserDirectoryService>()?;
        let users = service
            .list_users(&name, first)
            .await
            .map_err(|err| graphql_error(&err))?;
        Ok(users.into_iter().map(UserObject::from).collect())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Validate and store a new user. Every invalid field is reported as its
    /// own error.
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        input: CreateUserInput,
    ) -> Result<CreateUserPayload> {
        let service = ctx.data::<UserDirectoryService>()?;
        let candidate = UserCandidate::from(input);
        match service.create_user(&candidate).await {
            Ok(outcome) => Ok(outcome.into()),
            Err(err) => {
                // The executor appends the returned field error after any
                // added ones, so the last violation is the one returned.
                let mut errors = graphql_errors(&err);
                let last = errors.pop().unwrap_or_else(|| graphql_error(&err));
                for earlier in errors {
                    let server_error = earlier.into_server_error(ctx.item.pos);
                    ctx.add_error(ctx.set_error_path(server_error));
                }
                debug!(code = ?err.code(), "createUser rejected");
                Err(last)
            }
        }
    }

    /// Remove a user by id.
    async fn remove_user(&self, ctx: &Context<'_>, id: String) -> Result<RemoveUserPayload> {
        let service = ctx.data::<UserDirectoryService>()?;
        service
            .remove_user(&id)
            .await
            .map(RemoveUserPayload::from)
            .map_err(|err| graphql_error(&err))
    }
}
