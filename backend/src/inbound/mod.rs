//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! REST handlers live under [`http`]; the GraphQL schema and its actix
//! resource under [`graphql`]. Both call the same
//! [`UserDirectoryService`](crate::domain::UserDirectoryService).

pub mod graphql;
pub mod http;
