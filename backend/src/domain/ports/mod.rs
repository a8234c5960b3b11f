//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod user_datasource;

#[cfg(test)]
pub use user_datasource::MockUserDatasource;
pub use user_datasource::{AddedUser, DatasourceError, UserDatasource};
