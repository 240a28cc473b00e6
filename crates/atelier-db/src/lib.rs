//! Persistence layer: the works repository over sqlx/Postgres.

mod works;

pub use works::{PgWorksRepository, WorksRepository};
