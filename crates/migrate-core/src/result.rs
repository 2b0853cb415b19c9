use crate::error::MigrateError;

pub type MigrateResult<T> = Result<T, MigrateError>;
