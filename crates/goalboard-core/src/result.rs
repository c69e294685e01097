use crate::error::GoalsError;

pub type GoalsResult<T> = Result<T, GoalsError>;
