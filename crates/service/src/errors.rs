use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// A precondition of the requested operation does not hold.
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn invalid_state(msg: impl Into<String>) -> Self { Self::InvalidState(msg.into()) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::InvalidState(_) => 1001,
            ServiceError::Db(_) => 1200,
        }
    }

    pub fn is_invalid_state(&self) -> bool { matches!(self, ServiceError::InvalidState(_)) }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self { ServiceError::Db(e.to_string()) }
}
