#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validate(#[from] validator::ValidationErrors),

    #[error("{0}")]
    Conflict(String),

    #[error("Incorrect Username/Password")]
    Credentials,

    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Errors the user can fix by changing the submitted form.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::Validate(_) | Error::Conflict(_) | Error::Credentials
        )
    }
}

impl From<sqlx::Error> for Error {
    fn from(value: sqlx::Error) -> Self {
        Self::Unknown(value.into())
    }
}

impl From<argon2::password_hash::Error> for Error {
    fn from(value: argon2::password_hash::Error) -> Self {
        Self::Server(value.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Unknown(value.into())
    }
}

/// Returns true when the database rejected a write because of a unique index.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

#[macro_export]
macro_rules! conflict {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Conflict(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Conflict(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_error_does_not_name_the_field() {
        assert_eq!(Error::Credentials.to_string(), "Incorrect Username/Password");
    }

    #[test]
    fn user_errors_are_flagged() {
        assert!(Error::Conflict("Email already registered".to_owned()).is_user_error());
        assert!(Error::Credentials.is_user_error());
        assert!(!Error::Server("boom".to_owned()).is_user_error());
    }
}
