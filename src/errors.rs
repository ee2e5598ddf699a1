use std::fmt;

#[derive(Debug, Clone)]
pub enum ShortlyError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(String),
    TitleFetch(String),
    Conflict(String),
    CodeSpaceExhausted(String),
    NotFound(String),
    Serialization(String),
    Auth(String),
    PasswordHash(String),
}

impl ShortlyError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ShortlyError::DatabaseConfig(_) => "E001",
            ShortlyError::DatabaseConnection(_) => "E002",
            ShortlyError::DatabaseOperation(_) => "E003",
            ShortlyError::FileOperation(_) => "E004",
            ShortlyError::Validation(_) => "E005",
            ShortlyError::TitleFetch(_) => "E006",
            ShortlyError::Conflict(_) => "E007",
            ShortlyError::CodeSpaceExhausted(_) => "E008",
            ShortlyError::NotFound(_) => "E009",
            ShortlyError::Serialization(_) => "E010",
            ShortlyError::Auth(_) => "E011",
            ShortlyError::PasswordHash(_) => "E012",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ShortlyError::DatabaseConfig(_) => "Database Configuration Error",
            ShortlyError::DatabaseConnection(_) => "Database Connection Error",
            ShortlyError::DatabaseOperation(_) => "Database Operation Error",
            ShortlyError::FileOperation(_) => "File Operation Error",
            ShortlyError::Validation(_) => "Validation Error",
            ShortlyError::TitleFetch(_) => "Title Fetch Error",
            ShortlyError::Conflict(_) => "Conflict",
            ShortlyError::CodeSpaceExhausted(_) => "Short Code Assignment Failed",
            ShortlyError::NotFound(_) => "Resource Not Found",
            ShortlyError::Serialization(_) => "Serialization Error",
            ShortlyError::Auth(_) => "Authentication Error",
            ShortlyError::PasswordHash(_) => "Password Hash Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ShortlyError::DatabaseConfig(msg)
            | ShortlyError::DatabaseConnection(msg)
            | ShortlyError::DatabaseOperation(msg)
            | ShortlyError::FileOperation(msg)
            | ShortlyError::Validation(msg)
            | ShortlyError::TitleFetch(msg)
            | ShortlyError::Conflict(msg)
            | ShortlyError::CodeSpaceExhausted(msg)
            | ShortlyError::NotFound(msg)
            | ShortlyError::Serialization(msg)
            | ShortlyError::Auth(msg)
            | ShortlyError::PasswordHash(msg) => msg,
        }
    }

    /// HTTP status used when the error reaches the API boundary.
    ///
    /// Invalid input and unreachable targets are reported as 404, matching
    /// the contract of `POST /links`.
    pub fn http_status(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match self {
            ShortlyError::Validation(_)
            | ShortlyError::TitleFetch(_)
            | ShortlyError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Colored output for terminal use
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, ShortlyError::Conflict(_))
    }
}

impl fmt::Display for ShortlyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ShortlyError {}

impl ShortlyError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        ShortlyError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        ShortlyError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        ShortlyError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        ShortlyError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ShortlyError::Validation(msg.into())
    }

    pub fn title_fetch<T: Into<String>>(msg: T) -> Self {
        ShortlyError::TitleFetch(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        ShortlyError::Conflict(msg.into())
    }

    pub fn code_space_exhausted<T: Into<String>>(msg: T) -> Self {
        ShortlyError::CodeSpaceExhausted(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ShortlyError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ShortlyError::Serialization(msg.into())
    }

    pub fn auth<T: Into<String>>(msg: T) -> Self {
        ShortlyError::Auth(msg.into())
    }

    pub fn password_hash<T: Into<String>>(msg: T) -> Self {
        ShortlyError::PasswordHash(msg.into())
    }
}

impl From<sea_orm::DbErr> for ShortlyError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => ShortlyError::Conflict(msg),
            _ => ShortlyError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<std::io::Error> for ShortlyError {
    fn from(err: std::io::Error) -> Self {
        ShortlyError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ShortlyError {
    fn from(err: serde_json::Error) -> Self {
        ShortlyError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShortlyError>;
