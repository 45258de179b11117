use std::fmt;

// === StorageError ===

/// Errors raised by a local key-value store.
#[derive(Debug)]
pub enum StorageError {
    /// The store cannot be accessed at all (disabled, locked, or gone).
    Unavailable(String),
    /// A write would push the store past its byte quota.
    QuotaExceeded { key: String, quota: usize },
    /// The backing database rejected the operation.
    DatabaseError(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable(msg) => write!(f, "Storage unavailable: {}", msg),
            StorageError::QuotaExceeded { key, quota } => {
                write!(f, "Storage quota of {} bytes exceeded writing '{}'", quota, key)
            }
            StorageError::DatabaseError(msg) => write!(f, "Storage database error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::DatabaseError(err.to_string())
    }
}

// === FrequentlyViewedError ===

/// Errors related to the frequently viewed documents list.
#[derive(Debug)]
pub enum FrequentlyViewedError {
    /// Reading or writing the underlying store failed.
    Storage(StorageError),
    /// The stored list could not be parsed or encoded.
    SerializationError(String),
    /// No serial is left above the highest one in use.
    SerialsExhausted,
}

impl fmt::Display for FrequentlyViewedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrequentlyViewedError::Storage(err) => {
                write!(f, "Frequently viewed storage error: {}", err)
            }
            FrequentlyViewedError::SerializationError(msg) => {
                write!(f, "Frequently viewed serialization error: {}", msg)
            }
            FrequentlyViewedError::SerialsExhausted => {
                write!(f, "Frequently viewed serials exhausted")
            }
        }
    }
}

impl std::error::Error for FrequentlyViewedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FrequentlyViewedError::Storage(err) => Some(err),
            FrequentlyViewedError::SerializationError(_)
            | FrequentlyViewedError::SerialsExhausted => None,
        }
    }
}

impl From<StorageError> for FrequentlyViewedError {
    fn from(err: StorageError) -> Self {
        FrequentlyViewedError::Storage(err)
    }
}

impl From<serde_json::Error> for FrequentlyViewedError {
    fn from(err: serde_json::Error) -> Self {
        FrequentlyViewedError::SerializationError(err.to_string())
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// File I/O operation failed.
    IoError(String),
    /// Serialization or deserialization failed.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => write!(f, "Invalid settings value: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}

// === PageError ===

/// Errors raised while loading a static documentation page.
#[derive(Debug)]
pub enum PageError {
    /// The server answered with a non-OK status.
    NotFound(String),
    /// The request never produced a response.
    NetworkError(String),
    /// The response body was not a valid page document.
    InvalidResponse(String),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::NotFound(msg) => write!(f, "Page not found: {}", msg),
            PageError::NetworkError(msg) => write!(f, "Page network error: {}", msg),
            PageError::InvalidResponse(msg) => write!(f, "Invalid page response: {}", msg),
        }
    }
}

impl std::error::Error for PageError {}
