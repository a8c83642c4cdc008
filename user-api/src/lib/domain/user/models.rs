use std::fmt;

use auth::Role;
use chrono::DateTime;
use chrono::Utc;
use secrecy::Secret;
use uuid::Uuid;

use crate::user::errors::UserIdError;
use crate::user::errors::ValidationError;

/// User aggregate entity.
///
/// Only the Argon2 hash of the password is ever held here.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: EmailAddress,
    pub password_hash: String,
    pub role: Role,
    pub age: u32,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Oldest accepted age, well inside the storage column's range.
pub const MAX_AGE: u32 = 150;

/// Check an age supplied by a caller.
///
/// # Errors
/// * `AgeOutOfRange` - Age is above `MAX_AGE`
pub fn validate_age(age: u32) -> Result<u32, ValidationError> {
    if age > MAX_AGE {
        return Err(ValidationError::AgeOutOfRange(age));
    }
    Ok(age)
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// The directory keys users by email; only presence is checked here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create an email address from raw input, trimming surrounding whitespace.
    ///
    /// # Errors
    /// * `MissingField` - Input is empty or whitespace only
    pub fn new(email: String) -> Result<Self, ValidationError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::MissingField("email"));
        }
        Ok(Self(email.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One page of a user listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u32,
    limit: u32,
}

impl Page {
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const MAX_LIMIT: u32 = 100;

    /// Create a page request. Pages are numbered from 1.
    ///
    /// # Errors
    /// * `InvalidPagination` - Page is 0, or limit is 0 or above `MAX_LIMIT`
    pub fn new(number: u32, limit: u32) -> Result<Self, ValidationError> {
        if number == 0 {
            return Err(ValidationError::InvalidPagination(
                "page must be at least 1".to_string(),
            ));
        }
        if limit == 0 || limit > Self::MAX_LIMIT {
            return Err(ValidationError::InvalidPagination(format!(
                "limit must be between 1 and {}",
                Self::MAX_LIMIT
            )));
        }
        Ok(Self { number, limit })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of records to skip before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.number - 1) * u64::from(self.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            number: 1,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// Command to create a new user with domain types
#[derive(Debug)]
pub struct CreateUserCommand {
    pub first_name: String,
    pub last_name: String,
    pub email: EmailAddress,
    /// Plain text password (hashed by the service, redacted in Debug output)
    pub password: Secret<String>,
    pub role: Role,
    pub age: u32,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

/// Command to update an existing user with optional validated fields.
///
/// All fields are optional to support partial updates.
/// Only provided fields will be updated.
#[derive(Debug, Default)]
pub struct UpdateUserCommand {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<EmailAddress>,
    pub password: Option<Secret<String>>,
    pub role: Option<Role>,
    pub age: Option<u32>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}
