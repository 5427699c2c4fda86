//! User data model.
//!
//! A user exists in two shapes: [`NewUser`] before the store has assigned an
//! identifier and [`User`] once it has. Field newtypes enforce their
//! invariants at construction, so every value reaching the service tier is
//! already valid.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Validation errors returned by the user field constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    MissingEmail,
    InvalidEmail,
    MissingAge,
    MissingId,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::MissingEmail => write!(f, "email is required"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::MissingAge => write!(f, "age is required and must be non-zero"),
            Self::MissingId => write!(f, "id is required and must be non-zero"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Store-assigned user identifier.
///
/// Any integer is a well-formed identifier; values the store never assigned
/// (zero, negatives) simply never match a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(i64);

impl UserId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Identifier taken from an update payload, where zero means "absent".
    pub fn assigned(value: i64) -> Result<Self, UserValidationError> {
        if value == 0 {
            return Err(UserValidationError::MissingId);
        }
        Ok(Self(value))
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// User name; any non-empty text, whitespace included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

/// Syntactically valid email address, unique per stored user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // HTML living standard "valid e-mail address", widened to Unicode
        // letters and digits. Label length is checked separately.
        let pattern = concat!(
            r"^[\p{L}\p{N}.!#$%&'*+/=?^_`{|}~-]+",
            r"@[\p{L}\p{N}](?:[\p{L}\p{N}-]*[\p{L}\p{N}])?",
            r"(?:\.[\p{L}\p{N}](?:[\p{L}\p{N}-]*[\p{L}\p{N}])?)*$",
        );
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

const MAX_DOMAIN_LABEL_CHARS: usize = 63;

fn domain_labels_fit(email: &str) -> bool {
    email.rsplit_once('@').is_some_and(|(_, domain)| {
        domain
            .split('.')
            .all(|label| label.chars().count() <= MAX_DOMAIN_LABEL_CHARS)
    })
}

impl EmailAddress {
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if email.is_empty() {
            return Err(UserValidationError::MissingEmail);
        }
        if !email_regex().is_match(&email) || !domain_labels_fit(&email) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Age in years. Zero is indistinguishable from "not supplied" and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Age(i32);

impl Age {
    pub fn new(value: i32) -> Result<Self, UserValidationError> {
        if value == 0 {
            return Err(UserValidationError::MissingAge);
        }
        Ok(Self(value))
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A user that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: UserName,
    pub email: EmailAddress,
    pub age: Age,
}

impl NewUser {
    /// Attach the identifier the store assigned.
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            age: self.age,
        }
    }
}

/// Stored user.
///
/// ## Invariants
/// - `id` identifies exactly one row.
/// - `email` is held by no other row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
    pub email: EmailAddress,
    pub age: Age,
}
