//! Caller-supplied addresses.
//!
//! Addresses are opaque to the engine: they are handed to a
//! [`Geocoder`](crate::Geocoder) verbatim and echoed back in the route
//! summary. The only rule enforced here is that the text is not blank.

use std::fmt;

use thiserror::Error;

/// A non-empty, free-text address.
///
/// The original text is preserved exactly, including surrounding
/// whitespace, so the summary echoes what the caller sent.
///
/// # Examples
/// ```
/// use routewise_core::Address;
///
/// let address = Address::new("10 Downing Street, London")?;
/// assert_eq!(address.as_str(), "10 Downing Street, London");
/// assert!(Address::new("   ").is_err());
/// # Ok::<(), routewise_core::AddressError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Address(String);

/// Errors returned by [`Address::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The address contained no non-whitespace characters.
    #[error("address must not be empty")]
    Empty,
}

impl Address {
    /// Validate and wrap `text`.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::Empty`] when `text` is empty or whitespace.
    pub fn new(text: impl Into<String>) -> Result<Self, AddressError> {
        let owned = text.into();
        if owned.trim().is_empty() {
            return Err(AddressError::Empty);
        }
        Ok(Self(owned))
    }

    /// Borrow the address text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Address {
    type Error = AddressError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.0
    }
}
