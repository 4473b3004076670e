//! Optimization requests as received from callers.

use thiserror::Error;

use crate::Address;

/// Minimum number of addresses: the fixed start and the fixed end.
pub const MIN_ADDRESSES: usize = 2;

/// Raw optimization request.
///
/// Mirrors the JSON body accepted by the web layer,
/// `{"addresses": ["start", "...", "end"]}`. The first address is the fixed
/// start and the last the fixed end; anything in between is a waypoint.
///
/// # Examples
/// ```rust
/// use routewise_core::OptimizeRequest;
///
/// let request = OptimizeRequest::new(["Depot", "Customer", "Depot"]);
/// let addresses = request.into_addresses()?;
/// assert_eq!(addresses.len(), 3);
/// # Ok::<(), routewise_core::RequestValidationError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizeRequest {
    /// Addresses in visiting-constraint order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub addresses: Vec<String>,
}

/// Validation failures for an [`OptimizeRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestValidationError {
    /// Fewer than two addresses were supplied.
    #[error("at least two addresses are required, got {count}")]
    TooFewAddresses {
        /// Number of addresses supplied.
        count: usize,
    },
    /// An address was blank.
    #[error("address at position {index} is empty")]
    EmptyAddress {
        /// Zero-based position of the blank address.
        index: usize,
    },
}

impl OptimizeRequest {
    /// Build a request from any iterable of address strings.
    pub fn new<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            addresses: addresses.into_iter().map(Into::into).collect(),
        }
    }

    /// Check the request without consuming it.
    ///
    /// # Errors
    ///
    /// See [`OptimizeRequest::into_addresses`].
    pub fn validate(&self) -> Result<(), RequestValidationError> {
        ensure_enough(self.addresses.len())?;
        self.addresses
            .iter()
            .position(|text| text.trim().is_empty())
            .map_or(Ok(()), |index| {
                Err(RequestValidationError::EmptyAddress { index })
            })
    }

    /// Validate and convert into typed addresses.
    ///
    /// # Errors
    ///
    /// Returns [`RequestValidationError::TooFewAddresses`] for fewer than
    /// [`MIN_ADDRESSES`] entries and [`RequestValidationError::EmptyAddress`]
    /// for the first blank entry.
    pub fn into_addresses(self) -> Result<Vec<Address>, RequestValidationError> {
        ensure_enough(self.addresses.len())?;
        self.addresses
            .into_iter()
            .enumerate()
            .map(|(index, text)| {
                Address::new(text).map_err(|_| RequestValidationError::EmptyAddress { index })
            })
            .collect()
    }
}

/// Reject address lists shorter than [`MIN_ADDRESSES`].
pub(crate) const fn ensure_enough(count: usize) -> Result<(), RequestValidationError> {
    if count < MIN_ADDRESSES {
        return Err(RequestValidationError::TooFewAddresses { count });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Vec::new(), 0)]
    #[case(vec!["Only one"], 1)]
    fn rejects_short_requests(#[case] addresses: Vec<&str>, #[case] count: usize) {
        let request = OptimizeRequest::new(addresses);
        assert_eq!(
            request.validate(),
            Err(RequestValidationError::TooFewAddresses { count })
        );
        assert_eq!(
            request.into_addresses(),
            Err(RequestValidationError::TooFewAddresses { count })
        );
    }

    #[rstest]
    fn reports_first_blank_address() {
        let request = OptimizeRequest::new(["Start", " ", "", "End"]);
        assert_eq!(
            request.validate(),
            Err(RequestValidationError::EmptyAddress { index: 1 })
        );
        assert_eq!(
            request.into_addresses(),
            Err(RequestValidationError::EmptyAddress { index: 1 })
        );
    }

    #[rstest]
    fn keeps_input_order() {
        let addresses = OptimizeRequest::new(["A", "B", "C"])
            .into_addresses()
            .expect("valid request");
        let texts: Vec<&str> = addresses.iter().map(Address::as_str).collect();
        assert_eq!(texts, ["A", "B", "C"]);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn parses_web_payload() {
        let request: OptimizeRequest =
            serde_json::from_str(r#"{"addresses": ["Berlin", "Potsdam"]}"#)
                .expect("payload should parse");
        assert_eq!(request.addresses, ["Berlin", "Potsdam"]);
    }
}
