//! List pagination window

use serde::Deserialize;

use super::ValidationError;

/// Default number of tasks returned by a list call
const DEFAULT_LIMIT: i64 = 100;

/// Maximum number of tasks returned by a list call
const MAX_LIMIT: i64 = 200;

/// Validated pagination window for list queries.
///
/// Out-of-range values are rejected rather than clamped, preserving the
/// service's external contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Number of rows to skip (>= 0)
    pub skip: i64,
    /// Maximum rows to return (1-200)
    pub limit: i64,
}

impl Page {
    /// Build a page from optional query parameters.
    pub fn new(skip: Option<i64>, limit: Option<i64>) -> Result<Self, ValidationError> {
        let skip = skip.unwrap_or(0);
        if skip < 0 {
            return Err(ValidationError::OutOfRange {
                field: "skip",
                reason: "must be greater than or equal to 0",
            });
        }

        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(ValidationError::OutOfRange {
                field: "limit",
                reason: "must be between 1 and 200",
            });
        }

        Ok(Self { skip, limit })
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Raw query parameters for list endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl TryFrom<PageParams> for Page {
    type Error = ValidationError;

    fn try_from(params: PageParams) -> Result<Self, Self::Error> {
        Self::new(params.skip, params.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let page = Page::new(None, None).unwrap();
        assert_eq!(page, Page { skip: 0, limit: 100 });
    }

    #[test]
    fn accepts_bounds() {
        assert!(Page::new(Some(0), Some(1)).is_ok());
        assert!(Page::new(Some(1000), Some(200)).is_ok());
    }

    #[test]
    fn rejects_negative_skip() {
        let err = Page::new(Some(-1), None).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { field: "skip", .. }));
    }

    #[test]
    fn rejects_limit_out_of_range() {
        let err = Page::new(None, Some(0)).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { field: "limit", .. }));

        let err = Page::new(None, Some(201)).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { field: "limit", .. }));
    }
}
