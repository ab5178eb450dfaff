use http::StatusCode;
use std::collections::BTreeSet;
use std::iter::FromIterator;
use std::sync::Arc;

/// The set of response statuses that [`StatusRetry`](super::StatusRetry)
/// treats as retryable.
///
/// The default set is `408 Request Timeout`, `429 Too Many Requests`,
/// `500 Internal Server Error`, `502 Bad Gateway`, `503 Service Unavailable`
/// and `504 Gateway Timeout`. An empty set disables retrying altogether.
///
/// Cloning is cheap; clones share the same set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryableStatuses {
    codes: Arc<BTreeSet<u16>>,
}

impl RetryableStatuses {
    /// Build a set from the given statuses.
    pub fn new<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = StatusCode>,
    {
        statuses.into_iter().collect()
    }

    /// A set that retries nothing.
    pub fn none() -> Self {
        RetryableStatuses {
            codes: Arc::new(BTreeSet::new()),
        }
    }

    /// Returns `true` if responses with `status` may be retried.
    pub fn contains(&self, status: StatusCode) -> bool {
        self.codes.contains(&status.as_u16())
    }

    /// Returns `true` if no status is retryable.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for RetryableStatuses {
    fn default() -> Self {
        RetryableStatuses::new(vec![
            StatusCode::REQUEST_TIMEOUT,
            StatusCode::TOO_MANY_REQUESTS,
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_GATEWAY,
            StatusCode::SERVICE_UNAVAILABLE,
            StatusCode::GATEWAY_TIMEOUT,
        ])
    }
}

impl FromIterator<StatusCode> for RetryableStatuses {
    fn from_iter<I: IntoIterator<Item = StatusCode>>(iter: I) -> Self {
        RetryableStatuses {
            codes: Arc::new(iter.into_iter().map(|status| status.as_u16()).collect()),
        }
    }
}
