use courier_service::Response;

/// The reason passed to [`Body::cancel`](courier_service::Body::cancel) when a
/// response is discarded in favor of a retry.
pub const RETRY_SCHEDULED: &str = "Retry scheduled";

/// Release the body of a response that is about to be replaced by a retry.
///
/// Failure to release is logged and otherwise ignored: it must never decide
/// whether the retry happens.
pub(crate) fn release_body(mut response: Response) {
    if let Err(error) = response.body_mut().cancel(RETRY_SCHEDULED) {
        tracing::debug!(
            status = %response.status(),
            %error,
            "failed to release response body before retry"
        );
    }
}
