//! Error types

use std::{error, fmt};

pub(crate) type Error = courier_service::BoxError;

/// The [`Handle`](super::Handle) was dropped, or the response for a request
/// was never sent.
#[derive(Debug)]
pub struct Closed(());

impl Closed {
    pub(crate) fn new() -> Closed {
        Closed(())
    }
}

impl fmt::Display for Closed {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "mock fetch closed")
    }
}

impl error::Error for Closed {}
