#![warn(
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    unreachable_pub
)]
#![forbid(unsafe_code)]
#![allow(elided_lifetimes_in_paths)]

//! Mock fetches and probe bodies for testing courier executors.
//!
//! [`mock::pair`] returns a [`Fetch`](courier_service::Fetch) whose calls are
//! answered by the test through a [`Handle`](mock::Handle), so a test decides
//! each attempt's outcome as it happens. [`body::probe`] builds response
//! bodies that record how they were released.

pub mod body;
mod macros;
pub mod mock;
