//! Films listing: wire schema, view model, validation and the fetch pipeline.

mod client;
mod error;
mod model;

pub use client::{HttpTransport, Transport, fetch_movies};
pub use error::FetchError;
pub use model::Movie;

#[cfg(test)]
pub(crate) use client::testing;
#[cfg(test)]
pub(crate) use error::REQUEST_FAILED_MESSAGE;
