//! Async REST client for the shelf catalog data API.
//!
//! A [`ResourceClient`] speaks to one JSON collection (`/books`,
//! `/authors`) with the standard verbs. All clients are built from a
//! shared [`TransportConfig`].

pub mod client;
pub mod error;
pub mod transport;

pub use client::ResourceClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
