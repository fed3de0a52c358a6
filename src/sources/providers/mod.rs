//! Concrete data-source implementations.
//!
//! Each submodule wraps a single website and implements one of the source
//! traits in [`provider`](super::provider).

pub mod imdb;
pub mod justwatch;
pub mod letterboxd;

pub use imdb::ImdbProvider;
pub use justwatch::JustWatchProvider;
pub use letterboxd::LetterboxdProvider;
