#![forbid(unsafe_code)]

//! Public entry point for the reusable wimby crate.
//!
//! The library holds everything the `analyze_channel` binary needs: the
//! YouTube Data API client, the pagination and ranking logic, and the CSV
//! exporter. Keeping it all out of the binary makes each piece testable
//! without a network connection or an API key.

pub mod catalog;
pub mod comments;
pub mod config;
pub mod duration;
pub mod error;
pub mod export;
pub mod youtube;
