//! A catalog of books and authors behind a GraphQL interface.
//!
//! Reads are open to anonymous callers; every write except identity creation
//! and credential issuance is gated on a bearer JWT resolved once per request
//! into a [`context::RequestContext`]. Author book counts are derived from
//! the work collection on every read, never stored.

pub mod auth;
pub mod configuration;
pub mod context;
pub mod error;
pub mod graphql;
pub mod server;
pub mod store;
