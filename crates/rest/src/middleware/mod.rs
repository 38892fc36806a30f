//! Axum middleware for the Atrium API.

pub mod auth;
