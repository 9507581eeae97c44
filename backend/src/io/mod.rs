//! # IO Module
//!
//! Adapters between the reward card domain and the outside world.
//!
//! - **rest**: axum handlers serving the card screen, mapping domain results
//!   to the DTOs in the `shared` crate and domain errors to HTTP statuses
//! - **judge**: the HTTP client that asks a generative model whether a
//!   behavior earns a stamp

pub mod judge;
pub mod rest;
