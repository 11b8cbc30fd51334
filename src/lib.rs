//! Fare estimation for delivery bookings.
//!
//! The [`pricing`] module holds the pure calculators and the quote service;
//! [`cache`] retains issued quotes and [`config`] reads runtime settings.

pub mod cache;
pub mod config;
pub mod error;
pub mod pricing;

pub use config::Config;
pub use error::{AppError, Result};
