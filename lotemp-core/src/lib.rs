//! Core library for the `lotemp` CLI.
//!
//! This crate defines:
//! - Coordinate validation and the current-temperature reading model
//! - Config file resolution (`$HOME/.lotemp`)
//! - The forecast fetcher against the Open-Meteo API
//!
//! It is used by `lotemp-cli`, but can also be reused by other binaries.

pub mod config;
pub mod error;
pub mod fetch;
pub mod model;

pub use error::{Error, ErrorKind, Result};
pub use fetch::{DEFAULT_TIMEOUT, Fetcher};
pub use model::{Coordinate, Coordinates, MAX_COORD_LEN, Reading};
