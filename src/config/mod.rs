//! Configuration management.
//!
//! Handles loading, parsing and validating the TOML configuration file,
//! including generation of a commented default file via `--create-config`.

/// Configuration error enumeration.
pub mod enums;

/// Implementation blocks for configuration structs.
pub mod impls;

/// Configuration struct definitions.
pub mod structs;

#[cfg(test)]
mod tests;
