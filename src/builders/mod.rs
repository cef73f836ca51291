//! # Builders
//!
//! Builder patterns for configuring derivations.
//!
//! ## Modules
//!
//! - [`session_builder`] - Builder for [`DerivationSession`](crate::DerivationSession)
//!
//! ## Usage
//!
//! Builders provide a fluent API with sensible defaults and optional customization.

pub mod session_builder;
