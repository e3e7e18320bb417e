//! Zodgen Core Types
//!
//! This crate provides the data model shared by the zodgen pipeline:
//!
//! - **Schema**: Parsed enum and model definitions ([`schema`] module)
//! - **Declarations**: Generated output units and their references ([`declaration`] module)

pub mod declaration;
pub mod schema;
