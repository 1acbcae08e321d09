//! Core types and trait definitions for the xAPI LRS client.
//!
//! This crate is deliberately free of HTTP and wire-format dependencies.
//! The JSON codec lives in `xapi-json`; the remote client in `xapi-client`.

pub mod about;
pub mod activity;
pub mod actor;
pub mod context;
pub mod document;
pub mod error;
pub mod extensions;
pub mod language;
pub mod lrs;
pub mod outcome;
pub mod query;
pub mod response;
pub mod statement;
pub mod verb;
pub mod version;

pub use error::{Error, Result};
pub use lrs::Lrs;
pub use response::LrsResponse;
pub use version::Version;
