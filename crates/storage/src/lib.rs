//! Storage layer for the Amino client
//!
//! This crate provides local persistence for client state that has to
//! survive process restarts, such as the device identity file.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod persistence;

pub use persistence::{JsonFile, PersistenceConfig, PersistenceError};
