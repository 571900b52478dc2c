//! PC Forge client - build assistant front-end helper
//!
//! This crate sends a free-text query to the PC Forge build service,
//! parses the generated build description and fills the component form
//! (one model and one price field per hardware slot).

pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod parsers;
pub mod reports;
pub mod session;
pub mod slots;
