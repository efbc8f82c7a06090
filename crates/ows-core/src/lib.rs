//! Core types and rule vocabulary for the OWS adjudication engine.
//!
//! This crate defines what every resolver speaks: die ranks and the
//! meet-or-beat rule, unit and aircraft records, the space dashboard,
//! adjudication requests and journal records, configuration and errors.
//! It holds no randomness and performs no adjudication of its own.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod dice;
pub mod enums;
pub mod error;
pub mod events;
pub mod outcome;
pub mod state;
pub mod types;

pub use dice::DieRank;
pub use error::{Result, RulesError};
