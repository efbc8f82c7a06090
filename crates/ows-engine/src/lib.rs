//! Adjudication engine for OWS.
//!
//! Stateless resolvers for shielded combat, detection, fighter engagement,
//! ground combat, supply, the space dashboard, IO/cyber, strike packages and
//! air tasking. `AdjudicationSession` ties them to a seeded roller and a
//! journal so a run can be replayed exactly.

pub mod air_tasking;
pub mod combat;
pub mod detection;
pub mod fighter;
pub mod ground;
pub mod io_cyber;
pub mod rng;
pub mod session;
pub mod space;
pub mod strike;
pub mod supply;

pub use ows_core as core;
pub use rng::{DiceRoller, ScriptedRoller, SeededRoller};
pub use session::{AdjudicationSession, SessionConfig};

#[cfg(test)]
mod tests;
