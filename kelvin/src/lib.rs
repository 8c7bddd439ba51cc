#![warn(missing_docs)]
//! Command-line evaluation of trained building-control policies.
//!
//! The binary wires the pieces together: it loads a policy artifact through
//! `kelvin-policy`, builds an environment, drives the `kelvin-core`
//! evaluation loop, and persists the run's artifacts (episode table, summary
//! statistics, optional step trace) through [`output`].
pub mod output;
