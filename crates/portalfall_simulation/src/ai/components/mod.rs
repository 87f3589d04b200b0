//! Adversary components (FSM state, config, vitals, attack timing).

pub mod fsm;

#[cfg(test)]
mod fsm_tests;

pub use fsm::*;
