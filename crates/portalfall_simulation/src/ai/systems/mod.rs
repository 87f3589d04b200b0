//! Adversary systems (FixedUpdate)

pub mod fsm;
pub mod movement;
pub mod reactions;

pub use fsm::*;
pub use movement::*;
pub use reactions::*;
