//! Combat systems (FixedUpdate, порядок задаёт `CombatSet`)

pub mod damage;
pub mod deferred;
pub mod ledger;
pub mod weapon;

// Re-export all systems
pub use damage::*;
pub use deferred::*;
pub use ledger::*;
pub use weapon::*;
