pub mod bridge;
pub mod components;
pub mod scheduler;
pub mod script;

pub use bridge::{AceBridgeFactory, AceBridgeWidget, BridgeError, BridgeMessage, BridgeStatus};
pub use components::*;
pub use scheduler::DioxusScheduler;
