//! # Registration State Machine
//!
//! Lifecycle state machine for proxy-vote applications:
//! `Submitted -> PendingValidation -> Validated | Rejected`. Transitions
//! commit through the application store's compare-and-swap so that at most
//! one validation transition lands per registration.

pub mod errors;
pub mod events;
pub mod guards;
pub mod registration_state_machine;
pub mod states;

// Re-export main types for convenient access
pub use errors::{GuardError, GuardResult, StateMachineError, StateMachineResult};
pub use events::RegistrationEvent;
pub use registration_state_machine::{determine_target_state, RegistrationStateMachine};
pub use states::RegistrationState;

// Common traits
pub use guards::{DistinctPartiesGuard, StateGuard, ValidationWindowGuard};
