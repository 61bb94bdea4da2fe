#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, JSONB in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Proxy-Vote Core
//!
//! Registration lifecycle and validation engine for a proxy-voting system.
//!
//! ## Overview
//!
//! A proxy-vote application is created by the intake service, then driven
//! through `Submitted -> PendingValidation -> Validated | Rejected` by the
//! lifecycle engine, which consults an authoritative identity source and
//! enforces the no-self-proxy invariant. Every status transition commits
//! through the application store's compare-and-swap, which is the core's
//! only synchronization point: concurrent validation attempts on the same
//! registration serialize there, and exactly one produces the terminal
//! outcome.
//!
//! ## Module Organization
//!
//! - [`models`] - Application, identity, and validation records
//! - [`state_machine`] - Registration lifecycle state management
//! - [`store`] - Keyed record store with atomic conditional updates
//! - [`identity`] - Identity matching against the civil registry
//! - [`services`] - Intake service and lifecycle engine
//! - [`registry`] - Known jurisdiction codes
//! - [`resilience`] - Bounded backoff for identity source calls
//! - [`config`] - Configuration management
//! - [`events`] - Lifecycle event publication
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use proxy_vote_core::config::ProxyVoteConfig;
//! use proxy_vote_core::events::EventPublisher;
//! use proxy_vote_core::identity::StaticMatcher;
//! use proxy_vote_core::registry::DepartmentRegistry;
//! use proxy_vote_core::services::{RegistrationIntakeService, RegistrationLifecycleEngine};
//! use proxy_vote_core::store::{ApplicationStore, InMemoryApplicationStore};
//! use std::sync::Arc;
//!
//! # async fn example(
//! #     application: proxy_vote_core::models::NewProxyApplication,
//! # ) -> proxy_vote_core::error::Result<()> {
//! let config = ProxyVoteConfig::default();
//! let store: Arc<dyn ApplicationStore> = Arc::new(InMemoryApplicationStore::new());
//! let publisher = EventPublisher::default();
//!
//! let intake = RegistrationIntakeService::new(
//!     Arc::clone(&store),
//!     Arc::new(DepartmentRegistry::with_codes(["75001"])),
//!     publisher.clone(),
//!     &config.intake,
//! );
//! let engine = RegistrationLifecycleEngine::from_config(
//!     &config,
//!     Arc::clone(&store),
//!     Arc::new(StaticMatcher::matching()),
//!     publisher,
//! );
//!
//! let registration_id = intake.create_registration(application).await?;
//! let record = engine.get_registration_by_id("75001", &registration_id).await?;
//! println!("status: {:?}", record.map(|r| r.status));
//! # Ok(())
//! # }
//! ```
//!
//! ## Integration
//!
//! The transport layer (HTTP handlers, serverless functions) stays outside
//! this crate: it deserializes requests into [`models`] types, calls the two
//! services, and maps [`error::RegistrationError`] variants onto its own
//! response vocabulary.

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod identity;
pub mod logging;
pub mod models;
pub mod registry;
pub mod resilience;
pub mod services;
pub mod state_machine;
pub mod store;
pub mod validation;

pub use config::{
    BackoffConfig, ConfigManager, DatabaseConfig, IdentityConfig, IntakeConfig, ProxyVoteConfig,
};
pub use error::{RegistrationError, Result};
pub use events::{EventPublisher, RegistrationEventEnvelope};
pub use identity::{
    CivilRegistryMatcher, IdentityError, IdentityMatch, IdentityMatcher, StaticMatcher,
};
pub use models::{
    Applicant, ApplicationValidation, NewProxyApplication, ProxyApplication, ProxyVoter,
    ValidationDecision,
};
pub use registry::DepartmentRegistry;
pub use resilience::RetryPolicy;
pub use services::{RegistrationIntakeService, RegistrationLifecycleEngine};
pub use state_machine::{RegistrationEvent, RegistrationState, RegistrationStateMachine};
pub use store::{
    ApplicationStore, InMemoryApplicationStore, PostgresApplicationStore, StoreError,
    TerminalFields,
};
