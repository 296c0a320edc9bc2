//! # Campus Events Core
//!
//! Storage engine and business rules for a campus event catalog.
//!
//! The crate keeps three collections (users, events, registrations) behind
//! the [`Storage`] trait and layers the cross-entity rules on top:
//!
//! - [`EventCatalog`]: validated create, partial update and delete of events
//! - [`RegistrationEngine`]: capacity-checked, duplicate-free registration
//! - [`EventQueries`]: sorted listing, category filter, search and per-user views
//! - [`Accounts`]: sign-up with unique usernames, and login
//!
//! [`CampusEvents`] wires all four over one store.
//!
//! ## Example
//!
//! ```
//! use campus_events_core::{CampusEvents, InMemoryStorage, seed};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), campus_events_core::CatalogError> {
//! let storage = Arc::new(InMemoryStorage::default());
//! seed::seed_sample_data(storage.as_ref()).await?;
//!
//! let app = CampusEvents::new(storage);
//! let careers = app.queries().search_events("career").await?;
//! assert_eq!(careers.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod accounts;
pub mod catalog;
pub mod environment;
pub mod error;
pub mod ids;
pub mod memory;
pub mod metrics;
pub mod query;
pub mod registration;
pub mod seed;
pub mod service;
pub mod storage;
pub mod types;
pub mod validation;

pub use accounts::Accounts;
pub use catalog::EventCatalog;
pub use environment::{Clock, SystemClock};
pub use error::{CatalogError, EntityKind, Result, StorageError};
pub use memory::InMemoryStorage;
pub use query::EventQueries;
pub use registration::{RegistrationEngine, WriteGate};
pub use service::CampusEvents;
pub use storage::{Storage, StorageFuture};
pub use types::{
    Capacity, Category, Event, EventDetails, EventId, EventPatch, NewEvent, NewUser, PublicUser,
    Registration, RegistrationId, User, UserId,
};
pub use validation::{Credentials, EventInput, EventPatchInput, SignUpInput};

// Re-export commonly used types
pub use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
