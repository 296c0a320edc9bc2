//! Storage trait for users, events and registrations.
//!
//! This module defines the capability the rest of the engine is written
//! against. The registration engine, query layer, catalog and accounts all
//! hold an `Arc<dyn Storage>` and never see a concrete backend.
//!
//! # Implementations
//!
//! - [`InMemoryStorage`](crate::memory::InMemoryStorage): the only backend,
//!   keyed maps behind an async `RwLock`
//!
//! # Contract
//!
//! - Every method is atomic with respect to the others; a mutation is
//!   visible to the next read.
//! - `insert_*` allocates the id from a per-type monotonic counter and stamps
//!   `created_at` where the entity has one.
//! - Listing methods return entities in insertion (id) order.
//! - Cross-entity rules (capacity, uniqueness, existence) are NOT enforced
//!   here; that is the job of [`RegistrationEngine`](crate::registration::RegistrationEngine)
//!   and [`Accounts`](crate::accounts::Accounts).
//!
//! # Dyn Compatibility
//!
//! Methods return `Pin<Box<dyn Future>>` instead of being `async fn` so the
//! trait can be used as `Arc<dyn Storage>`.

use crate::error::StorageError;
use crate::types::{
    Event, EventId, EventPatch, NewEvent, NewUser, Registration, RegistrationId, User, UserId,
};
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by [`Storage`] methods.
pub type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StorageError>> + Send + 'a>>;

/// Keyed collections of users, events and registrations.
pub trait Storage: Send + Sync {
    // ----- users -----

    /// Look up a user by id.
    ///
    /// # Errors
    ///
    /// Backend failure only; a missing user is `Ok(None)`.
    fn get_user(&self, id: UserId) -> StorageFuture<'_, Option<User>>;

    /// Look up a user by exact username.
    ///
    /// # Errors
    ///
    /// Backend failure only.
    fn find_user_by_username<'a>(&'a self, username: &'a str) -> StorageFuture<'a, Option<User>>;

    /// Store a new user and return it with its id.
    ///
    /// Does not check username uniqueness.
    ///
    /// # Errors
    ///
    /// Backend failure only.
    fn insert_user(&self, user: NewUser) -> StorageFuture<'_, User>;

    /// Remove a user. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Backend failure only.
    fn delete_user(&self, id: UserId) -> StorageFuture<'_, bool>;

    // ----- events -----

    /// Look up an event by id.
    ///
    /// # Errors
    ///
    /// Backend failure only; a missing event is `Ok(None)`.
    fn get_event(&self, id: EventId) -> StorageFuture<'_, Option<Event>>;

    /// All events in insertion order.
    ///
    /// # Errors
    ///
    /// Backend failure only.
    fn events(&self) -> StorageFuture<'_, Vec<Event>>;

    /// Store a new event, stamping its id and creation time.
    ///
    /// # Errors
    ///
    /// Backend failure only.
    fn insert_event(&self, event: NewEvent) -> StorageFuture<'_, Event>;

    /// Shallow-merge `patch` into an event. `Ok(None)` if the id is absent.
    ///
    /// # Errors
    ///
    /// Backend failure only.
    fn update_event(&self, id: EventId, patch: EventPatch) -> StorageFuture<'_, Option<Event>>;

    /// Remove an event. Returns whether it existed.
    ///
    /// Registrations referencing the event are left in place.
    ///
    /// # Errors
    ///
    /// Backend failure only.
    fn delete_event(&self, id: EventId) -> StorageFuture<'_, bool>;

    // ----- registrations -----

    /// Look up a registration by id.
    ///
    /// # Errors
    ///
    /// Backend failure only.
    fn get_registration(&self, id: RegistrationId) -> StorageFuture<'_, Option<Registration>>;

    /// Find the registration for a `(user, event)` pair.
    ///
    /// # Errors
    ///
    /// Backend failure only.
    fn find_registration(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> StorageFuture<'_, Option<Registration>>;

    /// All registrations for an event, in insertion order.
    ///
    /// # Errors
    ///
    /// Backend failure only.
    fn registrations_for_event(&self, event_id: EventId) -> StorageFuture<'_, Vec<Registration>>;

    /// All registrations held by a user, in insertion order.
    ///
    /// # Errors
    ///
    /// Backend failure only.
    fn registrations_for_user(&self, user_id: UserId) -> StorageFuture<'_, Vec<Registration>>;

    /// Number of registrations referencing an event (0 if none or unknown).
    ///
    /// # Errors
    ///
    /// Backend failure only.
    fn count_registrations(&self, event_id: EventId) -> StorageFuture<'_, usize>;

    /// Store a new registration, stamping its id and creation time.
    ///
    /// # Errors
    ///
    /// Backend failure only.
    fn insert_registration(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> StorageFuture<'_, Registration>;

    /// Remove a registration. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Backend failure only.
    fn delete_registration(&self, id: RegistrationId) -> StorageFuture<'_, bool>;
}
