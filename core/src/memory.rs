//! In-memory storage backend.
//!
//! Each collection is a `BTreeMap` keyed by id next to its own
//! [`IdAllocator`]. Because ids only grow, iterating a map yields entities in
//! insertion order, and deleting an entity simply leaves a gap in the key
//! space.

use crate::environment::{Clock, SystemClock};
use crate::ids::IdAllocator;
use crate::storage::{Storage, StorageFuture};
use crate::types::{
    Event, EventId, EventPatch, NewEvent, NewUser, Registration, RegistrationId, User, UserId,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    events: BTreeMap<EventId, Event>,
    registrations: BTreeMap<RegistrationId, Registration>,
    user_ids: IdAllocator<UserId>,
    event_ids: IdAllocator<EventId>,
    registration_ids: IdAllocator<RegistrationId>,
}

/// Memory-only [`Storage`]. Nothing survives a restart.
///
/// # Example
///
/// ```
/// use campus_events_core::memory::InMemoryStorage;
/// use campus_events_core::storage::Storage;
/// use campus_events_core::types::NewUser;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let storage = InMemoryStorage::default();
/// let user = storage
///     .insert_user(NewUser {
///         username: "ada".to_string(),
///         password: "secret".to_string(),
///         email: "ada@university.edu".to_string(),
///     })
///     .await?;
/// assert_eq!(user.id.get(), 1);
/// # Ok(())
/// # }
/// ```
pub struct InMemoryStorage {
    clock: Arc<dyn Clock>,
    tables: RwLock<Tables>,
}

impl InMemoryStorage {
    /// Create an empty store that stamps creation times from `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            tables: RwLock::new(Tables::default()),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl std::fmt::Debug for InMemoryStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStorage").finish_non_exhaustive()
    }
}

impl Storage for InMemoryStorage {
    fn get_user(&self, id: UserId) -> StorageFuture<'_, Option<User>> {
        Box::pin(async move {
            let tables = self.tables.read().await;
            Ok(tables.users.get(&id).cloned())
        })
    }

    fn find_user_by_username<'a>(&'a self, username: &'a str) -> StorageFuture<'a, Option<User>> {
        Box::pin(async move {
            let tables = self.tables.read().await;
            Ok(tables
                .users
                .values()
                .find(|user| user.username == username)
                .cloned())
        })
    }

    fn insert_user(&self, user: NewUser) -> StorageFuture<'_, User> {
        Box::pin(async move {
            let mut tables = self.tables.write().await;
            let id = tables.user_ids.allocate();
            let user = User {
                id,
                username: user.username,
                password: user.password,
                email: user.email,
            };
            tables.users.insert(id, user.clone());
            Ok(user)
        })
    }

    fn delete_user(&self, id: UserId) -> StorageFuture<'_, bool> {
        Box::pin(async move {
            let mut tables = self.tables.write().await;
            Ok(tables.users.remove(&id).is_some())
        })
    }

    fn get_event(&self, id: EventId) -> StorageFuture<'_, Option<Event>> {
        Box::pin(async move {
            let tables = self.tables.read().await;
            Ok(tables.events.get(&id).cloned())
        })
    }

    fn events(&self) -> StorageFuture<'_, Vec<Event>> {
        Box::pin(async move {
            let tables = self.tables.read().await;
            Ok(tables.events.values().cloned().collect())
        })
    }

    fn insert_event(&self, event: NewEvent) -> StorageFuture<'_, Event> {
        Box::pin(async move {
            let created_at = self.clock.now();
            let mut tables = self.tables.write().await;
            let id = tables.event_ids.allocate();
            let event = event.into_event(id, created_at);
            tables.events.insert(id, event.clone());
            Ok(event)
        })
    }

    fn update_event(&self, id: EventId, patch: EventPatch) -> StorageFuture<'_, Option<Event>> {
        Box::pin(async move {
            let mut tables = self.tables.write().await;
            Ok(tables.events.get_mut(&id).map(|event| {
                patch.apply(event);
                event.clone()
            }))
        })
    }

    fn delete_event(&self, id: EventId) -> StorageFuture<'_, bool> {
        Box::pin(async move {
            let mut tables = self.tables.write().await;
            Ok(tables.events.remove(&id).is_some())
        })
    }

    fn get_registration(&self, id: RegistrationId) -> StorageFuture<'_, Option<Registration>> {
        Box::pin(async move {
            let tables = self.tables.read().await;
            Ok(tables.registrations.get(&id).cloned())
        })
    }

    fn find_registration(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> StorageFuture<'_, Option<Registration>> {
        Box::pin(async move {
            let tables = self.tables.read().await;
            Ok(tables
                .registrations
                .values()
                .find(|r| r.user_id == user_id && r.event_id == event_id)
                .cloned())
        })
    }

    fn registrations_for_event(&self, event_id: EventId) -> StorageFuture<'_, Vec<Registration>> {
        Box::pin(async move {
            let tables = self.tables.read().await;
            Ok(tables
                .registrations
                .values()
                .filter(|r| r.event_id == event_id)
                .cloned()
                .collect())
        })
    }

    fn registrations_for_user(&self, user_id: UserId) -> StorageFuture<'_, Vec<Registration>> {
        Box::pin(async move {
            let tables = self.tables.read().await;
            Ok(tables
                .registrations
                .values()
                .filter(|r| r.user_id == user_id)
                .cloned()
                .collect())
        })
    }

    fn count_registrations(&self, event_id: EventId) -> StorageFuture<'_, usize> {
        Box::pin(async move {
            let tables = self.tables.read().await;
            Ok(tables
                .registrations
                .values()
                .filter(|r| r.event_id == event_id)
                .count())
        })
    }

    fn insert_registration(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> StorageFuture<'_, Registration> {
        Box::pin(async move {
            let created_at = self.clock.now();
            let mut tables = self.tables.write().await;
            let id = tables.registration_ids.allocate();
            let registration = Registration {
                id,
                user_id,
                event_id,
                created_at,
            };
            tables.registrations.insert(id, registration.clone());
            Ok(registration)
        })
    }

    fn delete_registration(&self, id: RegistrationId) -> StorageFuture<'_, bool> {
        Box::pin(async move {
            let mut tables = self.tables.write().await;
            Ok(tables.registrations.remove(&id).is_some())
        })
    }
}
