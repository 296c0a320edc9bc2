//! Read-side queries over the store.
//!
//! None of these fail for missing data: an unknown event counts zero
//! registrations, an unknown user has no events.

use crate::error::Result;
use crate::storage::Storage;
use crate::types::{Category, Event, EventDetails, EventId, Registration, UserId};
use std::collections::HashSet;
use std::sync::Arc;

/// Derived read operations.
#[derive(Clone)]
pub struct EventQueries {
    storage: Arc<dyn Storage>,
}

impl EventQueries {
    /// Create a query layer over `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// All events, earliest `(date, start time)` first. Events that start
    /// at the same moment keep their insertion order.
    ///
    /// # Errors
    ///
    /// Backend failure only.
    pub async fn list_events(&self) -> Result<Vec<Event>> {
        let mut events = self.storage.events().await?;
        sort_chronologically(&mut events);
        Ok(events)
    }

    /// Events of one category, sorted like [`list_events`](Self::list_events).
    ///
    /// # Errors
    ///
    /// Backend failure only.
    pub async fn list_events_by_category(&self, category: Category) -> Result<Vec<Event>> {
        let mut events = self.storage.events().await?;
        events.retain(|event| event.category == category);
        sort_chronologically(&mut events);
        Ok(events)
    }

    /// Events whose title, description, location or category contains
    /// `query`, ignoring case. Insertion order.
    ///
    /// # Errors
    ///
    /// Backend failure only.
    pub async fn search_events(&self, query: &str) -> Result<Vec<Event>> {
        let needle = query.to_lowercase();
        let mut events = self.storage.events().await?;
        events.retain(|event| event.matches(&needle));
        Ok(events)
    }

    /// Number of registrations for an event; 0 if it has none or does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Backend failure only.
    pub async fn registration_count(&self, event_id: EventId) -> Result<usize> {
        Ok(self.storage.count_registrations(event_id).await?)
    }

    /// Events the user is registered for, in store order.
    ///
    /// Registrations whose event has been deleted are skipped.
    ///
    /// # Errors
    ///
    /// Backend failure only.
    pub async fn user_events(&self, user_id: UserId) -> Result<Vec<Event>> {
        let registered: HashSet<EventId> = self
            .storage
            .registrations_for_user(user_id)
            .await?
            .into_iter()
            .map(|registration| registration.event_id)
            .collect();
        if registered.is_empty() {
            return Ok(Vec::new());
        }

        let mut events = self.storage.events().await?;
        events.retain(|event| registered.contains(&event.id));
        Ok(events)
    }

    /// The user's registrations, in creation order.
    ///
    /// # Errors
    ///
    /// Backend failure only.
    pub async fn user_registrations(&self, user_id: UserId) -> Result<Vec<Registration>> {
        Ok(self.storage.registrations_for_user(user_id).await?)
    }

    /// An event with its current registration count, if it exists.
    ///
    /// # Errors
    ///
    /// Backend failure only.
    pub async fn event_details(&self, event_id: EventId) -> Result<Option<EventDetails>> {
        let Some(event) = self.storage.get_event(event_id).await? else {
            return Ok(None);
        };
        let registration_count = self.storage.count_registrations(event_id).await?;
        Ok(Some(EventDetails {
            event,
            registration_count,
        }))
    }
}

impl std::fmt::Debug for EventQueries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventQueries").finish_non_exhaustive()
    }
}

/// Stable sort by start moment.
fn sort_chronologically(events: &mut [Event]) {
    events.sort_by_key(Event::starts_at);
}
