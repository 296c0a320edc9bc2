//! Event management: validated create, update, delete and lookup.

use crate::error::{CatalogError, EntityKind, Result};
use crate::metrics::{EVENTS_CREATED, EVENTS_DELETED};
use crate::registration::WriteGate;
use crate::storage::Storage;
use crate::types::{Event, EventId, EventPatch, NewEvent};
use crate::validation::{EventInput, EventPatchInput};
use std::sync::Arc;

/// Organizer-facing event operations.
///
/// The organizer id on an event is stored as given; it is not checked
/// against the user table. Updates and deletes wait on the same
/// [`WriteGate`] as the registration engine.
#[derive(Clone)]
pub struct EventCatalog {
    storage: Arc<dyn Storage>,
    gate: WriteGate,
}

impl EventCatalog {
    /// Create a catalog over `storage` that edits events under `gate`.
    #[must_use]
    pub const fn new(storage: Arc<dyn Storage>, gate: WriteGate) -> Self {
        Self { storage, gate }
    }

    /// Validate and store a new event.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Validation`] naming the first bad field
    /// - [`CatalogError::Storage`] if the backend fails
    pub async fn create_event(&self, input: EventInput) -> Result<Event> {
        let event = NewEvent::try_from(input)?;
        let event = self.storage.insert_event(event).await?;

        metrics::counter!(EVENTS_CREATED).increment(1);
        tracing::info!(event_id = %event.id, title = %event.title, "Event created");
        Ok(event)
    }

    /// Validate the present fields of `input` and merge them into the event.
    ///
    /// Validation happens before the lookup, so a bad payload for a missing
    /// event reports the validation error. Lowering the capacity below the
    /// current registration count is accepted.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Validation`] naming the first bad field
    /// - [`CatalogError::NotFound`] if the event does not exist
    /// - [`CatalogError::Storage`] if the backend fails
    pub async fn update_event(&self, id: EventId, input: EventPatchInput) -> Result<Event> {
        let patch = EventPatch::try_from(input)?;
        let _guard = self.gate.lock().await;
        let event = self
            .storage
            .update_event(id, patch)
            .await?
            .ok_or(CatalogError::NotFound(EntityKind::Event))?;

        tracing::info!(event_id = %id, "Event updated");
        Ok(event)
    }

    /// Delete an event. Its registrations are left behind.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] if the event does not exist
    /// - [`CatalogError::Storage`] if the backend fails
    pub async fn delete_event(&self, id: EventId) -> Result<()> {
        let _guard = self.gate.lock().await;
        if !self.storage.delete_event(id).await? {
            return Err(CatalogError::NotFound(EntityKind::Event));
        }

        metrics::counter!(EVENTS_DELETED).increment(1);
        tracing::info!(event_id = %id, "Event deleted");
        Ok(())
    }

    /// Look up an event.
    ///
    /// # Errors
    ///
    /// Backend failure only.
    pub async fn get_event(&self, id: EventId) -> Result<Option<Event>> {
        Ok(self.storage.get_event(id).await?)
    }
}

impl std::fmt::Debug for EventCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventCatalog").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStorage;
    use crate::types::UserId;

    fn input() -> EventInput {
        EventInput {
            title: "Annual Tech Symposium".to_string(),
            description: "Keynotes and panels".to_string(),
            date: "2023-11-15".to_string(),
            start_time: "09:00".to_string(),
            end_time: "17:00".to_string(),
            location: "Main Auditorium".to_string(),
            capacity: 200,
            category: "academic".to_string(),
            image_url: None,
            organizer_id: UserId::new(1),
        }
    }

    fn catalog() -> (Arc<InMemoryStorage>, EventCatalog) {
        let storage = Arc::new(InMemoryStorage::default());
        (storage.clone(), EventCatalog::new(storage, WriteGate::default()))
    }

    #[tokio::test]
    async fn create_then_get() {
        let (_, catalog) = catalog();
        let event = catalog.create_event(input()).await.unwrap();
        assert_eq!(catalog.get_event(event.id).await.unwrap(), Some(event));
    }

    #[tokio::test]
    async fn invalid_input_stores_nothing() {
        let (storage, catalog) = catalog();
        let error = catalog
            .create_event(EventInput {
                capacity: 0,
                ..input()
            })
            .await
            .unwrap_err();

        assert!(matches!(error, CatalogError::Validation { field: "capacity", .. }));
        assert!(storage.events().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_validates_before_lookup() {
        let (_, catalog) = catalog();
        let bad = EventPatchInput {
            date: Some("tomorrow".to_string()),
            ..EventPatchInput::default()
        };
        assert!(matches!(
            catalog.update_event(EventId::new(9), bad).await,
            Err(CatalogError::Validation { field: "date", .. })
        ));

        assert_eq!(
            catalog
                .update_event(EventId::new(9), EventPatchInput::default())
                .await
                .unwrap_err(),
            CatalogError::NotFound(EntityKind::Event)
        );
    }

    #[tokio::test]
    async fn update_merges_present_fields() {
        let (_, catalog) = catalog();
        let event = catalog.create_event(input()).await.unwrap();

        let updated = catalog
            .update_event(
                event.id,
                EventPatchInput {
                    location: Some("Science Building".to_string()),
                    capacity: Some(50),
                    ..EventPatchInput::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.location, "Science Building");
        assert_eq!(updated.capacity.get(), 50);
        assert_eq!(updated.title, event.title);
        assert_eq!(updated.created_at, event.created_at);
    }

    #[tokio::test]
    async fn delete_is_not_found_the_second_time() {
        let (_, catalog) = catalog();
        let event = catalog.create_event(input()).await.unwrap();

        catalog.delete_event(event.id).await.unwrap();
        assert_eq!(
            catalog.delete_event(event.id).await.unwrap_err(),
            CatalogError::NotFound(EntityKind::Event)
        );
    }

    #[tokio::test]
    async fn delete_leaves_registrations_behind() {
        let (storage, catalog) = catalog();
        let event = catalog.create_event(input()).await.unwrap();
        storage
            .insert_registration(UserId::new(1), event.id)
            .await
            .unwrap();

        catalog.delete_event(event.id).await.unwrap();
        assert_eq!(storage.count_registrations(event.id).await.unwrap(), 1);
    }
}
