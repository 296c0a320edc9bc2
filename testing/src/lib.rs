//! # Campus Events Testing
//!
//! Test utilities for the campus events catalog.
//!
//! This crate provides:
//! - A fixed clock and a store that always fails
//! - Builders for users and events
//! - proptest strategies for event fields
//!
//! ## Example
//!
//! ```
//! use campus_events_testing::{fixtures, memory_storage};
//! use campus_events_core::CampusEvents;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), campus_events_core::CatalogError> {
//! let app = CampusEvents::new(memory_storage());
//! let event = app
//!     .catalog()
//!     .create_event(fixtures::event("Chess Night").capacity(1).input())
//!     .await?;
//! assert_eq!(event.capacity.get(), 1);
//! # Ok(())
//! # }
//! ```

use campus_events_core::InMemoryStorage;
use std::sync::Arc;

/// Mock implementations of environment traits.
pub mod mocks {
    use campus_events_core::environment::Clock;
    use campus_events_core::storage::{Storage, StorageFuture};
    use campus_events_core::types::{
        Event, EventId, EventPatch, NewEvent, NewUser, Registration, RegistrationId, User, UserId,
    };
    use campus_events_core::StorageError;
    use chrono::{DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use campus_events_testing::mocks::FixedClock;
    /// use campus_events_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2023-11-01 08:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2023-11-01T08:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// A store whose every operation fails with [`StorageError::Unavailable`].
    ///
    /// Used to check that backend failures surface as errors instead of
    /// being mistaken for missing data.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct UnavailableStorage;

    fn unavailable<'a, T: Send + 'a>() -> StorageFuture<'a, T> {
        Box::pin(async { Err(StorageError::Unavailable("store offline".to_string())) })
    }

    impl Storage for UnavailableStorage {
        fn get_user(&self, _id: UserId) -> StorageFuture<'_, Option<User>> {
            unavailable()
        }

        fn find_user_by_username<'a>(&'a self, _username: &'a str) -> StorageFuture<'a, Option<User>> {
            unavailable()
        }

        fn insert_user(&self, _user: NewUser) -> StorageFuture<'_, User> {
            unavailable()
        }

        fn delete_user(&self, _id: UserId) -> StorageFuture<'_, bool> {
            unavailable()
        }

        fn get_event(&self, _id: EventId) -> StorageFuture<'_, Option<Event>> {
            unavailable()
        }

        fn events(&self) -> StorageFuture<'_, Vec<Event>> {
            unavailable()
        }

        fn insert_event(&self, _event: NewEvent) -> StorageFuture<'_, Event> {
            unavailable()
        }

        fn update_event(&self, _id: EventId, _patch: EventPatch) -> StorageFuture<'_, Option<Event>> {
            unavailable()
        }

        fn delete_event(&self, _id: EventId) -> StorageFuture<'_, bool> {
            unavailable()
        }

        fn get_registration(&self, _id: RegistrationId) -> StorageFuture<'_, Option<Registration>> {
            unavailable()
        }

        fn find_registration(
            &self,
            _user_id: UserId,
            _event_id: EventId,
        ) -> StorageFuture<'_, Option<Registration>> {
            unavailable()
        }

        fn registrations_for_event(&self, _event_id: EventId) -> StorageFuture<'_, Vec<Registration>> {
            unavailable()
        }

        fn registrations_for_user(&self, _user_id: UserId) -> StorageFuture<'_, Vec<Registration>> {
            unavailable()
        }

        fn count_registrations(&self, _event_id: EventId) -> StorageFuture<'_, usize> {
            unavailable()
        }

        fn insert_registration(
            &self,
            _user_id: UserId,
            _event_id: EventId,
        ) -> StorageFuture<'_, Registration> {
            unavailable()
        }

        fn delete_registration(&self, _id: RegistrationId) -> StorageFuture<'_, bool> {
            unavailable()
        }
    }
}

/// Builders for test data.
pub mod fixtures {
    use campus_events_core::types::{NewEvent, NewUser, UserId};
    use campus_events_core::validation::{EventInput, EventPatchInput, SignUpInput};
    use campus_events_core::CatalogError;

    /// A user named `username` with a matching university email.
    #[must_use]
    pub fn user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password: "password123".to_string(),
            email: format!("{username}@university.edu"),
        }
    }

    /// Sign-up payload for `username`.
    #[must_use]
    pub fn sign_up(username: &str) -> SignUpInput {
        let user = user(username);
        SignUpInput {
            username: user.username,
            password: user.password,
            email: user.email,
        }
    }

    /// Start building an event titled `title`.
    ///
    /// Defaults: 2023-11-15 09:00-17:00 in the Main Auditorium, capacity 10,
    /// category `academic`, organized by user 1.
    #[must_use]
    pub fn event(title: &str) -> EventBuilder {
        EventBuilder {
            input: EventInput {
                title: title.to_string(),
                description: format!("{title} on campus"),
                date: "2023-11-15".to_string(),
                start_time: "09:00".to_string(),
                end_time: "17:00".to_string(),
                location: "Main Auditorium".to_string(),
                capacity: 10,
                category: "academic".to_string(),
                image_url: None,
                organizer_id: UserId::new(1),
            },
        }
    }

    /// Fluent builder over [`EventInput`].
    #[derive(Clone, Debug)]
    pub struct EventBuilder {
        input: EventInput,
    }

    impl EventBuilder {
        /// Set the description.
        #[must_use]
        pub fn description(mut self, description: &str) -> Self {
            self.input.description = description.to_string();
            self
        }

        /// Set the date (`YYYY-MM-DD`).
        #[must_use]
        pub fn date(mut self, date: &str) -> Self {
            self.input.date = date.to_string();
            self
        }

        /// Set the start time (`HH:MM`).
        #[must_use]
        pub fn starts(mut self, start_time: &str) -> Self {
            self.input.start_time = start_time.to_string();
            self
        }

        /// Set the venue.
        #[must_use]
        pub fn location(mut self, location: &str) -> Self {
            self.input.location = location.to_string();
            self
        }

        /// Set the capacity. Non-positive values are kept so invalid
        /// payloads can be built too.
        #[must_use]
        pub const fn capacity(mut self, capacity: i64) -> Self {
            self.input.capacity = capacity;
            self
        }

        /// Set the category name.
        #[must_use]
        pub fn category(mut self, category: &str) -> Self {
            self.input.category = category.to_string();
            self
        }

        /// Set the banner image.
        #[must_use]
        pub fn image_url(mut self, url: &str) -> Self {
            self.input.image_url = Some(url.to_string());
            self
        }

        /// The raw payload.
        #[must_use]
        pub fn input(self) -> EventInput {
            self.input
        }

        /// The validated event.
        ///
        /// # Errors
        ///
        /// Returns the validation error for an invalid payload.
        pub fn build(self) -> Result<NewEvent, CatalogError> {
            NewEvent::try_from(self.input)
        }
    }

    /// A patch changing only the capacity.
    #[must_use]
    pub fn capacity_patch(capacity: i64) -> EventPatchInput {
        EventPatchInput {
            capacity: Some(capacity),
            ..EventPatchInput::default()
        }
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use campus_events_core::types::{Capacity, Category, NewEvent, UserId};
    use chrono::{NaiveDate, NaiveTime};
    use proptest::prelude::*;

    /// Any category.
    pub fn category() -> impl Strategy<Value = Category> {
        proptest::sample::select(Category::ALL.to_vec())
    }

    /// A date in 2023 or 2024.
    pub fn date() -> impl Strategy<Value = NaiveDate> {
        (2023..=2024i32, 1..=366u32)
            .prop_filter_map("day of year", |(year, ordinal)| {
                NaiveDate::from_yo_opt(year, ordinal)
            })
    }

    /// A whole-minute time of day.
    pub fn time() -> impl Strategy<Value = NaiveTime> {
        (0..24u32, 0..60u32).prop_filter_map("time of day", |(hour, minute)| {
            NaiveTime::from_hms_opt(hour, minute, 0)
        })
    }

    /// A positive capacity up to `max`.
    pub fn capacity(max: u32) -> impl Strategy<Value = Capacity> {
        (1..=max.max(1)).prop_filter_map("positive", Capacity::new)
    }

    /// A valid event with a short generated title.
    pub fn new_event() -> impl Strategy<Value = NewEvent> {
        ("[a-z]{3,12}", date(), time(), capacity(50), category()).prop_map(
            |(title, date, start_time, capacity, category)| NewEvent {
                description: format!("{title} description"),
                title,
                date,
                start_time,
                end_time: start_time,
                location: "Campus".to_string(),
                capacity,
                category,
                image_url: None,
                organizer_id: UserId::new(1),
            },
        )
    }
}

/// An empty in-memory store on [`test_clock`].
#[must_use]
pub fn memory_storage() -> Arc<InMemoryStorage> {
    Arc::new(InMemoryStorage::new(Arc::new(test_clock())))
}

/// An in-memory store on [`test_clock`] loaded with the sample data.
///
/// # Errors
///
/// Propagates a seeding failure.
pub async fn seeded_storage() -> campus_events_core::Result<Arc<InMemoryStorage>> {
    let storage = memory_storage();
    campus_events_core::seed::seed_sample_data(storage.as_ref()).await?;
    Ok(storage)
}

// Re-export commonly used items
pub use mocks::{FixedClock, UnavailableStorage, test_clock};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use campus_events_core::environment::Clock;
    use campus_events_core::storage::Storage;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn default_event_fixture_is_valid() {
        let event = fixtures::event("Chess Night").build().unwrap();
        assert_eq!(event.capacity.get(), 10);
    }

    #[tokio::test]
    async fn memory_storage_stamps_test_clock() {
        let storage = memory_storage();
        let event = storage
            .insert_event(fixtures::event("Chess Night").build().unwrap())
            .await
            .unwrap();
        assert_eq!(event.created_at, test_clock().now());
    }

    #[tokio::test]
    async fn unavailable_storage_fails() {
        assert!(UnavailableStorage.events().await.is_err());
    }
}
