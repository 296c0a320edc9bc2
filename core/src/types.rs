//! Domain types for the campus events catalog.
//!
//! Identifiers, the three stored entities (users, events, registrations) and
//! the validated write models the store accepts. Field names serialize in
//! camelCase and dates/times keep their `YYYY-MM-DD` / `HH:MM` wire form.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Identifiers
// ============================================================================

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw numeric id
            #[must_use]
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Get the raw numeric id
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a user account
    UserId
);

entity_id!(
    /// Identifier of a catalog event
    EventId
);

entity_id!(
    /// Identifier of a registration row
    RegistrationId
);

// ============================================================================
// Value Objects
// ============================================================================

/// Error returned when a string is not one of the known categories.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category '{0}'")]
pub struct ParseCategoryError(String);

/// Event category.
///
/// Serialized as the lowercase name; matching is case-sensitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Lectures, symposia, research showcases
    Academic,
    /// Festivals and get-togethers
    Social,
    /// Career fairs and recruiting
    Career,
    /// Tournaments and intramurals
    Sports,
    /// Hands-on sessions
    Workshop,
    /// Multi-talk conferences
    Conference,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Self; 6] = [
        Self::Academic,
        Self::Social,
        Self::Career,
        Self::Sports,
        Self::Workshop,
        Self::Conference,
    ];

    /// Wire name of the category
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Academic => "academic",
            Self::Social => "social",
            Self::Career => "career",
            Self::Sports => "sports",
            Self::Workshop => "workshop",
            Self::Conference => "conference",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// Maximum number of simultaneous registrations an event accepts.
///
/// Always strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Capacity(u32);

impl Capacity {
    /// Create a capacity, rejecting zero.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        if value == 0 { None } else { Some(Self(value)) }
    }

    /// Get the capacity value
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Whether `registered` seats leave no room for another registration.
    #[must_use]
    pub fn is_full(self, registered: usize) -> bool {
        registered >= self.0 as usize
    }
}

impl TryFrom<u32> for Capacity {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| "capacity must be a positive number".to_string())
    }
}

impl From<Capacity> for u32 {
    fn from(capacity: Capacity) -> Self {
        capacity.0
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Serde adapter for `YYYY-MM-DD` dates.
pub(crate) mod date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(crate::validation::DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        crate::validation::parse_date("date", &raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `HH:MM` times.
pub(crate) mod time_format {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(crate::validation::TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        crate::validation::parse_time("time", &raw).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Users
// ============================================================================

/// A user account as stored.
///
/// The password is kept in plaintext; use [`PublicUser`] for anything that
/// leaves the service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    /// User ID
    pub id: UserId,
    /// Unique login name
    pub username: String,
    /// Plaintext password
    pub password: String,
    /// Contact email
    pub email: String,
}

impl User {
    /// Public view of the account (no password).
    #[must_use]
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

/// A user as returned by sign-up and login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    /// User ID
    pub id: UserId,
    /// Login name
    pub username: String,
    /// Contact email
    pub email: String,
}

/// Validated data for a new user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUser {
    /// Login name
    pub username: String,
    /// Plaintext password
    pub password: String,
    /// Contact email
    pub email: String,
}

// ============================================================================
// Events
// ============================================================================

/// A catalog event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Event ID
    pub id: EventId,
    /// Title
    pub title: String,
    /// Free-text description
    pub description: String,
    /// Day of the event
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    /// Start time (24-hour clock)
    #[serde(with = "time_format")]
    pub start_time: NaiveTime,
    /// End time (24-hour clock)
    #[serde(with = "time_format")]
    pub end_time: NaiveTime,
    /// Venue
    pub location: String,
    /// Registration limit
    pub capacity: Capacity,
    /// Category
    pub category: Category,
    /// Optional banner image
    pub image_url: Option<String>,
    /// User who organizes the event
    pub organizer_id: UserId,
    /// When the event was created
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Combined chronological key used for listings.
    #[must_use]
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    /// Case-insensitive substring match over title, description, location
    /// and category. `needle` must already be lowercase.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        [
            self.title.as_str(),
            self.description.as_str(),
            self.location.as_str(),
            self.category.as_str(),
        ]
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Validated data for a new event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEvent {
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Day of the event
    pub date: NaiveDate,
    /// Start time
    pub start_time: NaiveTime,
    /// End time
    pub end_time: NaiveTime,
    /// Venue
    pub location: String,
    /// Registration limit
    pub capacity: Capacity,
    /// Category
    pub category: Category,
    /// Optional banner image
    pub image_url: Option<String>,
    /// Organizer
    pub organizer_id: UserId,
}

impl NewEvent {
    /// Turn the write model into a stored event.
    #[must_use]
    pub fn into_event(self, id: EventId, created_at: DateTime<Utc>) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            location: self.location,
            capacity: self.capacity,
            category: self.category,
            image_url: self.image_url,
            organizer_id: self.organizer_id,
            created_at,
        }
    }
}

/// Validated partial update for an event.
///
/// `None` leaves a field untouched. `image_url: Some(None)` clears the image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventPatch {
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New date
    pub date: Option<NaiveDate>,
    /// New start time
    pub start_time: Option<NaiveTime>,
    /// New end time
    pub end_time: Option<NaiveTime>,
    /// New venue
    pub location: Option<String>,
    /// New capacity (may drop below the current registration count)
    pub capacity: Option<Capacity>,
    /// New category
    pub category: Option<Category>,
    /// New image
    pub image_url: Option<Option<String>>,
    /// New organizer
    pub organizer_id: Option<UserId>,
}

impl EventPatch {
    /// Shallow-merge the present fields into `event`. Id and creation time
    /// are never touched.
    pub fn apply(self, event: &mut Event) {
        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(description) = self.description {
            event.description = description;
        }
        if let Some(date) = self.date {
            event.date = date;
        }
        if let Some(start_time) = self.start_time {
            event.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            event.end_time = end_time;
        }
        if let Some(location) = self.location {
            event.location = location;
        }
        if let Some(capacity) = self.capacity {
            event.capacity = capacity;
        }
        if let Some(category) = self.category {
            event.category = category;
        }
        if let Some(image_url) = self.image_url {
            event.image_url = image_url;
        }
        if let Some(organizer_id) = self.organizer_id {
            event.organizer_id = organizer_id;
        }
    }
}

/// An event together with its current registration count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    /// The event
    #[serde(flatten)]
    pub event: Event,
    /// Registrations currently held for the event
    pub registration_count: usize,
}

// ============================================================================
// Registrations
// ============================================================================

/// A user's registration for an event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Registration ID
    pub id: RegistrationId,
    /// Registered user
    pub user_id: UserId,
    /// Event registered for
    pub event_id: EventId,
    /// When the registration was created
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_event() -> Event {
        Event {
            id: EventId::new(1),
            title: "Fall Career Fair".to_string(),
            description: "Bring your resume".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 11, 25).unwrap(),
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            location: "Student Union".to_string(),
            capacity: Capacity::new(200).unwrap(),
            category: Category::Career,
            image_url: None,
            organizer_id: UserId::new(1),
            created_at: DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        }
    }

    #[test]
    fn category_parses_only_lowercase_names() {
        assert_eq!("career".parse::<Category>(), Ok(Category::Career));
        assert!("Career".parse::<Category>().is_err());
        assert!("party".parse::<Category>().is_err());
    }

    #[test]
    fn capacity_rejects_zero() {
        assert!(Capacity::new(0).is_none());
        let capacity = Capacity::new(2).unwrap();
        assert!(!capacity.is_full(1));
        assert!(capacity.is_full(2));
        assert!(capacity.is_full(3));
    }

    #[test]
    fn event_serializes_wire_format() {
        let json = serde_json::to_value(sample_event()).unwrap();
        assert_eq!(json["date"], "2023-11-25");
        assert_eq!(json["startTime"], "10:00");
        assert_eq!(json["endTime"], "15:00");
        assert_eq!(json["category"], "career");
        assert_eq!(json["organizerId"], 1);
        assert_eq!(json["capacity"], 200);
        assert!(json["imageUrl"].is_null());
    }

    #[test]
    fn event_details_flatten_event_fields() {
        let details = EventDetails {
            event: sample_event(),
            registration_count: 3,
        };
        let json = serde_json::to_value(details).unwrap();
        assert_eq!(json["title"], "Fall Career Fair");
        assert_eq!(json["registrationCount"], 3);
    }

    #[test]
    fn search_match_covers_category_and_ignores_case() {
        let event = sample_event();
        assert!(event.matches("career"));
        assert!(event.matches("student union"));
        assert!(event.matches("resume"));
        assert!(!event.matches("basketball"));
    }

    #[test]
    fn patch_leaves_identity_untouched() {
        let mut event = sample_event();
        let before = event.clone();
        EventPatch {
            title: Some("Spring Career Fair".to_string()),
            image_url: Some(Some("https://example.com/a.png".to_string())),
            ..EventPatch::default()
        }
        .apply(&mut event);

        assert_eq!(event.title, "Spring Career Fair");
        assert_eq!(event.image_url.as_deref(), Some("https://example.com/a.png"));
        assert_eq!(event.id, before.id);
        assert_eq!(event.created_at, before.created_at);
        assert_eq!(event.capacity, before.capacity);
    }
}
