//! Input models and their validation.
//!
//! Requests arrive as loosely typed input (strings for dates, times and
//! categories, a signed integer for capacity) so that every malformed field
//! surfaces as [`CatalogError::Validation`] naming the field, rather than as
//! an opaque deserialization failure.

use crate::error::CatalogError;
use crate::types::{Capacity, Category, EventPatch, NewEvent, NewUser, UserId};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

/// Wire format of event dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format of event times.
pub const TIME_FORMAT: &str = "%H:%M";

/// Raw event creation payload.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`
    pub end_time: String,
    /// Venue
    pub location: String,
    /// Positive integer
    pub capacity: i64,
    /// One of the category names
    pub category: String,
    /// Optional banner image
    #[serde(default)]
    pub image_url: Option<String>,
    /// Organizer user id
    pub organizer_id: UserId,
}

/// Raw partial event update. Absent fields are left unchanged.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventPatchInput {
    /// Title
    pub title: Option<String>,
    /// Description
    pub description: Option<String>,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    /// `HH:MM`
    pub start_time: Option<String>,
    /// `HH:MM`
    pub end_time: Option<String>,
    /// Venue
    pub location: Option<String>,
    /// Positive integer
    pub capacity: Option<i64>,
    /// One of the category names
    pub category: Option<String>,
    /// Banner image; an empty string clears it
    pub image_url: Option<String>,
    /// Organizer user id
    pub organizer_id: Option<UserId>,
}

/// Raw sign-up payload.
#[derive(Clone, Debug, Deserialize)]
pub struct SignUpInput {
    /// Desired login name
    pub username: String,
    /// Plaintext password
    pub password: String,
    /// Contact email
    pub email: String,
}

/// Login payload. Missing fields deserialize as empty strings and are
/// rejected by [`Credentials::validate`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Login name
    pub username: String,
    /// Plaintext password
    pub password: String,
}

impl Credentials {
    /// Both fields must be present.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] when either field is empty.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(CatalogError::validation(
                "credentials",
                "Username and password are required",
            ));
        }
        Ok(())
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns [`CatalogError::Validation`] for anything that is not exactly
/// four digits, dash, two digits, dash, two digits, or is not a real date.
pub fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, CatalogError> {
    if !has_shape(raw, "dddd-dd-dd") {
        return Err(CatalogError::validation(
            field,
            "Date must be in YYYY-MM-DD format",
        ));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| CatalogError::validation(field, format!("'{raw}' is not a calendar date")))
}

/// Parse an `HH:MM` 24-hour time.
///
/// # Errors
///
/// Returns [`CatalogError::Validation`] for anything that is not exactly two
/// digits, colon, two digits, or is out of range.
pub fn parse_time(field: &'static str, raw: &str) -> Result<NaiveTime, CatalogError> {
    if !has_shape(raw, "dd:dd") {
        return Err(CatalogError::validation(
            field,
            "Time must be in HH:MM format",
        ));
    }
    NaiveTime::parse_from_str(raw, TIME_FORMAT)
        .map_err(|_| CatalogError::validation(field, format!("'{raw}' is not a 24-hour time")))
}

/// Parse a positive capacity.
///
/// # Errors
///
/// Returns [`CatalogError::Validation`] unless `1 <= raw <= u32::MAX`.
pub fn parse_capacity(raw: i64) -> Result<Capacity, CatalogError> {
    u32::try_from(raw)
        .ok()
        .and_then(Capacity::new)
        .ok_or_else(|| CatalogError::validation("capacity", "Capacity must be a positive number"))
}

/// Parse a category name.
///
/// # Errors
///
/// Returns [`CatalogError::Validation`] for unknown or wrongly cased names.
pub fn parse_category(raw: &str) -> Result<Category, CatalogError> {
    raw.parse().map_err(|_| {
        let expected: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        CatalogError::validation(
            "category",
            format!("'{raw}' is not one of {}", expected.join(", ")),
        )
    })
}

fn parse_image_url(raw: Option<String>) -> Option<String> {
    raw.filter(|url| !url.is_empty())
}

fn is_plausible_email(raw: &str) -> bool {
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !raw.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, rest)| !host.is_empty() && !rest.is_empty() && !rest.ends_with('.'))
}

/// `d` matches an ASCII digit, anything else matches itself.
fn has_shape(raw: &str, shape: &str) -> bool {
    raw.len() == shape.len()
        && raw
            .bytes()
            .zip(shape.bytes())
            .all(|(c, s)| if s == b'd' { c.is_ascii_digit() } else { c == s })
}

impl TryFrom<EventInput> for NewEvent {
    type Error = CatalogError;

    fn try_from(input: EventInput) -> Result<Self, Self::Error> {
        Ok(Self {
            date: parse_date("date", &input.date)?,
            start_time: parse_time("startTime", &input.start_time)?,
            end_time: parse_time("endTime", &input.end_time)?,
            capacity: parse_capacity(input.capacity)?,
            category: parse_category(&input.category)?,
            image_url: parse_image_url(input.image_url),
            title: input.title,
            description: input.description,
            location: input.location,
            organizer_id: input.organizer_id,
        })
    }
}

impl TryFrom<EventPatchInput> for EventPatch {
    type Error = CatalogError;

    fn try_from(input: EventPatchInput) -> Result<Self, Self::Error> {
        Ok(Self {
            date: input.date.map(|d| parse_date("date", &d)).transpose()?,
            start_time: input
                .start_time
                .map(|t| parse_time("startTime", &t))
                .transpose()?,
            end_time: input
                .end_time
                .map(|t| parse_time("endTime", &t))
                .transpose()?,
            capacity: input.capacity.map(parse_capacity).transpose()?,
            category: input
                .category
                .map(|c| parse_category(&c))
                .transpose()?,
            image_url: input.image_url.map(|url| parse_image_url(Some(url))),
            title: input.title,
            description: input.description,
            location: input.location,
            organizer_id: input.organizer_id,
        })
    }
}

impl TryFrom<SignUpInput> for NewUser {
    type Error = CatalogError;

    fn try_from(input: SignUpInput) -> Result<Self, Self::Error> {
        if input.username.trim().is_empty() {
            return Err(CatalogError::validation("username", "Username is required"));
        }
        if input.password.is_empty() {
            return Err(CatalogError::validation("password", "Password is required"));
        }
        if !is_plausible_email(&input.email) {
            return Err(CatalogError::validation("email", "Please enter a valid email"));
        }
        Ok(Self {
            username: input.username,
            password: input.password,
            email: input.email,
        })
    }
}
