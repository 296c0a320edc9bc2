//! Metric names emitted by the engine.
//!
//! Counters are recorded through the `metrics` facade; whether they go
//! anywhere depends on the recorder the process installs. Call
//! [`describe_metrics`] once after installing one.

use metrics::{Unit, describe_counter};

/// Registration attempts, labelled by `outcome`.
pub const REGISTRATIONS: &str = "campus_events.registrations";

/// Cancellation attempts, labelled by `outcome`.
pub const CANCELLATIONS: &str = "campus_events.cancellations";

/// Events created through the catalog.
pub const EVENTS_CREATED: &str = "campus_events.events_created";

/// Events deleted through the catalog.
pub const EVENTS_DELETED: &str = "campus_events.events_deleted";

/// Accounts created through sign-up.
pub const USERS_CREATED: &str = "campus_events.users_created";

/// Login attempts, labelled by `outcome`.
pub const LOGINS: &str = "campus_events.logins";

/// Register descriptions for every engine metric.
pub fn describe_metrics() {
    describe_counter!(REGISTRATIONS, Unit::Count, "Registration attempts by outcome");
    describe_counter!(CANCELLATIONS, Unit::Count, "Cancellation attempts by outcome");
    describe_counter!(EVENTS_CREATED, Unit::Count, "Events created");
    describe_counter!(EVENTS_DELETED, Unit::Count, "Events deleted");
    describe_counter!(USERS_CREATED, Unit::Count, "User accounts created");
    describe_counter!(LOGINS, Unit::Count, "Login attempts by outcome");
}
