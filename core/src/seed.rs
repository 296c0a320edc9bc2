//! Sample data for demos and tests.
//!
//! One admin account, six events spread over late 2023, and two
//! registrations for the admin.

use crate::error::Result;
use crate::storage::Storage;
use crate::types::{EventId, NewEvent, NewUser, UserId};
use crate::validation::EventInput;

/// Login name of the seeded account.
pub const ADMIN_USERNAME: &str = "admin";

/// Password of the seeded account.
pub const ADMIN_PASSWORD: &str = "password123";

/// Email of the seeded account.
pub const ADMIN_EMAIL: &str = "admin@university.edu";

fn sample(
    title: &str,
    description: &str,
    (date, start_time, end_time): (&str, &str, &str),
    location: &str,
    capacity: i64,
    category: &str,
    photo: &str,
) -> EventInput {
    EventInput {
        title: title.to_string(),
        description: description.to_string(),
        date: date.to_string(),
        start_time: start_time.to_string(),
        end_time: end_time.to_string(),
        location: location.to_string(),
        capacity,
        category: category.to_string(),
        image_url: Some(format!(
            "https://images.unsplash.com/photo-{photo}?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&h=400&q=80"
        )),
        organizer_id: UserId::new(1),
    }
}

/// The six sample events, in insertion order.
#[must_use]
pub fn sample_events() -> Vec<EventInput> {
    vec![
        sample(
            "Annual Tech Symposium",
            "Join industry leaders and researchers for our annual technology symposium featuring keynotes, panel discussions, and networking.",
            ("2023-11-15", "09:00", "17:00"),
            "Main Auditorium",
            200,
            "academic",
            "1540575467063-178a50c2df87",
        ),
        sample(
            "Campus Spring Festival",
            "Celebrate the season with food, music, games, and performances from student organizations across campus.",
            ("2023-11-20", "11:00", "20:00"),
            "Campus Green",
            500,
            "social",
            "1560523159-4a9692d222f8",
        ),
        sample(
            "Fall Career Fair",
            "Connect with 50+ employers recruiting for internships and full-time positions. Bring your resume and professional attire.",
            ("2023-11-25", "10:00", "15:00"),
            "Student Union",
            200,
            "career",
            "1559223607-a43c990c692c",
        ),
        sample(
            "Research Symposium",
            "Undergraduate and graduate students showcase their research projects across disciplines with faculty judges and prizes.",
            ("2023-11-30", "13:00", "18:00"),
            "Science Building",
            100,
            "academic",
            "1532649538693-f3a2ec1bf8bd",
        ),
        sample(
            "Intramural Basketball",
            "Form a team of 5-7 players or sign up individually to be matched with a team for our winter basketball tournament.",
            ("2023-12-05", "14:00", "20:00"),
            "Sports Complex",
            80,
            "sports",
            "1569683795546-bf1ca0a8696a",
        ),
        sample(
            "Leadership Workshop",
            "Develop essential leadership skills through interactive exercises and insights from successful alumni leaders.",
            ("2023-12-10", "15:30", "17:30"),
            "Business Building, Room 204",
            35,
            "workshop",
            "1515187029135-18ee286d815b",
        ),
    ]
}

/// Load the sample data into an empty store.
///
/// On an empty store the admin gets user id 1, the events ids 1 through 6,
/// and the admin is registered for events 1 and 3.
///
/// # Errors
///
/// Returns [`CatalogError::Validation`](crate::CatalogError::Validation) if a
/// sample event fails validation, or a storage error from the backend.
pub async fn seed_sample_data(storage: &dyn Storage) -> Result<()> {
    let admin = storage
        .insert_user(NewUser {
            username: ADMIN_USERNAME.to_string(),
            password: ADMIN_PASSWORD.to_string(),
            email: ADMIN_EMAIL.to_string(),
        })
        .await?;

    let mut event_ids: Vec<EventId> = Vec::new();
    for input in sample_events() {
        let event = storage.insert_event(NewEvent::try_from(input)?).await?;
        event_ids.push(event.id);
    }

    for index in [0, 2] {
        if let Some(&event_id) = event_ids.get(index) {
            storage.insert_registration(admin.id, event_id).await?;
        }
    }

    tracing::info!(
        users = 1,
        events = event_ids.len(),
        "Sample data loaded"
    );
    Ok(())
}
