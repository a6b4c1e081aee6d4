//! First-run sample data.

use super::repository::Repository;
use super::storage::keys;
use crate::models::{now_iso, AlumniProfile, Event, Role, StudentProfile, User};

/// Populate the store with the demo records when it has no users yet.
///
/// Returns `true` when data was written. Once any user exists this is a no-op.
pub async fn initialize_sample_data(repo: &Repository) -> bool {
    if !repo.list_users().await.is_empty() {
        tracing::debug!("Store already has users, skipping sample data");
        return false;
    }

    let now = now_iso();

    let users = vec![
        seed_user("admin-1", "admin@college.edu", Role::Admin, &now),
        seed_user("alumni-1", "john.doe@gmail.com", Role::Alumni, &now),
        seed_user("student-1", "jane.smith@student.edu", Role::Student, &now),
    ];
    repo.storage().write_collection(keys::USERS, &users).await;

    repo.save_alumni_profile(&AlumniProfile {
        id: "profile-1".to_string(),
        user_id: "alumni-1".to_string(),
        name: "John Doe".to_string(),
        email: "john.doe@gmail.com".to_string(),
        year: 2020,
        branch: "Computer Science".to_string(),
        company: "Google Inc.".to_string(),
        linkedin_url: "https://linkedin.com/in/johndoe".to_string(),
        is_approved: true,
        is_available_as_mentor: true,
        profile_image: None,
        bio: Some(
            "Software Engineer at Google with 4+ years of experience in full-stack development."
                .to_string(),
        ),
        skills: Some(
            ["React", "Node.js", "Python", "Machine Learning"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        ),
        created_at: now.clone(),
        updated_at: now.clone(),
    })
    .await;

    repo.save_student_profile(&StudentProfile {
        id: "student-profile-1".to_string(),
        user_id: "student-1".to_string(),
        name: "Jane Smith".to_string(),
        email: "jane.smith@student.edu".to_string(),
        year: 2024,
        branch: "Computer Science".to_string(),
        roll_number: "CS2024001".to_string(),
        interests: Some(
            ["Web Development", "Data Science", "AI/ML"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        ),
        created_at: now.clone(),
    })
    .await;

    let events = vec![
        seed_event(
            "event-1",
            "Tech Talk: Future of AI",
            "Join us for an insightful discussion on the future of artificial intelligence.",
            ("2025-02-15", "18:00"),
            "Auditorium A",
            100,
            &now,
        ),
        seed_event(
            "event-2",
            "Alumni Networking Mixer",
            "Connect with fellow alumni and current students in a casual networking environment.",
            ("2025-02-28", "19:00"),
            "Student Center",
            150,
            &now,
        ),
    ];
    repo.storage().write_collection(keys::EVENTS, &events).await;

    tracing::info!(
        users = users.len(),
        events = events.len(),
        "Sample data initialized"
    );
    true
}

fn seed_user(id: &str, email: &str, role: Role, now: &str) -> User {
    User {
        id: id.to_string(),
        email: email.to_string(),
        role,
        created_at: now.to_string(),
    }
}

fn seed_event(
    id: &str,
    title: &str,
    description: &str,
    (date, time): (&str, &str),
    location: &str,
    max_attendees: i64,
    now: &str,
) -> Event {
    Event {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        location: location.to_string(),
        image_url: None,
        max_attendees: Some(max_attendees),
        created_by: "admin-1".to_string(),
        created_at: now.to_string(),
        rsvp_list: Vec::new(),
    }
}
