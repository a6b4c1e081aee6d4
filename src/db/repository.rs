//! Entity repositories over the storage gateway.
//!
//! Each collection is read whole, scanned linearly and written back whole. Writes that
//! read first hold `write_lock` for the span so concurrent handlers in this process
//! cannot drop each other's updates.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;

use super::storage::{keys, LocalStorage};
use crate::errors::AppError;
use crate::models::{
    AlumniDirectory, AlumniDirectoryQuery, AlumniProfile, Donation, Event, EventFilter,
    MentorshipRequest, MentorshipStatus, Role, StudentProfile, User,
};

/// A record kept in one whole-collection storage key.
pub trait Entity: Serialize + DeserializeOwned + Clone {
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
}

impl Entity for User {
    const COLLECTION: &'static str = keys::USERS;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for AlumniProfile {
    const COLLECTION: &'static str = keys::ALUMNI_PROFILES;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for StudentProfile {
    const COLLECTION: &'static str = keys::STUDENT_PROFILES;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Event {
    const COLLECTION: &'static str = keys::EVENTS;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for MentorshipRequest {
    const COLLECTION: &'static str = keys::MENTORSHIP_REQUESTS;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Donation {
    const COLLECTION: &'static str = keys::DONATIONS;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Repository for all portal collections.
#[derive(Clone)]
pub struct Repository {
    storage: LocalStorage,
    write_lock: Arc<Mutex<()>>,
}

impl Repository {
    pub fn new(storage: LocalStorage) -> Self {
        Self {
            storage,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    // ==================== GENERIC OPERATIONS ====================

    async fn all<T: Entity>(&self) -> Vec<T> {
        self.storage.read_collection(T::COLLECTION).await
    }

    async fn find<T: Entity>(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.all::<T>().await.into_iter().find(|e| predicate(e))
    }

    async fn filter<T: Entity>(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.all::<T>()
            .await
            .into_iter()
            .filter(|e| predicate(e))
            .collect()
    }

    /// Replace the record with the same id, or append it.
    async fn upsert<T: Entity>(&self, entity: &T) {
        let _guard = self.write_lock.lock().await;
        let mut items: Vec<T> = self.all().await;
        match items.iter().position(|e| e.id() == entity.id()) {
            Some(index) => items[index] = entity.clone(),
            None => items.push(entity.clone()),
        }
        self.storage.write_collection(T::COLLECTION, &items).await;
    }

    /// Apply `change` to the record with `id` and write back the replacement record.
    async fn replace_with<T: Entity>(
        &self,
        id: &str,
        what: &str,
        change: impl FnOnce(&T) -> T,
    ) -> Result<T, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut items: Vec<T> = self.all().await;
        let index = items
            .iter()
            .position(|e| e.id() == id)
            .ok_or_else(|| AppError::NotFound(format!("{} {} not found", what, id)))?;
        let replacement = change(&items[index]);
        items[index] = replacement.clone();
        self.storage.write_collection(T::COLLECTION, &items).await;
        Ok(replacement)
    }

    // ==================== USER OPERATIONS ====================

    pub async fn save_user(&self, user: &User) {
        self.upsert(user).await;
    }

    pub async fn list_users(&self) -> Vec<User> {
        self.all().await
    }

    pub async fn get_user(&self, id: &str) -> Option<User> {
        self.find(|u: &User| u.id == id).await
    }

    /// Existing account matching both email and role, or a newly created one.
    pub async fn find_or_create_user(&self, email: &str, role: Role) -> Result<User, AppError> {
        let email = email.trim();
        let _guard = self.write_lock.lock().await;
        let mut users: Vec<User> = self.all().await;
        if let Some(user) = users.iter().find(|u| u.email == email && u.role == role) {
            return Ok(user.clone());
        }

        let user = User::new(email, role)?;
        users.push(user.clone());
        self.storage.write_collection(keys::USERS, &users).await;
        tracing::info!(user_id = %user.id, role = role.as_str(), "Created user account");
        Ok(user)
    }

    // ==================== ALUMNI PROFILE OPERATIONS ====================

    pub async fn save_alumni_profile(&self, profile: &AlumniProfile) {
        self.upsert(profile).await;
    }

    pub async fn list_alumni_profiles(&self) -> Vec<AlumniProfile> {
        self.all().await
    }

    pub async fn list_approved_alumni_profiles(&self) -> Vec<AlumniProfile> {
        self.filter(|p: &AlumniProfile| p.is_listed()).await
    }

    pub async fn list_available_mentors(&self) -> Vec<AlumniProfile> {
        self.filter(AlumniProfile::is_available_mentor).await
    }

    pub async fn get_alumni_profile(&self, id: &str) -> Option<AlumniProfile> {
        self.find(|p: &AlumniProfile| p.id == id).await
    }

    pub async fn get_alumni_profile_by_user_id(&self, user_id: &str) -> Option<AlumniProfile> {
        self.find(|p: &AlumniProfile| p.user_id == user_id).await
    }

    /// Apply an admin's approve/reject decision.
    pub async fn set_alumni_approval(
        &self,
        id: &str,
        approve: bool,
    ) -> Result<AlumniProfile, AppError> {
        let profile = self
            .replace_with(id, "Alumni profile", |p: &AlumniProfile| {
                p.with_approval(approve)
            })
            .await?;
        tracing::info!(profile_id = %id, approve, "Alumni approval updated");
        Ok(profile)
    }

    /// Approved profiles matching the directory filters.
    pub async fn search_alumni(&self, query: &AlumniDirectoryQuery) -> AlumniDirectory {
        AlumniDirectory::build(self.list_approved_alumni_profiles().await, query)
    }

    // ==================== STUDENT PROFILE OPERATIONS ====================

    pub async fn save_student_profile(&self, profile: &StudentProfile) {
        self.upsert(profile).await;
    }

    pub async fn list_student_profiles(&self) -> Vec<StudentProfile> {
        self.all().await
    }

    pub async fn get_student_profile_by_user_id(&self, user_id: &str) -> Option<StudentProfile> {
        self.find(|p: &StudentProfile| p.user_id == user_id).await
    }

    // ==================== EVENT OPERATIONS ====================

    pub async fn save_event(&self, event: &Event) {
        self.upsert(event).await;
    }

    pub async fn list_events(&self) -> Vec<Event> {
        self.all().await
    }

    /// Events in the requested slice, earliest date first.
    pub async fn list_events_filtered(&self, filter: EventFilter, today: NaiveDate) -> Vec<Event> {
        let mut events = self.filter(|e: &Event| filter.matches(e, today)).await;
        // Unparseable dates sort last, stable otherwise.
        events.sort_by_key(|e| (e.event_date().is_none(), e.event_date()));
        events
    }

    pub async fn get_event(&self, id: &str) -> Option<Event> {
        self.find(|e: &Event| e.id == id).await
    }

    /// Drop the event with `id` and rewrite the rest. Returns whether a record was removed.
    pub async fn delete_event(&self, id: &str) -> bool {
        let _guard = self.write_lock.lock().await;
        let events: Vec<Event> = self.all().await;
        let before = events.len();
        let kept: Vec<Event> = events.into_iter().filter(|e| e.id != id).collect();
        let removed = kept.len() != before;
        self.storage.write_collection(keys::EVENTS, &kept).await;
        if removed {
            tracing::info!(event_id = %id, "Event deleted");
        }
        removed
    }

    /// Add `user_id` to the event's RSVP list, or remove it if already present.
    pub async fn toggle_rsvp(&self, event_id: &str, user_id: &str) -> Result<Event, AppError> {
        self.replace_with(event_id, "Event", |e: &Event| e.with_rsvp_toggled(user_id))
            .await
    }

    // ==================== MENTORSHIP OPERATIONS ====================

    pub async fn save_mentorship_request(&self, request: &MentorshipRequest) {
        self.upsert(request).await;
    }

    pub async fn list_mentorship_requests(&self) -> Vec<MentorshipRequest> {
        self.all().await
    }

    pub async fn list_mentorship_requests_by_student(
        &self,
        student_id: &str,
    ) -> Vec<MentorshipRequest> {
        let sent_by = |r: &MentorshipRequest| r.student_id == student_id;
        self.filter(sent_by).await
    }

    /// Requests addressed to the alumni profile `profile_id`.
    pub async fn list_mentorship_requests_for_alumni(
        &self,
        profile_id: &str,
    ) -> Vec<MentorshipRequest> {
        let addressed_to = |r: &MentorshipRequest| r.alumni_id == profile_id;
        self.filter(addressed_to).await
    }

    pub async fn get_mentorship_request(&self, id: &str) -> Option<MentorshipRequest> {
        self.find(|r: &MentorshipRequest| r.id == id).await
    }

    pub async fn update_mentorship_status(
        &self,
        id: &str,
        status: MentorshipStatus,
    ) -> Result<MentorshipRequest, AppError> {
        self.replace_with(id, "Mentorship request", |r: &MentorshipRequest| {
            r.with_status(status)
        })
        .await
    }

    // ==================== DONATION OPERATIONS ====================

    /// Append a donation. Donations are never replaced or removed.
    pub async fn save_donation(&self, donation: &Donation) {
        let _guard = self.write_lock.lock().await;
        let mut donations: Vec<Donation> = self.all().await;
        donations.push(donation.clone());
        self.storage
            .write_collection(keys::DONATIONS, &donations)
            .await;
    }

    pub async fn list_donations(&self) -> Vec<Donation> {
        self.all().await
    }

    pub async fn list_donations_by_donor(&self, donor_id: &str) -> Vec<Donation> {
        self.filter(|d: &Donation| d.donor_id == donor_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::temp_repository;
    use crate::models::{
        AlumniProfileInput, DonationInput, DonationSummary, EventInput, StudentProfileInput,
    };

    fn event_input(title: &str, date: &str) -> EventInput {
        EventInput {
            title: title.to_string(),
            description: "Details".to_string(),
            date: date.to_string(),
            time: "18:00".to_string(),
            location: "Hall".to_string(),
            image_url: None,
            max_attendees: None,
        }
    }

    fn alumni(email: &str, approved: bool, mentor: bool) -> AlumniProfile {
        let user = User::new(email, Role::Alumni).unwrap();
        AlumniProfile {
            is_approved: approved,
            is_available_as_mentor: mentor,
            ..AlumniProfile::default_for(&user)
        }
    }

    #[tokio::test]
    async fn test_upsert_keeps_single_record_per_id() {
        let (repo, _dir) = temp_repository().await;
        let event = Event::from_input(event_input("Talk", "2025-02-15"), "admin-1").unwrap();
        repo.save_event(&event).await;

        let edited = event.updated(event_input("Talk v2", "2025-02-16")).unwrap();
        repo.save_event(&edited).await;

        let events = repo.list_events().await;
        let matching: Vec<&Event> = events.iter().filter(|e| e.id == event.id).collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0], &edited);
    }

    #[tokio::test]
    async fn test_upsert_appends_in_insertion_order() {
        let (repo, _dir) = temp_repository().await;
        let a = User::new("a@x.edu", Role::Student).unwrap();
        let b = User::new("b@x.edu", Role::Alumni).unwrap();
        repo.save_user(&a).await;
        repo.save_user(&b).await;
        repo.save_user(&a).await;

        let ids: Vec<String> = repo.list_users().await.into_iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![a.id.clone(), b.id.clone()]);
        assert_eq!(repo.get_user(&b.id).await, Some(b));
    }

    #[tokio::test]
    async fn test_find_or_create_user_matches_email_and_role() {
        let (repo, _dir) = temp_repository().await;
        let first = repo
            .find_or_create_user("jane@student.edu", Role::Student)
            .await
            .unwrap();
        let again = repo
            .find_or_create_user("jane@student.edu", Role::Student)
            .await
            .unwrap();
        assert_eq!(first, again);

        let other_role = repo
            .find_or_create_user("jane@student.edu", Role::Alumni)
            .await
            .unwrap();
        assert_ne!(first.id, other_role.id);
        assert_eq!(repo.list_users().await.len(), 2);
    }

    #[tokio::test]
    async fn test_approval_filters() {
        let (repo, _dir) = temp_repository().await;
        let approved_mentor = alumni("a@x.com", true, true);
        let approved_only = alumni("b@x.com", true, false);
        let pending_mentor = alumni("c@x.com", false, true);
        for p in [&approved_mentor, &approved_only, &pending_mentor] {
            repo.save_alumni_profile(p).await;
        }

        let approved = repo.list_approved_alumni_profiles().await;
        assert_eq!(approved, vec![approved_mentor.clone(), approved_only.clone()]);

        let mentors = repo.list_available_mentors().await;
        assert_eq!(mentors, vec![approved_mentor]);
    }

    #[tokio::test]
    async fn test_set_alumni_approval() {
        let (repo, _dir) = temp_repository().await;
        let profile = alumni("a@x.com", false, true);
        repo.save_alumni_profile(&profile).await;

        let approved = repo.set_alumni_approval(&profile.id, true).await.unwrap();
        assert!(approved.is_approved);
        assert_eq!(
            repo.get_alumni_profile_by_user_id(&profile.user_id).await,
            Some(approved)
        );

        let missing = repo.set_alumni_approval("nope", true).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_profile_edit_replaces_whole_record() {
        let (repo, _dir) = temp_repository().await;
        let profile = alumni("a@x.com", true, false);
        repo.save_alumni_profile(&profile).await;

        let edited = profile
            .updated(AlumniProfileInput {
                name: "Ann".to_string(),
                year: 2015,
                branch: "Civil".to_string(),
                company: "Acme".to_string(),
                linkedin_url: String::new(),
                is_available_as_mentor: true,
                profile_image: None,
                bio: None,
                skills: None,
            })
            .unwrap();
        repo.save_alumni_profile(&edited).await;

        let stored = repo.get_alumni_profile(&profile.id).await.unwrap();
        assert_eq!(stored, edited);
        assert_eq!(repo.list_alumni_profiles().await.len(), 1);
    }

    #[tokio::test]
    async fn test_student_profile_upsert_replaces_by_id() {
        let (repo, _dir) = temp_repository().await;
        let user = User::new("jane@student.edu", Role::Student).unwrap();
        let classmate = User::new("sam@student.edu", Role::Student).unwrap();
        let other = StudentProfile::default_for(&classmate);
        let profile = StudentProfile::default_for(&user);
        repo.save_student_profile(&profile).await;
        repo.save_student_profile(&other).await;

        let edited = profile
            .updated(StudentProfileInput {
                name: "Jane Smith".to_string(),
                year: 2026,
                branch: "Mechanical".to_string(),
                roll_number: "ME2026007".to_string(),
                interests: Some(vec!["Robotics".to_string()]),
            })
            .unwrap();
        repo.save_student_profile(&edited).await;

        assert_eq!(repo.list_student_profiles().await, vec![edited.clone(), other]);
        assert_eq!(repo.get_student_profile_by_user_id(&user.id).await, Some(edited));
    }

    #[tokio::test]
    async fn test_mentorship_request_upsert_replaces_by_id() {
        let (repo, _dir) = temp_repository().await;
        let student = User::new("s@student.edu", Role::Student).unwrap();
        let mentor = alumni("m@x.com", true, true);
        let request = MentorshipRequest::new(&student, None, &mentor, "Hello").unwrap();
        repo.save_mentorship_request(&request).await;

        let rejected = request.with_status(MentorshipStatus::Rejected);
        repo.save_mentorship_request(&rejected).await;

        assert_eq!(repo.list_mentorship_requests().await, vec![rejected.clone()]);
        assert_eq!(repo.get_mentorship_request(&request.id).await, Some(rejected));
    }

    #[tokio::test]
    async fn test_stored_negative_capacity_survives_writes() {
        let (repo, _dir) = temp_repository().await;
        let stored = r#"[
            {"id":"event-1","title":"Meetup","description":"d","date":"2025-02-15","time":"18:00","location":"Hall","maxAttendees":-5,"createdBy":"admin-1","createdAt":"2025-01-01T00:00:00.000Z","rsvpList":[]},
            {"id":"event-2","title":"Workshop","description":"d","date":"2025-02-20","time":"14:00","location":"Lab","createdBy":"admin-1","createdAt":"2025-01-01T00:00:00.000Z","rsvpList":["u1"]}
        ]"#;
        repo.storage().set_item(keys::EVENTS, stored).await.unwrap();

        let events = repo.list_events().await;
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].max_attendees, Some(-5));

        let added = Event::from_input(event_input("Talk", "2025-03-01"), "admin-1").unwrap();
        repo.save_event(&added).await;
        repo.toggle_rsvp("event-1", "u2").await.unwrap();

        let ids: Vec<String> = repo.list_events().await.into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["event-1".to_string(), "event-2".to_string(), added.id]);
        let workshop = repo.get_event("event-2").await.unwrap();
        assert_eq!(workshop.rsvp_list, vec!["u1"]);
    }

    #[tokio::test]
    async fn test_delete_event() {
        let (repo, _dir) = temp_repository().await;
        let keep = Event::from_input(event_input("Keep", "2025-02-15"), "admin-1").unwrap();
        let doomed = Event::from_input(event_input("Drop", "2025-02-16"), "admin-1").unwrap();
        repo.save_event(&keep).await;
        repo.save_event(&doomed).await;

        assert!(repo.delete_event(&doomed.id).await);
        let events = repo.list_events().await;
        assert!(events.iter().all(|e| e.id != doomed.id));
        assert_eq!(events, vec![keep.clone()]);

        assert!(!repo.delete_event(&doomed.id).await);
        assert_eq!(repo.list_events().await, vec![keep]);
    }

    #[tokio::test]
    async fn test_toggle_rsvp_persists() {
        let (repo, _dir) = temp_repository().await;
        let event = Event::from_input(event_input("Talk", "2025-02-15"), "admin-1").unwrap();
        repo.save_event(&event).await;

        let joined = repo.toggle_rsvp(&event.id, "u1").await.unwrap();
        assert_eq!(joined.rsvp_list, vec!["u1".to_string()]);
        assert_eq!(repo.get_event(&event.id).await.unwrap().rsvp_list, vec!["u1"]);

        let left = repo.toggle_rsvp(&event.id, "u1").await.unwrap();
        assert!(left.rsvp_list.is_empty());
        assert!(repo.get_event(&event.id).await.unwrap().rsvp_list.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_rsvps_are_not_lost() {
        let (repo, _dir) = temp_repository().await;
        let event = Event::from_input(event_input("Talk", "2025-02-15"), "admin-1").unwrap();
        repo.save_event(&event).await;

        let mut handles = Vec::new();
        for i in 0..10 {
            let repo = repo.clone();
            let id = event.id.clone();
            handles.push(tokio::spawn(async move {
                repo.toggle_rsvp(&id, &format!("user-{}", i)).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(repo.get_event(&event.id).await.unwrap().attendee_count(), 10);
    }

    #[tokio::test]
    async fn test_list_events_filtered_sorted() {
        let (repo, _dir) = temp_repository().await;
        for (title, date) in [("Late", "2025-03-01"), ("Old", "2024-12-01"), ("Soon", "2025-02-01")]
        {
            let event = Event::from_input(event_input(title, date), "admin-1").unwrap();
            repo.save_event(&event).await;
        }
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();

        let titles = |events: Vec<Event>| events.into_iter().map(|e| e.title).collect::<Vec<_>>();
        assert_eq!(
            titles(repo.list_events_filtered(EventFilter::Upcoming, today).await),
            vec!["Soon", "Late"]
        );
        assert_eq!(
            titles(repo.list_events_filtered(EventFilter::Past, today).await),
            vec!["Old"]
        );
        assert_eq!(
            titles(repo.list_events_filtered(EventFilter::All, today).await),
            vec!["Old", "Soon", "Late"]
        );
    }

    #[tokio::test]
    async fn test_mentorship_queries_and_status() {
        let (repo, _dir) = temp_repository().await;
        let student = User::new("s@student.edu", Role::Student).unwrap();
        let mentor = alumni("m@x.com", true, true);
        let other = alumni("o@x.com", true, true);

        let to_mentor = MentorshipRequest::new(&student, None, &mentor, "Hello").unwrap();
        let to_other = MentorshipRequest::new(&student, None, &other, "Hi").unwrap();
        repo.save_mentorship_request(&to_mentor).await;
        repo.save_mentorship_request(&to_other).await;

        assert_eq!(
            repo.list_mentorship_requests_by_student(&student.id).await.len(),
            2
        );
        assert_eq!(
            repo.list_mentorship_requests_for_alumni(&mentor.id).await,
            vec![to_mentor.clone()]
        );

        let approved = repo
            .update_mentorship_status(&to_mentor.id, MentorshipStatus::Approved)
            .await
            .unwrap();
        assert_eq!(approved.status, MentorshipStatus::Approved);
        assert_eq!(
            repo.get_mentorship_request(&to_mentor.id).await.unwrap().status,
            MentorshipStatus::Approved
        );
    }

    #[tokio::test]
    async fn test_donations_append_and_total() {
        let (repo, _dir) = temp_repository().await;
        let donor = User::new("d@x.com", Role::Alumni).unwrap();
        let other = User::new("e@x.com", Role::Alumni).unwrap();
        for (user, amount) in [(&donor, 500.0), (&donor, 1000.0), (&other, 2500.0)] {
            let donation = Donation::new(
                DonationInput {
                    amount,
                    message: None,
                },
                user,
                None,
            )
            .unwrap();
            repo.save_donation(&donation).await;
        }

        let all = repo.list_donations().await;
        assert_eq!(all.len(), 3);
        let summary = DonationSummary::from_donations(&all);
        assert_eq!(summary.total_raised, 4000.0);
        assert_eq!(summary.largest_donation, 2500.0);
        assert_eq!(summary.average_donation, 1333);

        let mine = repo.list_donations_by_donor(&donor.id).await;
        assert_eq!(DonationSummary::from_donations(&mine).total_raised, 1500.0);
    }
}
