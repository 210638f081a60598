use std::collections::BTreeMap;

use thiserror::Error;
use tracing::info;

use crate::models::Activity;
use crate::store::ActivityStore;

/// Rejections surfaced to the caller. The display strings double as the
/// `detail` field of the error response body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActivityError {
    #[error("Activity not found")]
    NotFound,
    #[error("Student is already signed up")]
    AlreadyRegistered,
    #[error("Activity has reached maximum participants")]
    CapacityExceeded,
    #[error("Student is not signed up for this activity")]
    NotRegistered,
}

pub async fn list_activities(store: &ActivityStore) -> BTreeMap<String, Activity> {
    store.snapshot().await
}

/// Adds `email` to the activity's roster after the duplicate and capacity
/// checks, all under a single write guard.
pub async fn signup(
    store: &ActivityStore,
    activity_name: &str,
    email: &str,
) -> Result<String, ActivityError> {
    let mut activities = store.lock().await;
    let activity = activities
        .get_mut(activity_name)
        .ok_or(ActivityError::NotFound)?;

    if activity.participants.iter().any(|p| p == email) {
        return Err(ActivityError::AlreadyRegistered);
    }
    if activity.participants.len() >= activity.max_participants {
        return Err(ActivityError::CapacityExceeded);
    }

    activity.participants.push(email.to_string());
    info!(activity = activity_name, email, "participant signed up");
    Ok(format!("{email} signed up for {activity_name}"))
}

/// Removes `email` from the activity's roster, preserving the order of the
/// remaining participants.
pub async fn unregister(
    store: &ActivityStore,
    activity_name: &str,
    email: &str,
) -> Result<String, ActivityError> {
    let mut activities = store.lock().await;
    let activity = activities
        .get_mut(activity_name)
        .ok_or(ActivityError::NotFound)?;

    let Some(position) = activity.participants.iter().position(|p| p == email) else {
        return Err(ActivityError::NotRegistered);
    };

    activity.participants.remove(position);
    info!(activity = activity_name, email, "participant unregistered");
    Ok(format!("{email} unregistered from {activity_name}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(name: &str, max: usize, participants: &[&str]) -> ActivityStore {
        let mut activities = BTreeMap::new();
        activities.insert(
            name.to_string(),
            Activity {
                description: "test".to_string(),
                schedule: "whenever".to_string(),
                max_participants: max,
                participants: participants.iter().map(|e| e.to_string()).collect(),
            },
        );
        ActivityStore::new(activities)
    }

    #[tokio::test]
    async fn signup_appends_and_confirms() {
        let store = store_with("Chess Club", 3, &["a@mergington.edu"]);
        let message = signup(&store, "Chess Club", "b@mergington.edu")
            .await
            .unwrap();
        assert_eq!(message, "b@mergington.edu signed up for Chess Club");

        let snapshot = store.snapshot().await;
        assert_eq!(
            snapshot["Chess Club"].participants,
            vec!["a@mergington.edu", "b@mergington.edu"]
        );
    }

    #[tokio::test]
    async fn duplicate_signup_is_rejected_and_state_unchanged() {
        let store = store_with("Chess Club", 3, &["a@mergington.edu"]);
        let err = signup(&store, "Chess Club", "a@mergington.edu")
            .await
            .unwrap_err();
        assert_eq!(err, ActivityError::AlreadyRegistered);
        assert_eq!(store.snapshot().await["Chess Club"].participants.len(), 1);
    }

    #[tokio::test]
    async fn signup_at_capacity_is_rejected() {
        let store = store_with("Chess Club", 2, &["a@mergington.edu", "b@mergington.edu"]);
        let err = signup(&store, "Chess Club", "c@mergington.edu")
            .await
            .unwrap_err();
        assert_eq!(err, ActivityError::CapacityExceeded);
        assert_eq!(store.snapshot().await["Chess Club"].participants.len(), 2);
    }

    #[tokio::test]
    async fn unknown_activity_is_not_found_for_both_operations() {
        let store = store_with("Chess Club", 2, &[]);
        assert_eq!(
            signup(&store, "Rocket Club", "a@mergington.edu")
                .await
                .unwrap_err(),
            ActivityError::NotFound
        );
        assert_eq!(
            unregister(&store, "Rocket Club", "a@mergington.edu")
                .await
                .unwrap_err(),
            ActivityError::NotFound
        );
    }

    #[tokio::test]
    async fn unregister_removes_only_the_given_email() {
        let store = store_with(
            "Art Club",
            5,
            &["a@mergington.edu", "b@mergington.edu", "c@mergington.edu"],
        );
        let message = unregister(&store, "Art Club", "b@mergington.edu")
            .await
            .unwrap();
        assert_eq!(message, "b@mergington.edu unregistered from Art Club");
        assert_eq!(
            store.snapshot().await["Art Club"].participants,
            vec!["a@mergington.edu", "c@mergington.edu"]
        );
    }

    #[tokio::test]
    async fn unregister_of_absent_email_is_rejected() {
        let store = store_with("Art Club", 5, &["a@mergington.edu"]);
        let err = unregister(&store, "Art Club", "ghost@mergington.edu")
            .await
            .unwrap_err();
        assert_eq!(err, ActivityError::NotRegistered);
        assert_eq!(store.snapshot().await["Art Club"].participants.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_signups_cannot_exceed_capacity() {
        let store = store_with("Chess Club", 1, &[]);

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                signup(&store, "Chess Club", &format!("student{i}@mergington.edu")).await
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(store.snapshot().await["Chess Club"].participants.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_duplicate_signups_register_once() {
        let store = store_with("Art Club", 10, &[]);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                signup(&store, "Art Club", "same@mergington.edu").await
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(
            store.snapshot().await["Art Club"].participants,
            vec!["same@mergington.edu"]
        );
    }

    #[tokio::test]
    async fn freed_spot_can_be_taken_again() {
        let store = store_with("Math Club", 1, &["a@mergington.edu"]);
        unregister(&store, "Math Club", "a@mergington.edu")
            .await
            .unwrap();
        signup(&store, "Math Club", "b@mergington.edu").await.unwrap();
        assert_eq!(
            store.snapshot().await["Math Club"].participants,
            vec!["b@mergington.edu"]
        );
    }
}
