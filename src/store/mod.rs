use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::{RwLock, RwLockWriteGuard};

use crate::models::Activity;

/// In-memory activity directory. Clones share the same underlying map, so the
/// store is injected into the router as axum state the same way a connection
/// pool would be, and every test gets its own isolated instance.
#[derive(Clone, Default)]
pub struct ActivityStore {
    inner: Arc<RwLock<BTreeMap<String, Activity>>>,
}

impl ActivityStore {
    pub fn new(activities: BTreeMap<String, Activity>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(activities)),
        }
    }

    /// Directory pre-loaded with the fixed Mergington High offering.
    pub fn seeded() -> Self {
        Self::new(seed_activities())
    }

    /// Cloned view of the full directory.
    pub async fn snapshot(&self) -> BTreeMap<String, Activity> {
        self.inner.read().await.clone()
    }

    /// Write access for the service layer. Membership and capacity checks must
    /// happen under this guard so concurrent signups cannot race past them.
    pub(crate) async fn lock(&self) -> RwLockWriteGuard<'_, BTreeMap<String, Activity>> {
        self.inner.write().await
    }
}

fn seed_activities() -> BTreeMap<String, Activity> {
    let mut activities = BTreeMap::new();
    let mut add = |name: &str, description: &str, schedule: &str, max: usize, emails: &[&str]| {
        activities.insert(
            name.to_string(),
            Activity {
                description: description.to_string(),
                schedule: schedule.to_string(),
                max_participants: max,
                participants: emails.iter().map(|e| e.to_string()).collect(),
            },
        );
    };

    add(
        "Chess Club",
        "Learn strategies and compete in chess tournaments",
        "Fridays, 3:30 PM - 5:00 PM",
        12,
        &["michael@mergington.edu", "daniel@mergington.edu"],
    );
    add(
        "Programming Class",
        "Learn programming fundamentals and build software projects",
        "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
        20,
        &["emma@mergington.edu", "sophia@mergington.edu"],
    );
    add(
        "Gym Class",
        "Physical education and sports activities",
        "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
        30,
        &["john@mergington.edu", "olivia@mergington.edu"],
    );
    add(
        "Soccer Club",
        "Practice soccer skills and play friendly matches",
        "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
        22,
        &["liam@mergington.edu", "noah@mergington.edu"],
    );
    add(
        "Basketball Team",
        "Train with the team and compete against other schools",
        "Wednesdays, 4:00 PM - 5:30 PM",
        15,
        &["ava@mergington.edu", "mia@mergington.edu"],
    );
    add(
        "Art Club",
        "Explore painting, drawing, and other visual arts",
        "Thursdays, 3:30 PM - 5:00 PM",
        15,
        &["amelia@mergington.edu", "harper@mergington.edu"],
    );
    add(
        "Drama Club",
        "Act, direct, and produce plays and performances",
        "Mondays and Wednesdays, 4:00 PM - 5:30 PM",
        20,
        &["ella@mergington.edu", "scarlett@mergington.edu"],
    );
    add(
        "Math Club",
        "Solve challenging problems and prepare for math competitions",
        "Tuesdays, 3:30 PM - 4:30 PM",
        10,
        &["james@mergington.edu", "benjamin@mergington.edu"],
    );
    add(
        "Debate Team",
        "Develop public speaking and argumentation skills",
        "Fridays, 4:00 PM - 5:30 PM",
        12,
        &["charlotte@mergington.edu", "henry@mergington.edu"],
    );

    activities
}
