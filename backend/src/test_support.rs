//! Shared builders and doubles for unit tests across the crate.

use std::sync::Mutex;

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    Author, Campground, CampgroundDraft, CampgroundId, Comment, CommentId, CommentText, Location,
    User, UserId, Username,
};

/// Clock that only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub fn user(username: &str) -> User {
    User::new(UserId::random(), Username::new(username).expect("valid username"))
}

pub fn author_of(user: &User) -> Author {
    Author::from(user)
}

pub fn draft(name: &str, location: &str) -> CampgroundDraft {
    CampgroundDraft::try_from_parts(name, "12.50", "", "A quiet spot", location)
        .expect("valid draft")
}

pub fn campground(name: &str, author: &Author, created_at: DateTime<Utc>) -> Campground {
    let details = draft(name, "Moab, UT").locate(Location::new("Moab, UT 84532, USA", 38.57, -109.55));
    Campground::new(CampgroundId::random(), details, author.clone(), created_at)
}

pub fn comment(campground_id: CampgroundId, text: &str, author: &Author, created_at: DateTime<Utc>) -> Comment {
    Comment::new(
        CommentId::random(),
        campground_id,
        CommentText::new(text).expect("valid comment"),
        author.clone(),
        created_at,
    )
}
