//! Sample data seeding.
//!
//! Wipes campgrounds and comments, then inserts a fixed set of sample
//! campgrounds each carrying one comment from a seed user.

use std::sync::Arc;

use chrono::TimeDelta;
use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{
    CampgroundPersistenceError, CampgroundRepository, CommentPersistenceError, CommentRepository,
    PasswordHashError, PasswordHasher, UserAccount, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Author, Campground, CampgroundDetails, CampgroundId, CampgroundName, CampgroundValidationError,
    Comment, CommentId, CommentText, CommentValidationError, Description, ImageUrl, Location,
    Price, Registration, User, UserId,
};

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipisicing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat. Duis aute irure dolor in reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur. Excepteur sint occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim id est laborum";

/// Comment attached to every sample campground.
pub const SAMPLE_COMMENT: &str = "This place is great, but I wish there was internet";

/// One sample campground definition.
#[derive(Debug, Clone, Copy)]
pub struct SampleCampground {
    pub name: &'static str,
    pub price: &'static str,
    pub image: &'static str,
    pub address: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

/// The campgrounds inserted by [`CampgroundSeeder::seed`].
pub const SAMPLE_CAMPGROUNDS: [SampleCampground; 3] = [
    SampleCampground {
        name: "Cloud's Rest",
        price: "9.00",
        image: "https://images.unsplash.com/photo-1478827298317-156cfe05f18a?ixlib=rb-0.3.5&q=80&fm=jpg&crop=entropy&cs=tinysrgb&w=1080&fit=max&ixid=eyJhcHBfaWQiOjF9&s=69ebfd242d0a21f6f45331ee5f0521a7",
        address: "Clouds Rest, Yosemite National Park, CA 95389, USA",
        latitude: 37.7675,
        longitude: -119.4895,
    },
    SampleCampground {
        name: "Desert Mesa",
        price: "12.50",
        image: "https://images.unsplash.com/photo-1445308394109-4ec2920981b1?ixlib=rb-0.3.5&q=80&fm=jpg&crop=entropy&cs=tinysrgb&w=1080&fit=max&ixid=eyJhcHBfaWQiOjF9&s=735bc5cdd64a75bd89bc85e484038e59",
        address: "Mesa Verde National Park, CO 81330, USA",
        latitude: 37.2309,
        longitude: -108.4618,
    },
    SampleCampground {
        name: "Canyon Floor",
        price: "7.25",
        image: "https://images.unsplash.com/photo-1519908963259-6abf60e36d61?ixlib=rb-0.3.5&q=80&fm=jpg&crop=entropy&cs=tinysrgb&w=1080&fit=max&ixid=eyJhcHBfaWQiOjF9&s=c03d8059fc7693dd43b1d90fb1a68a53",
        address: "Grand Canyon Village, AZ 86023, USA",
        latitude: 36.0544,
        longitude: -112.1401,
    },
];

/// Summary of a seeding run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedOutcome {
    /// Campgrounds removed before inserting.
    pub removed: u64,
    /// Sample campgrounds inserted.
    pub inserted: usize,
    /// Whether the seed user had to be created.
    pub author_created: bool,
}

/// Errors raised while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("sample campground failed validation: {0}")]
    Campground(#[from] CampgroundValidationError),
    #[error("sample comment failed validation: {0}")]
    Comment(#[from] CommentValidationError),
    #[error("seed user persistence failed: {0}")]
    Users(#[from] UserPersistenceError),
    #[error("campground persistence failed: {0}")]
    Campgrounds(#[from] CampgroundPersistenceError),
    #[error("comment persistence failed: {0}")]
    Comments(#[from] CommentPersistenceError),
    #[error("seed user password hashing failed: {0}")]
    Hash(#[from] PasswordHashError),
}

/// Orchestrates sample data seeding over the driven ports.
#[derive(Clone)]
pub struct CampgroundSeeder<U, C, M, H> {
    users: Arc<U>,
    campgrounds: Arc<C>,
    comments: Arc<M>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
}

impl<U, C, M, H> CampgroundSeeder<U, C, M, H> {
    pub fn new(
        users: Arc<U>,
        campgrounds: Arc<C>,
        comments: Arc<M>,
        hasher: Arc<H>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            campgrounds,
            comments,
            hasher,
            clock,
        }
    }
}

impl<U, C, M, H> CampgroundSeeder<U, C, M, H>
where
    U: UserRepository,
    C: CampgroundRepository,
    M: CommentRepository,
    H: PasswordHasher,
{
    /// Replace all campgrounds with the samples, authored by `seed_user`.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError`] if validation, hashing or persistence fails.
    pub async fn seed(&self, seed_user: &Registration) -> Result<SeedOutcome, SeedError> {
        let (author, author_created) = self.ensure_author(seed_user).await?;

        let removed = self.campgrounds.delete_all().await?;
        info!(removed, "removed campgrounds and comments");

        let started = self.clock.utc();
        let mut inserted = 0;
        for (offset, sample) in (0_i64..).zip(SAMPLE_CAMPGROUNDS.iter()) {
            let created_at = started + TimeDelta::seconds(offset);
            let campground = Campground::new(
                CampgroundId::random(),
                sample_details(sample)?,
                author.clone(),
                created_at,
            );
            self.campgrounds.insert(&campground).await?;

            let comment = Comment::new(
                CommentId::random(),
                campground.id(),
                CommentText::new(SAMPLE_COMMENT)?,
                author.clone(),
                created_at,
            );
            self.comments.insert(&comment).await?;
            inserted += 1;
            info!(name = sample.name, "added campground with comment");
        }

        Ok(SeedOutcome {
            removed,
            inserted,
            author_created,
        })
    }

    async fn ensure_author(&self, seed_user: &Registration) -> Result<(Author, bool), SeedError> {
        if let Some(existing) = self
            .users
            .find_by_username(seed_user.username().as_ref())
            .await?
        {
            return Ok((Author::from(&existing.user), false));
        }

        let account = UserAccount {
            user: User::new(UserId::random(), seed_user.username().clone()),
            password_hash: self.hasher.hash(seed_user.password())?,
        };
        self.users.insert(&account).await?;
        info!(username = %seed_user.username(), "created seed user");
        Ok((Author::from(&account.user), true))
    }
}

fn sample_details(sample: &SampleCampground) -> Result<CampgroundDetails, SeedError> {
    Ok(CampgroundDetails::new(
        CampgroundName::new(sample.name)?,
        Price::new(sample.price)?,
        ImageUrl::new(sample.image)?,
        Description::new(LOREM)?,
        Location::new(sample.address, sample.latitude, sample.longitude),
    ))
}
