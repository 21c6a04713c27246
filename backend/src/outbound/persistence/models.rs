//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{campgrounds, comments, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
}

/// Row struct for reading from the campgrounds table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = campgrounds)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CampgroundRow {
    pub id: Uuid,
    pub name: String,
    pub price: String,
    pub image: String,
    pub description: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub author_id: Uuid,
    pub author_username: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating campground records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = campgrounds)]
pub(crate) struct NewCampgroundRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub price: &'a str,
    pub image: &'a str,
    pub description: &'a str,
    pub location: &'a str,
    pub latitude: f64,
    pub longitude: f64,
    pub author_id: Uuid,
    pub author_username: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Changeset for the owner-editable campground columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = campgrounds)]
pub(crate) struct CampgroundUpdate<'a> {
    pub name: &'a str,
    pub price: &'a str,
    pub image: &'a str,
    pub description: &'a str,
    pub location: &'a str,
    pub latitude: f64,
    pub longitude: f64,
}

/// Row struct for reading from the comments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: Uuid,
    pub campground_id: Uuid,
    pub text: String,
    pub author_id: Uuid,
    pub author_username: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating comment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub(crate) struct NewCommentRow<'a> {
    pub id: Uuid,
    pub campground_id: Uuid,
    pub text: &'a str,
    pub author_id: Uuid,
    pub author_username: &'a str,
    pub created_at: DateTime<Utc>,
}
