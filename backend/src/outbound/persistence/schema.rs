//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        /// Unique login name (max 32 characters).
        username -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Campground listings with their geocoded location.
    campgrounds (id) {
        id -> Uuid,
        /// Display name (max 100 characters).
        name -> Varchar,
        /// Decimal price kept as submitted text.
        price -> Text,
        image -> Text,
        description -> Text,
        /// Formatted address returned by the geocoder.
        location -> Text,
        latitude -> Float8,
        longitude -> Float8,
        author_id -> Uuid,
        /// Author username captured at creation time.
        author_username -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comments; rows cascade away with their campground.
    comments (id) {
        id -> Uuid,
        campground_id -> Uuid,
        text -> Text,
        author_id -> Uuid,
        author_username -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(comments -> campgrounds (campground_id));

diesel::allow_tables_to_appear_in_same_query!(campgrounds, comments, users);
