//! Geocoding adapters.

mod dto;
mod google;

pub use google::{DEFAULT_GOOGLE_GEOCODE_ENDPOINT, GoogleGeocoder};
