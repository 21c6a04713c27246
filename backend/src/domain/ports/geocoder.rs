//! Driven port for turning free-text addresses into locations.

use async_trait::async_trait;

use crate::domain::Location;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling a geocoding service.
    pub enum GeocoderError {
        /// Network transport failed before receiving a response.
        Transport { message: String } => "geocoder transport failed: {message}",
        /// The call exceeded its timeout.
        Timeout { message: String } => "geocoder timeout: {message}",
        /// The service answered with an error status.
        Rejected { status: String, message: String } =>
            "geocoder rejected request ({status}): {message}",
        /// The response could not be decoded.
        Decode { message: String } => "geocoder response decode failed: {message}",
    }
}

/// Port for geocoding campground addresses.
///
/// An address the service cannot resolve yields an empty list rather than
/// an error; callers treat both as an invalid address.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Candidate locations for `address`, best match first.
    async fn geocode(&self, address: &str) -> Result<Vec<Location>, GeocoderError>;
}

/// Offline geocoder used when no API key is configured.
///
/// Echoes the trimmed address back with fixed coordinates in Yosemite
/// Valley; blank input resolves to nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureGeocoder;

impl FixtureGeocoder {
    pub const LATITUDE: f64 = 37.7456;
    pub const LONGITUDE: f64 = -119.5936;
}

#[async_trait]
impl Geocoder for FixtureGeocoder {
    async fn geocode(&self, address: &str) -> Result<Vec<Location>, GeocoderError> {
        let trimmed = address.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![Location::new(trimmed, Self::LATITUDE, Self::LONGITUDE)])
    }
}
