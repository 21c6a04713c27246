//! DTOs for decoding Google Geocoding API responses.

use serde::Deserialize;

use crate::domain::Location;

pub(super) const STATUS_OK: &str = "OK";
pub(super) const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

#[derive(Debug, Deserialize)]
pub(super) struct GeocodeResponseDto {
    pub(super) status: String,
    #[serde(default)]
    pub(super) results: Vec<GeocodeResultDto>,
    pub(super) error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GeocodeResultDto {
    pub(super) formatted_address: String,
    pub(super) geometry: GeometryDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct GeometryDto {
    pub(super) location: LatLngDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct LatLngDto {
    pub(super) lat: f64,
    pub(super) lng: f64,
}

impl GeocodeResultDto {
    pub(super) fn into_location(self) -> Result<Location, String> {
        let LatLngDto { lat, lng } = self.geometry.location;
        if !lat.is_finite() || !lng.is_finite() {
            return Err(format!(
                "result for {} includes non-finite coordinates",
                self.formatted_address
            ));
        }
        Ok(Location::new(self.formatted_address, lat, lng))
    }
}
