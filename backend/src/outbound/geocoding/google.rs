//! Reqwest-backed Google Geocoding API adapter.
//!
//! Owns transport only: query construction, timeout and status mapping, and
//! JSON decoding into domain locations.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;
use zeroize::Zeroizing;

use super::dto::{GeocodeResponseDto, STATUS_OK, STATUS_ZERO_RESULTS};
use crate::domain::Location;
use crate::domain::ports::{Geocoder, GeocoderError};

/// Public Google Geocoding endpoint.
pub const DEFAULT_GOOGLE_GEOCODE_ENDPOINT: &str =
    "https://maps.googleapis.com/maps/api/geocode/json";

/// Geocoder that issues one GET request per address.
pub struct GoogleGeocoder {
    client: Client,
    endpoint: Url,
    api_key: Zeroizing<String>,
}

impl GoogleGeocoder {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: Zeroizing::new(api_key.into()),
        })
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn geocode(&self, address: &str) -> Result<Vec<Location>, GeocoderError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_locations(body.as_ref())
    }
}

fn parse_locations(body: &[u8]) -> Result<Vec<Location>, GeocoderError> {
    let decoded: GeocodeResponseDto = serde_json::from_slice(body).map_err(|error| {
        GeocoderError::decode(format!("invalid geocoding JSON payload: {error}"))
    })?;

    match decoded.status.as_str() {
        STATUS_OK => decoded
            .results
            .into_iter()
            .map(|result| result.into_location())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|message| GeocoderError::decode(message)),
        STATUS_ZERO_RESULTS => {
            debug!("geocoder found no match");
            Ok(Vec::new())
        }
        other => Err(GeocoderError::rejected(
            other,
            decoded.error_message.unwrap_or_default(),
        )),
    }
}

fn map_transport_error(error: reqwest::Error) -> GeocoderError {
    // Request URLs carry the API key.
    let error = error.without_url();
    if error.is_timeout() {
        GeocoderError::timeout(error.to_string())
    } else {
        GeocoderError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> GeocoderError {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            GeocoderError::timeout(format!("status {}", status.as_u16()))
        }
        _ => GeocoderError::rejected(status.as_u16().to_string(), preview),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network geocoding helpers.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn ok_responses_decode_every_result_in_order() {
        let body = r#"{
            "status": "OK",
            "results": [
                {
                    "formatted_address": "Moab, UT 84532, USA",
                    "geometry": { "location": { "lat": 38.5733, "lng": -109.5498 } }
                },
                {
                    "formatted_address": "Moab, Somewhere Else",
                    "geometry": { "location": { "lat": 1.0, "lng": 2.0 } }
                }
            ]
        }"#;

        let locations = parse_locations(body.as_bytes()).expect("decodes");
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].address(), "Moab, UT 84532, USA");
        assert_eq!(locations[0].latitude(), 38.5733);
        assert_eq!(locations[0].longitude(), -109.5498);
    }

    #[rstest]
    fn zero_results_is_empty_not_an_error() {
        let body = r#"{ "status": "ZERO_RESULTS", "results": [] }"#;
        let locations = parse_locations(body.as_bytes()).expect("decodes");
        assert!(locations.is_empty());
    }

    #[rstest]
    fn denied_requests_are_rejected_with_the_service_message() {
        let body = r#"{ "status": "REQUEST_DENIED", "error_message": "The provided API key is invalid." }"#;
        let error = parse_locations(body.as_bytes()).expect_err("rejected");
        match error {
            GeocoderError::Rejected { status, message } => {
                assert_eq!(status, "REQUEST_DENIED");
                assert!(message.contains("API key"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[rstest]
    #[case::not_json("<html>")]
    #[case::missing_geometry(r#"{ "status": "OK", "results": [ { "formatted_address": "x" } ] }"#)]
    fn malformed_payloads_are_decode_errors(#[case] body: &str) {
        let error = parse_locations(body.as_bytes()).expect_err("decode failure");
        assert!(matches!(error, GeocoderError::Decode { .. }));
    }

    #[rstest]
    #[case(StatusCode::GATEWAY_TIMEOUT, true)]
    #[case(StatusCode::FORBIDDEN, false)]
    #[case(StatusCode::INTERNAL_SERVER_ERROR, false)]
    fn http_statuses_map_to_timeout_or_rejection(#[case] status: StatusCode, #[case] timeout: bool) {
        let error = map_status_error(status, b"  upstream \n unavailable ");
        if timeout {
            assert!(matches!(error, GeocoderError::Timeout { .. }));
        } else {
            let GeocoderError::Rejected { status: code, message } = error else {
                panic!("expected rejection");
            };
            assert_eq!(code, status.as_u16().to_string());
            assert_eq!(message, "upstream unavailable");
        }
    }
}
