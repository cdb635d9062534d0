//! Geocoding client.
//!
//! Resolves a free-form address to coordinates through a Nominatim-style
//! `/search` endpoint. The service returns latitude/longitude as strings,
//! so parsing converts them explicitly.

use serde::Deserialize;
use tracing::debug;

use bottega_core::types::GeoPoint;

use super::ClientError;

const USER_AGENT: &str = concat!("bottega-api/", env!("CARGO_PKG_VERSION"));

/// Client for the external geocoding service.
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    http: reqwest::Client,
    base_url: String,
}

/// One search hit, as the service serializes it (coordinates are strings).
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

impl GeocodingClient {
    /// Creates a client against a base URL (the `/search` path is appended).
    ///
    /// The service requires an identifying User-Agent; requests without one
    /// get rejected.
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(GeocodingClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolves an address to coordinates.
    ///
    /// Returns `Ok(None)` when the service has no match for the query;
    /// that is not an error, the address is simply stored ungeocoded.
    pub async fn geocode(&self, address: &str) -> Result<Option<GeoPoint>, ClientError> {
        let url = format!("{}/search", self.base_url);
        debug!(%address, "Geocoding address");

        let response = self
            .http
            .get(&url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
            });
        }

        let hits: Vec<SearchHit> = response.json().await?;
        parse_first_hit(&hits)
    }
}

/// Converts the first hit's string coordinates to a GeoPoint.
fn parse_first_hit(hits: &[SearchHit]) -> Result<Option<GeoPoint>, ClientError> {
    let Some(hit) = hits.first() else {
        return Ok(None);
    };

    let latitude: f64 = hit.lat.parse().map_err(|_| {
        ClientError::UnexpectedResponse(format!("non-numeric latitude '{}'", hit.lat))
    })?;
    let longitude: f64 = hit.lon.parse().map_err(|_| {
        ClientError::UnexpectedResponse(format!("non-numeric longitude '{}'", hit.lon))
    })?;

    Ok(Some(GeoPoint {
        latitude,
        longitude,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_first_hit() {
        let hits: Vec<SearchHit> =
            serde_json::from_str(r#"[{"lat": "41.9027835", "lon": "12.4963655"}]"#).unwrap();
        let point = parse_first_hit(&hits).unwrap().unwrap();
        assert!((point.latitude - 41.9027835).abs() < 1e-9);
        assert!((point.longitude - 12.4963655).abs() < 1e-9);
    }

    #[test]
    fn test_parse_no_hits_is_none() {
        let hits: Vec<SearchHit> = vec![];
        assert!(parse_first_hit(&hits).unwrap().is_none());
    }

    #[test]
    fn test_parse_non_numeric_coordinates_rejected() {
        let hits = vec![SearchHit {
            lat: "nord".to_string(),
            lon: "12.5".to_string(),
        }];
        assert!(matches!(
            parse_first_hit(&hits),
            Err(ClientError::UnexpectedResponse(_))
        ));
    }
}
