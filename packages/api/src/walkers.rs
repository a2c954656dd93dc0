//! Walker discovery (owner side) and walker duty calls.

use crate::client::{ApiClient, Request};
use crate::duty::AvailabilityApi;
use crate::error::ApiError;
use crate::location::{Coordinates, LocationSample};
use crate::models::{AvailabilityUpdate, LatLng, WalkerProfile};
use crate::reporter::LocationSink;

pub fn nearby(at: Coordinates) -> Result<Request, ApiError> {
    Request::post("/walkers/nearby").json(&LatLng::from(at))
}

pub fn get(id: i64) -> Request {
    Request::get(format!("/walkers/{id}"))
}

pub fn availability(is_available: bool) -> Result<Request, ApiError> {
    Request::post("/walkers/availability").json(&AvailabilityUpdate { is_available })
}

pub fn location(sample: &LocationSample) -> Result<Request, ApiError> {
    Request::post("/walkers/location").json(&LatLng::from(sample.coords))
}

impl From<Coordinates> for LatLng {
    fn from(c: Coordinates) -> Self {
        LatLng {
            lat: c.latitude,
            lng: c.longitude,
        }
    }
}

impl ApiClient {
    pub async fn nearby_walkers(&self, at: Coordinates) -> Result<Vec<WalkerProfile>, ApiError> {
        self.call(nearby(at)?).await
    }

    pub async fn walker(&self, id: i64) -> Result<WalkerProfile, ApiError> {
        self.call(get(id)).await
    }

    pub async fn set_walker_availability(&self, is_available: bool) -> Result<(), ApiError> {
        self.call_ack(availability(is_available)?).await
    }

    pub async fn report_walker_location(&self, sample: &LocationSample) -> Result<(), ApiError> {
        self.call_ack(location(sample)?).await
    }
}

impl LocationSink for ApiClient {
    type Error = ApiError;

    async fn report_location(&self, sample: &LocationSample) -> Result<(), ApiError> {
        self.report_walker_location(sample).await
    }
}

impl AvailabilityApi for ApiClient {
    type Error = ApiError;

    async fn update_availability(&self, available: bool) -> Result<(), ApiError> {
        self.set_walker_availability(available).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Payload;

    #[test]
    fn test_duty_payloads() {
        assert_eq!(
            availability(true).unwrap().payload,
            Payload::Json(serde_json::json!({"isAvailable": true}))
        );

        let sample = LocationSample::now(Coordinates::new(-17.78, -63.18));
        let request = location(&sample).unwrap();
        assert_eq!(request.path, "/walkers/location");
        assert_eq!(
            request.payload,
            Payload::Json(serde_json::json!({"lat": -17.78, "lng": -63.18}))
        );
    }

    #[test]
    fn test_nearby_walkers_decode_with_distance() {
        let request = nearby(Coordinates::new(-17.7833, -63.1833)).unwrap();
        assert_eq!(request.path, "/walkers/nearby");

        let walkers: Vec<WalkerProfile> = serde_json::from_value(serde_json::json!([
            {"id": 3, "name": "Luis", "pricePerHour": "20", "distanceKm": 0.8, "avgRating": 4.7}
        ]))
        .unwrap();
        assert_eq!(walkers[0].price_per_hour, Some(20.0));
        assert_eq!(walkers[0].distance_km, Some(0.8));
        assert_eq!(get(3).path, "/walkers/3");
    }
}
