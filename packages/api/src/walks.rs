//! Walk lifecycle, from both sides.
//!
//! Owners list, create and inspect walks under `/walks`; walkers read their
//! queues (`pending`, `accepted`, `history`), move a walk through
//! `accept`/`reject`/`start`/`end`, and attach photos.

use std::fmt;

use crate::client::{ApiClient, FormField, Request};
use crate::error::ApiError;
use crate::models::{NewWalk, PhotoUpload, Walk, WalkPhoto};

/// Walker-side transitions, each a `POST /walks/:id/<action>` with `{}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkAction {
    Accept,
    Reject,
    Start,
    End,
}

impl WalkAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            WalkAction::Accept => "accept",
            WalkAction::Reject => "reject",
            WalkAction::Start => "start",
            WalkAction::End => "end",
        }
    }
}

impl fmt::Display for WalkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three lists a walker works from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkerQueue {
    Pending,
    Accepted,
    History,
}

impl WalkerQueue {
    fn path(&self) -> &'static str {
        match self {
            WalkerQueue::Pending => "/walks/pending",
            WalkerQueue::Accepted => "/walks/accepted",
            WalkerQueue::History => "/walks/history",
        }
    }
}

pub fn list() -> Request {
    Request::get("/walks")
}

pub fn detail(id: i64) -> Request {
    Request::get(format!("/walks/{id}"))
}

pub fn walker_detail(id: i64) -> Request {
    Request::get(format!("/walks/walker/{id}"))
}

pub fn photos(id: i64) -> Request {
    Request::get(format!("/walks/{id}/photos"))
}

pub fn create(walk: &NewWalk) -> Result<Request, ApiError> {
    Request::post("/walks").json(walk)
}

pub fn queue(queue: WalkerQueue) -> Request {
    Request::get(queue.path())
}

pub fn transition(id: i64, action: WalkAction) -> Result<Request, ApiError> {
    Request::post(format!("/walks/{id}/{action}")).json(&serde_json::json!({}))
}

pub fn upload_photo(id: i64, photo: PhotoUpload) -> Result<Request, ApiError> {
    photo.validate()?;
    Ok(Request::post(format!("/walks/{id}/photo")).multipart(vec![FormField::File {
        name: "photo",
        upload: photo,
    }]))
}

impl ApiClient {
    pub async fn owner_walks(&self) -> Result<Vec<Walk>, ApiError> {
        self.call(list()).await
    }

    pub async fn walk(&self, id: i64) -> Result<Walk, ApiError> {
        self.call(detail(id)).await
    }

    pub async fn walker_walk(&self, id: i64) -> Result<Walk, ApiError> {
        self.call(walker_detail(id)).await
    }

    pub async fn walk_photos(&self, id: i64) -> Result<Vec<WalkPhoto>, ApiError> {
        self.call(photos(id)).await
    }

    pub async fn create_walk(&self, walk: &NewWalk) -> Result<Walk, ApiError> {
        let created: Walk = self.call(create(walk)?).await?;
        tracing::info!(walk_id = created.id, "walk requested");
        Ok(created)
    }

    pub async fn walker_queue(&self, which: WalkerQueue) -> Result<Vec<Walk>, ApiError> {
        self.call(queue(which)).await
    }

    pub async fn walk_transition(&self, id: i64, action: WalkAction) -> Result<(), ApiError> {
        self.call_ack(transition(id, action)?).await
    }

    pub async fn upload_walk_photo(&self, id: i64, photo: PhotoUpload) -> Result<(), ApiError> {
        self.call_ack(upload_photo(id, photo)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Payload;
    use crate::models::WalkStatus;
    use reqwest::Method;

    #[test]
    fn test_create_then_address_new_walk() {
        let walk = NewWalk {
            pet_id: 1,
            scheduled_at: "2024-01-01T10:00:00Z".into(),
            duration_minutes: 60,
            notes: String::new(),
            walker_id: None,
        };
        let request = create(&walk).unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/walks");
        assert_eq!(
            request.payload,
            Payload::Json(serde_json::json!({
                "petId": 1,
                "scheduledAt": "2024-01-01T10:00:00Z",
                "durationMinutes": 60,
                "notes": ""
            }))
        );

        let created: Walk = serde_json::from_value(serde_json::json!({
            "id": 42,
            "status": "PENDING",
            "petId": 1,
            "scheduledAt": "2024-01-01T10:00:00Z",
            "durationMinutes": 60
        }))
        .unwrap();
        assert_eq!(created.id, 42);
        assert_eq!(created.status, WalkStatus::Pending);
        assert_eq!(detail(created.id).path, "/walks/42");
    }

    #[test]
    fn test_walker_paths() {
        assert_eq!(queue(WalkerQueue::Pending).path, "/walks/pending");
        assert_eq!(queue(WalkerQueue::History).path, "/walks/history");
        assert_eq!(walker_detail(9).path, "/walks/walker/9");
        assert_eq!(photos(9).path, "/walks/9/photos");

        let start = transition(9, WalkAction::Start).unwrap();
        assert_eq!(start.path, "/walks/9/start");
        assert_eq!(start.payload, Payload::Json(serde_json::json!({})));
        assert_eq!(
            upload_photo(9, PhotoUpload::new("walk.png", vec![1])).unwrap().path,
            "/walks/9/photo"
        );
    }
}
