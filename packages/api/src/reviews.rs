//! Reviews: left by owners on finished walks, listed by walkers.

use crate::client::{ApiClient, Request};
use crate::error::ApiError;
use crate::models::{Review, ReviewInput};

pub fn mine() -> Request {
    Request::get("/reviews")
}

pub fn get(id: i64) -> Request {
    Request::get(format!("/reviews/{id}"))
}

pub fn leave(walk_id: i64, input: &ReviewInput) -> Result<Request, ApiError> {
    Request::post(format!("/walks/{walk_id}/review")).json(&input.validate()?)
}

impl ApiClient {
    pub async fn my_reviews(&self) -> Result<Vec<Review>, ApiError> {
        self.call(mine()).await
    }

    pub async fn review(&self, id: i64) -> Result<Review, ApiError> {
        self.call(get(id)).await
    }

    pub async fn leave_review(&self, walk_id: i64, input: &ReviewInput) -> Result<(), ApiError> {
        self.call_ack(leave(walk_id, input)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Payload;

    #[test]
    fn test_leave_review_request() {
        let input = ReviewInput {
            rating: 4,
            comment: "on time".into(),
        };
        let request = leave(42, &input).unwrap();
        assert_eq!(request.path, "/walks/42/review");
        assert_eq!(
            request.payload,
            Payload::Json(serde_json::json!({"rating": 4, "comment": "on time"}))
        );

        let invalid = ReviewInput {
            rating: 6,
            comment: String::new(),
        };
        assert!(leave(42, &invalid).is_err());
    }

    #[test]
    fn test_review_list_decodes() {
        let reviews: Vec<Review> = serde_json::from_value(serde_json::json!([
            {
                "id": 1,
                "rating": 5,
                "comment": "great",
                "createdAt": "2024-01-02T10:00:00Z",
                "walk": {"id": 42, "pet": {"name": "Rocky"}, "owner": {"name": "Ana"}},
                "client": null
            }
        ]))
        .unwrap();
        assert_eq!(reviews[0].author(), Some("Ana"));
        assert_eq!(get(1).path, "/reviews/1");
    }
}
