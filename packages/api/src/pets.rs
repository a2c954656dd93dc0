//! Owner pet CRUD and photo upload.

use crate::client::{ApiClient, FormField, Request};
use crate::error::ApiError;
use crate::models::{Pet, PetInput, PhotoUpload};

pub fn list() -> Request {
    Request::get("/pets")
}

pub fn create(input: &PetInput) -> Result<Request, ApiError> {
    Request::post("/pets").json(&input.validate()?)
}

pub fn update(id: i64, input: &PetInput) -> Result<Request, ApiError> {
    Request::put(format!("/pets/{id}")).json(&input.validate()?)
}

pub fn delete(id: i64) -> Request {
    Request::delete(format!("/pets/{id}"))
}

pub fn upload_photo(id: i64, photo: PhotoUpload) -> Result<Request, ApiError> {
    photo.validate()?;
    Ok(Request::post(format!("/pets/{id}/photo")).multipart(vec![FormField::File {
        name: "photo",
        upload: photo,
    }]))
}

impl ApiClient {
    pub async fn list_pets(&self) -> Result<Vec<Pet>, ApiError> {
        self.call(list()).await
    }

    /// There is no single-pet endpoint; look it up in the owner's list.
    pub async fn find_pet(&self, id: i64) -> Result<Option<Pet>, ApiError> {
        Ok(self.list_pets().await?.into_iter().find(|p| p.id == id))
    }

    pub async fn create_pet(&self, input: &PetInput) -> Result<Pet, ApiError> {
        self.call(create(input)?).await
    }

    pub async fn update_pet(&self, id: i64, input: &PetInput) -> Result<Pet, ApiError> {
        self.call(update(id, input)?).await
    }

    pub async fn delete_pet(&self, id: i64) -> Result<(), ApiError> {
        self.call_ack(delete(id)).await
    }

    pub async fn upload_pet_photo(&self, id: i64, photo: PhotoUpload) -> Result<(), ApiError> {
        self.call_ack(upload_photo(id, photo)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Payload;
    use reqwest::Method;

    #[test]
    fn test_pet_requests() {
        let input = PetInput {
            name: "Rocky".into(),
            kind: "Perro".into(),
            notes: "friendly".into(),
        };

        let request = update(5, &input).unwrap();
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.path, "/pets/5");
        assert!(request.authenticated);
        assert_eq!(
            request.payload,
            Payload::Json(serde_json::json!({"name": "Rocky", "type": "Perro", "notes": "friendly"}))
        );

        assert_eq!(delete(5).method, Method::DELETE);
        assert!(create(&PetInput::default()).is_err());
    }

    #[test]
    fn test_photo_upload_uses_photo_field() {
        let request = upload_photo(5, PhotoUpload::new("rocky.JPG", vec![1, 2])).unwrap();
        assert_eq!(request.path, "/pets/5/photo");
        assert!(matches!(
            &request.payload,
            Payload::Multipart(fields) if matches!(fields[0], FormField::File { name: "photo", .. })
        ));
        assert!(upload_photo(5, PhotoUpload::new("rocky.jpg", vec![])).is_err());
    }
}
