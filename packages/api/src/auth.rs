//! Login and registration. These are the only unauthenticated calls.

use store::{Profile, Role};

use crate::client::{ApiClient, FormField, Request};
use crate::error::ApiError;
use crate::models::{Credentials, LoginResponse, Registration};

pub fn login_path(role: Role) -> &'static str {
    match role {
        Role::Owner => "/auth/clientlogin",
        Role::Walker => "/auth/walkerlogin",
    }
}

pub fn register_path(role: Role) -> &'static str {
    match role {
        Role::Owner => "/auth/clientregister",
        Role::Walker => "/auth/walkerregister",
    }
}

pub fn login(role: Role, credentials: &Credentials) -> Result<Request, ApiError> {
    let credentials = credentials.validate()?;
    Request::post(login_path(role)).public().json(&credentials)
}

/// Multipart registration; `priceHour` is only sent for walkers.
pub fn register(role: Role, form: &Registration) -> Result<Request, ApiError> {
    let form = form.validate()?;
    let mut fields = vec![
        FormField::Text {
            name: "name",
            value: form.name,
        },
        FormField::Text {
            name: "email",
            value: form.email,
        },
        FormField::Text {
            name: "password",
            value: form.password,
        },
    ];
    if role == Role::Walker {
        if let Some(price) = form.price_hour {
            fields.push(FormField::Text {
                name: "priceHour",
                value: price,
            });
        }
    }
    if let Some(photo) = form.photo {
        fields.push(FormField::File {
            name: "PhotoProfile",
            upload: photo,
        });
    }
    Ok(Request::post(register_path(role)).public().multipart(fields))
}

/// A successful login: what the session store needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Authenticated {
    pub token: String,
    pub profile: Option<Profile>,
}

impl ApiClient {
    pub async fn login(
        &self,
        role: Role,
        credentials: &Credentials,
    ) -> Result<Authenticated, ApiError> {
        let response: LoginResponse = self.call(login(role, credentials)?).await?;
        if response.token.trim().is_empty() {
            return Err(ApiError::Decode("login response carried no token".into()));
        }
        Ok(Authenticated {
            token: response.token,
            profile: response.user,
        })
    }

    pub async fn register(&self, role: Role, form: &Registration) -> Result<(), ApiError> {
        self.call_ack(register(role, form)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Payload;
    use crate::models::PhotoUpload;

    fn form() -> Registration {
        Registration {
            name: "Luis".into(),
            email: "luis@example.com".into(),
            password: "secret".into(),
            price_hour: Some("25".into()),
            photo: Some(PhotoUpload::new("me.png", vec![137, 80])),
        }
    }

    fn field_names(request: &Request) -> Vec<&'static str> {
        match &request.payload {
            Payload::Multipart(fields) => fields
                .iter()
                .map(|f| match f {
                    FormField::Text { name, .. } | FormField::File { name, .. } => *name,
                })
                .collect(),
            other => panic!("expected multipart, got {other:?}"),
        }
    }

    #[test]
    fn test_login_is_public_and_role_specific() {
        let credentials = Credentials {
            email: " ana@example.com ".into(),
            password: "pw".into(),
        };
        let request = login(Role::Owner, &credentials).unwrap();
        assert_eq!(request.path, "/auth/clientlogin");
        assert!(!request.authenticated);
        assert_eq!(
            request.payload,
            Payload::Json(serde_json::json!({"email": "ana@example.com", "password": "pw"}))
        );

        assert_eq!(
            login(Role::Walker, &credentials).unwrap().path,
            "/auth/walkerlogin"
        );
    }

    #[test]
    fn test_login_validates_before_sending() {
        let credentials = Credentials {
            email: "".into(),
            password: "pw".into(),
        };
        assert!(matches!(
            login(Role::Owner, &credentials),
            Err(ApiError::Invalid(_))
        ));
    }

    #[test]
    fn test_register_fields_per_role() {
        let walker = register(Role::Walker, &form()).unwrap();
        assert_eq!(walker.path, "/auth/walkerregister");
        assert_eq!(
            field_names(&walker),
            vec!["name", "email", "password", "priceHour", "PhotoProfile"]
        );

        let owner = register(Role::Owner, &form()).unwrap();
        assert_eq!(owner.path, "/auth/clientregister");
        assert_eq!(
            field_names(&owner),
            vec!["name", "email", "password", "PhotoProfile"]
        );
    }
}
