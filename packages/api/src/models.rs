//! # Wire models, normalized at the API boundary
//!
//! The backend is loose about shapes: numeric columns sometimes arrive as
//! strings, nested relations may be `null`, and walker records name their
//! hourly price four different ways. Everything here deserializes leniently
//! so views can work with one canonical type per resource.
//!
//! | Type | Source | Notes |
//! |------|--------|-------|
//! | [`Pet`] / [`PetInput`] | `/pets` | input validated before sending |
//! | [`Walk`] / [`WalkStatus`] | `/walks/*` | unknown statuses become [`WalkStatus::Unknown`] |
//! | [`WalkLocation`], [`WalkPhoto`] | walk detail | coordinates accept numbers or numeric strings |
//! | [`WalkerProfile`] | `/walkers/*`, nested in walks | one `price_per_hour` |
//! | [`Review`] / [`ReviewInput`] | `/reviews`, `/walks/:id/review` | rating `1..=5` |
//! | [`NewWalk`] | `POST /walks` | built from form strings, `scheduledAt` in UTC |

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;
pub use store::Profile;

const PET_NAME_MAX: usize = 100;
const PET_TYPE_MAX: usize = 50;
const MIN_WALK_MINUTES: u32 = 10;

// ---------------------------------------------------------------------------
// Lenient field decoders
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s.trim().parse().map_err(de::Error::custom),
    }
}

fn lenient_opt_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrString::Text(s)) => s.trim().parse().map(Some).map_err(de::Error::custom),
    }
}

/// `null` and missing both mean "empty".
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Pets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Body of `POST /pets` and `PUT /pets/:id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PetInput {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub notes: String,
}

impl PetInput {
    pub fn from_pet(pet: &Pet) -> Self {
        Self {
            name: pet.name.clone(),
            kind: pet.kind.clone(),
            notes: pet.notes.clone().unwrap_or_default(),
        }
    }

    /// Trim fields and check the limits the backend enforces.
    pub fn validate(&self) -> Result<PetInput, ValidationError> {
        let name = self.name.trim();
        let kind = self.kind.trim();
        if name.is_empty() {
            return Err(ValidationError::Required("name"));
        }
        if name.chars().count() > PET_NAME_MAX {
            return Err(ValidationError::TooLong {
                field: "name",
                max: PET_NAME_MAX,
            });
        }
        if kind.is_empty() {
            return Err(ValidationError::Required("type"));
        }
        if kind.chars().count() > PET_TYPE_MAX {
            return Err(ValidationError::TooLong {
                field: "type",
                max: PET_TYPE_MAX,
            });
        }
        Ok(PetInput {
            name: name.to_string(),
            kind: kind.to_string(),
            notes: self.notes.trim().to_string(),
        })
    }
}

/// Pet as embedded in walks and reviews.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PetSummary {
    pub id: Option<i64>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub photo_url: Option<String>,
}

/// Owner or client as embedded in walks and reviews.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonSummary {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
}

// ---------------------------------------------------------------------------
// Walks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WalkStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
    InProgress,
    Finished,
    Unknown,
}

impl WalkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WalkStatus::Pending => "PENDING",
            WalkStatus::Accepted => "ACCEPTED",
            WalkStatus::Rejected => "REJECTED",
            WalkStatus::InProgress => "IN_PROGRESS",
            WalkStatus::Finished => "FINISHED",
            WalkStatus::Unknown => "UNKNOWN",
        }
    }

    /// Shown in the owner's "active" list.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            WalkStatus::Pending | WalkStatus::Accepted | WalkStatus::InProgress
        )
    }

    /// Shown in the owner's history.
    pub fn is_closed(&self) -> bool {
        matches!(self, WalkStatus::Rejected | WalkStatus::Finished)
    }

    /// A walker is on the way or walking; detail views refresh periodically.
    pub fn is_live(&self) -> bool {
        matches!(self, WalkStatus::Accepted | WalkStatus::InProgress)
    }

    pub fn can_respond(&self) -> bool {
        *self == WalkStatus::Pending
    }

    pub fn can_start(&self) -> bool {
        *self == WalkStatus::Accepted
    }

    pub fn can_end(&self) -> bool {
        *self == WalkStatus::InProgress
    }
}

impl From<String> for WalkStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "PENDING" => WalkStatus::Pending,
            "ACCEPTED" => WalkStatus::Accepted,
            "REJECTED" => WalkStatus::Rejected,
            "IN_PROGRESS" => WalkStatus::InProgress,
            "FINISHED" => WalkStatus::Finished,
            _ => WalkStatus::Unknown,
        }
    }
}

impl From<WalkStatus> for String {
    fn from(status: WalkStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for WalkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkLocation {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub lat: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub lng: f64,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkPhoto {
    #[serde(default)]
    pub id: Option<i64>,
    pub photo_url: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Walk {
    pub id: i64,
    #[serde(default)]
    pub status: WalkStatus,
    #[serde(default)]
    pub scheduled_at: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub pet: Option<PetSummary>,
    #[serde(default)]
    pub walker: Option<WalkerProfile>,
    #[serde(default, alias = "client")]
    pub owner: Option<PersonSummary>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub locations: Vec<WalkLocation>,
    #[serde(default)]
    pub review: Option<Review>,
}

impl Walk {
    pub fn pet_name(&self) -> &str {
        self.pet
            .as_ref()
            .and_then(|p| p.name.as_deref())
            .unwrap_or("-")
    }

    pub fn can_review(&self) -> bool {
        self.status == WalkStatus::Finished && self.review.is_none()
    }

    pub fn last_location(&self) -> Option<&WalkLocation> {
        self.locations.last()
    }
}

/// Body of `POST /walks`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWalk {
    pub pet_id: i64,
    pub scheduled_at: String,
    pub duration_minutes: u32,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub walker_id: Option<i64>,
}

/// Raw strings from the "request a walk" form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewWalkForm {
    pub pet_id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub duration_minutes: String,
    pub notes: String,
    pub walker_id: Option<i64>,
}

impl NewWalkForm {
    /// Interpret date and time in the browser's local zone.
    pub fn build(&self) -> Result<NewWalk, ValidationError> {
        self.build_in(&chrono::Local)
    }

    pub fn build_in<Tz: TimeZone>(&self, zone: &Tz) -> Result<NewWalk, ValidationError> {
        let pet_id = self.pet_id.trim();
        if pet_id.is_empty() {
            return Err(ValidationError::Required("pet"));
        }
        let pet_id: i64 = pet_id
            .parse()
            .map_err(|_| ValidationError::NotANumber("pet"))?;

        if self.date.trim().is_empty() {
            return Err(ValidationError::Required("date"));
        }
        if self.time.trim().is_empty() {
            return Err(ValidationError::Required("time"));
        }
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDateTime(self.date.clone()))?;
        let time = NaiveTime::parse_from_str(self.time.trim(), "%H:%M")
            .map_err(|_| ValidationError::InvalidDateTime(self.time.clone()))?;
        let local = zone
            .from_local_datetime(&NaiveDateTime::new(date, time))
            .earliest()
            .ok_or_else(|| {
                ValidationError::InvalidDateTime(format!("{} {}", self.date, self.time))
            })?;

        let duration_minutes: u32 = self
            .duration_minutes
            .trim()
            .parse()
            .map_err(|_| ValidationError::NotANumber("duration"))?;
        if duration_minutes < MIN_WALK_MINUTES {
            return Err(ValidationError::TooSmall {
                field: "duration",
                min: MIN_WALK_MINUTES as i64,
            });
        }

        Ok(NewWalk {
            pet_id,
            scheduled_at: local
                .with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            duration_minutes,
            notes: self.notes.trim().to_string(),
            walker_id: self.walker_id,
        })
    }
}

// ---------------------------------------------------------------------------
// Walkers
// ---------------------------------------------------------------------------

/// Walker record as the backend sends it, before normalization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawWalker {
    id: Option<i64>,
    name: Option<String>,
    email: Option<String>,
    photo_url: Option<String>,
    #[serde(deserialize_with = "lenient_opt_f64")]
    cost_per_hour: Option<f64>,
    #[serde(deserialize_with = "lenient_opt_f64")]
    hourly_rate: Option<f64>,
    #[serde(deserialize_with = "lenient_opt_f64")]
    price_hour: Option<f64>,
    #[serde(deserialize_with = "lenient_opt_f64")]
    price_per_hour: Option<f64>,
    #[serde(deserialize_with = "lenient_opt_f64")]
    avg_rating: Option<f64>,
    #[serde(deserialize_with = "lenient_opt_f64")]
    rating: Option<f64>,
    reviews_count: Option<u32>,
    #[serde(deserialize_with = "lenient_opt_f64")]
    distance_km: Option<f64>,
    is_available: Option<bool>,
}

/// A walker with one canonical price field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawWalker")]
pub struct WalkerProfile {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub price_per_hour: Option<f64>,
    pub avg_rating: Option<f64>,
    pub reviews_count: Option<u32>,
    pub distance_km: Option<f64>,
    pub is_available: Option<bool>,
}

impl From<RawWalker> for WalkerProfile {
    fn from(raw: RawWalker) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            email: raw.email,
            photo_url: raw.photo_url,
            price_per_hour: raw
                .cost_per_hour
                .or(raw.hourly_rate)
                .or(raw.price_hour)
                .or(raw.price_per_hour),
            avg_rating: raw.avg_rating.or(raw.rating),
            reviews_count: raw.reviews_count,
            distance_km: raw.distance_km,
            is_available: raw.is_available,
        }
    }
}

impl WalkerProfile {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("Walker")
    }
}

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewedWalk {
    pub id: Option<i64>,
    pub pet: Option<PetSummary>,
    pub owner: Option<PersonSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub walk: Option<ReviewedWalk>,
    #[serde(default)]
    pub client: Option<PersonSummary>,
}

impl Review {
    /// Who left the review: the client, else the walk's owner.
    pub fn author(&self) -> Option<&str> {
        self.client
            .as_ref()
            .and_then(|c| c.name.as_deref())
            .or_else(|| {
                self.walk
                    .as_ref()
                    .and_then(|w| w.owner.as_ref())
                    .and_then(|o| o.name.as_deref())
            })
    }
}

/// Body of `POST /walks/:id/review`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewInput {
    pub rating: u8,
    pub comment: String,
}

impl ReviewInput {
    pub fn validate(&self) -> Result<ReviewInput, ValidationError> {
        if !(1..=5).contains(&self.rating) {
            return Err(ValidationError::RatingOutOfRange);
        }
        Ok(ReviewInput {
            rating: self.rating,
            comment: self.comment.trim().to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn validate(&self) -> Result<Credentials, ValidationError> {
        let email = validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(ValidationError::Required("password"));
        }
        Ok(Credentials {
            email,
            password: self.password.clone(),
        })
    }
}

/// Body of a successful login: the token plus whichever profile key the
/// endpoint uses (`owner`, `walker`, `client` or `user`).
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default, alias = "accessToken", alias = "access_token")]
    pub token: String,
    #[serde(default, alias = "owner", alias = "walker", alias = "client")]
    pub user: Option<Profile>,
}

/// An image picked in a file input.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// MIME type from the file extension; `None` for non-images.
    pub fn mime(&self) -> Option<&'static str> {
        let ext = self.file_name.rsplit_once('.')?.1.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some("image/jpeg"),
            "png" => Some("image/png"),
            "gif" => Some("image/gif"),
            "webp" => Some("image/webp"),
            "heic" => Some("image/heic"),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.bytes.is_empty() {
            return Err(ValidationError::Required("photo"));
        }
        if self.mime().is_none() {
            return Err(ValidationError::NotAnImage(self.file_name.clone()));
        }
        Ok(())
    }
}

/// Registration form shared by both roles; `price_hour` is walker-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub price_hour: Option<String>,
    pub photo: Option<PhotoUpload>,
}

impl Registration {
    pub fn validate(&self) -> Result<Registration, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::Required("name"));
        }
        let email = validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(ValidationError::Required("password"));
        }
        let price_hour = match self.price_hour.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => {
                let price: f64 = raw
                    .parse()
                    .map_err(|_| ValidationError::NotANumber("price per hour"))?;
                if price < 0.0 {
                    return Err(ValidationError::TooSmall {
                        field: "price per hour",
                        min: 0,
                    });
                }
                Some(raw.to_string())
            }
        };
        if let Some(photo) = &self.photo {
            photo.validate()?;
        }
        Ok(Registration {
            name: name.to_string(),
            email,
            password: self.password.clone(),
            price_hour,
            photo: self.photo.clone(),
        })
    }
}

fn validate_email(raw: &str) -> Result<String, ValidationError> {
    let email = raw.trim();
    if email.is_empty() {
        return Err(ValidationError::Required("email"));
    }
    match email.split_once('@') {
        Some((user, domain)) if !user.is_empty() && domain.contains('.') => {
            Ok(email.to_string())
        }
        _ => Err(ValidationError::InvalidEmail(email.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Walker duty
// ---------------------------------------------------------------------------

/// Body of `POST /walkers/location` and `POST /walkers/nearby`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Body of `POST /walkers/availability`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityUpdate {
    pub is_available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use serde_json::json;

    #[test]
    fn test_walker_price_priority() {
        let w: WalkerProfile =
            serde_json::from_value(json!({"id": 1, "hourlyRate": 20, "priceHour": "15"})).unwrap();
        assert_eq!(w.price_per_hour, Some(20.0));

        let w: WalkerProfile =
            serde_json::from_value(json!({"id": 1, "costPerHour": "30.5", "hourlyRate": 20}))
                .unwrap();
        assert_eq!(w.price_per_hour, Some(30.5));

        let w: WalkerProfile =
            serde_json::from_value(json!({"id": 2, "pricePerHour": 12, "distanceKm": "1.25"}))
                .unwrap();
        assert_eq!(w.price_per_hour, Some(12.0));
        assert_eq!(w.distance_km, Some(1.25));

        let w: WalkerProfile = serde_json::from_value(json!({"id": 3, "priceHour": null})).unwrap();
        assert_eq!(w.price_per_hour, None);
    }

    #[test]
    fn test_walker_rating_falls_back() {
        let w: WalkerProfile =
            serde_json::from_value(json!({"name": "Luis", "rating": 4.5, "reviewsCount": 8}))
                .unwrap();
        assert_eq!(w.avg_rating, Some(4.5));
        assert_eq!(w.reviews_count, Some(8));
        assert_eq!(w.display_name(), "Luis");
    }

    #[test]
    fn test_walk_decodes_nested_and_lenient_fields() {
        let walk: Walk = serde_json::from_value(json!({
            "id": 42,
            "status": "IN_PROGRESS",
            "scheduledAt": "2024-01-01T10:00:00.000Z",
            "durationMinutes": 60,
            "pet": {"id": 1, "name": "Rocky", "photoUrl": "rocky.jpg"},
            "walker": {"id": 3, "name": "Luis", "priceHour": "25"},
            "locations": [
                {"id": 1, "lat": "-17.78", "lng": -63.18, "timestamp": "2024-01-01T10:05:00Z"}
            ],
            "review": null
        }))
        .unwrap();

        assert_eq!(walk.status, WalkStatus::InProgress);
        assert!(walk.status.is_live());
        assert_eq!(walk.pet_name(), "Rocky");
        assert_eq!(walk.walker.as_ref().unwrap().price_per_hour, Some(25.0));
        assert_eq!(walk.last_location().unwrap().lat, -17.78);
        assert!(!walk.can_review());
    }

    #[test]
    fn test_walk_tolerates_null_locations_and_unknown_status() {
        let walk: Walk =
            serde_json::from_value(json!({"id": 7, "status": "CANCELLED", "locations": null}))
                .unwrap();
        assert_eq!(walk.status, WalkStatus::Unknown);
        assert!(walk.locations.is_empty());
        assert!(!walk.status.is_active() && !walk.status.is_closed());
    }

    #[test]
    fn test_review_only_when_finished_and_unreviewed() {
        let finished: Walk =
            serde_json::from_value(json!({"id": 1, "status": "FINISHED"})).unwrap();
        assert!(finished.can_review());

        let reviewed: Walk = serde_json::from_value(
            json!({"id": 1, "status": "FINISHED", "review": {"id": 9, "rating": 5}}),
        )
        .unwrap();
        assert!(!reviewed.can_review());
    }

    #[test]
    fn test_status_partition() {
        use WalkStatus::*;
        let active: Vec<_> = [Pending, Accepted, Rejected, InProgress, Finished]
            .into_iter()
            .filter(WalkStatus::is_active)
            .collect();
        assert_eq!(active, vec![Pending, Accepted, InProgress]);
        assert!(Rejected.is_closed() && Finished.is_closed());
        assert!(Accepted.can_start() && !Pending.can_start());
        assert!(InProgress.can_end() && !Accepted.can_end());
    }

    #[test]
    fn test_new_walk_form_converts_to_utc() {
        let form = NewWalkForm {
            pet_id: "1".into(),
            date: "2024-01-01".into(),
            time: "10:00".into(),
            duration_minutes: "60".into(),
            notes: "  ".into(),
            walker_id: None,
        };
        let walk = form.build_in(&Utc).unwrap();
        assert_eq!(walk.scheduled_at, "2024-01-01T10:00:00.000Z");
        assert_eq!(walk.notes, "");

        let bolivia = FixedOffset::west_opt(4 * 3600).unwrap();
        let walk = form.build_in(&bolivia).unwrap();
        assert_eq!(walk.scheduled_at, "2024-01-01T14:00:00.000Z");

        let body = serde_json::to_value(&walk).unwrap();
        assert_eq!(body["petId"], 1);
        assert_eq!(body["durationMinutes"], 60);
        assert!(body.get("walkerId").is_none());
    }

    #[test]
    fn test_new_walk_form_rejects_bad_input() {
        let valid = NewWalkForm {
            pet_id: "1".into(),
            date: "2024-01-01".into(),
            time: "10:00".into(),
            duration_minutes: "30".into(),
            notes: String::new(),
            walker_id: Some(3),
        };

        let short = NewWalkForm {
            duration_minutes: "5".into(),
            ..valid.clone()
        };
        assert_eq!(
            short.build_in(&Utc),
            Err(ValidationError::TooSmall {
                field: "duration",
                min: 10
            })
        );

        let no_pet = NewWalkForm {
            pet_id: "".into(),
            ..valid.clone()
        };
        assert_eq!(no_pet.build_in(&Utc), Err(ValidationError::Required("pet")));

        let bad_time = NewWalkForm {
            time: "25:99".into(),
            ..valid.clone()
        };
        assert!(matches!(
            bad_time.build_in(&Utc),
            Err(ValidationError::InvalidDateTime(_))
        ));

        assert_eq!(valid.build_in(&Utc).unwrap().walker_id, Some(3));
    }

    #[test]
    fn test_pet_input_limits() {
        let ok = PetInput {
            name: "  Rocky ".into(),
            kind: "Perro".into(),
            notes: "".into(),
        };
        assert_eq!(ok.validate().unwrap().name, "Rocky");

        let long = PetInput {
            name: "x".repeat(101),
            ..ok.clone()
        };
        assert_eq!(
            long.validate(),
            Err(ValidationError::TooLong {
                field: "name",
                max: 100
            })
        );

        let no_type = PetInput {
            kind: " ".into(),
            ..ok
        };
        assert_eq!(no_type.validate(), Err(ValidationError::Required("type")));
    }

    #[test]
    fn test_review_input_range() {
        let review = ReviewInput {
            rating: 0,
            comment: String::new(),
        };
        assert_eq!(review.validate(), Err(ValidationError::RatingOutOfRange));
        let review = ReviewInput {
            rating: 5,
            comment: " great ".into(),
        };
        assert_eq!(review.validate().unwrap().comment, "great");
    }

    #[test]
    fn test_login_response_profile_aliases() {
        let owner: LoginResponse =
            serde_json::from_value(json!({"token": "T2", "owner": {"id": 7, "name": "Ana"}}))
                .unwrap();
        assert_eq!(owner.token, "T2");
        assert_eq!(owner.user.unwrap().name.as_deref(), Some("Ana"));

        let walker: LoginResponse = serde_json::from_value(
            json!({"token": "T1", "walker": {"id": 3, "name": "Luis", "photoUrl": "l.png"}}),
        )
        .unwrap();
        let profile = walker.user.unwrap();
        assert_eq!(profile.id, Some(3));
        assert_eq!(profile.photo_url(), Some("l.png"));
    }

    #[test]
    fn test_registration_validation() {
        let form = Registration {
            name: "Luis".into(),
            email: "luis@example.com".into(),
            password: "secret".into(),
            price_hour: Some(" 25 ".into()),
            photo: None,
        };
        assert_eq!(form.validate().unwrap().price_hour.as_deref(), Some("25"));

        let bad_email = Registration {
            email: "luis".into(),
            ..form.clone()
        };
        assert!(matches!(
            bad_email.validate(),
            Err(ValidationError::InvalidEmail(_))
        ));

        let bad_price = Registration {
            price_hour: Some("cheap".into()),
            ..form.clone()
        };
        assert_eq!(
            bad_price.validate(),
            Err(ValidationError::NotANumber("price per hour"))
        );

        let bad_photo = Registration {
            photo: Some(PhotoUpload::new("notes.txt", vec![1, 2, 3])),
            ..form
        };
        assert!(matches!(
            bad_photo.validate(),
            Err(ValidationError::NotAnImage(_))
        ));
    }
}
