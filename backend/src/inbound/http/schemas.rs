//! Request and response bodies owned by the HTTP adapter.
//!
//! Domain entities serialise themselves; the types here cover wire shapes
//! that only exist at the edge: form posts, query strings and the inline
//! base64 image carried by quest drafts.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Booking, Error, ImageUpload, Quest, QuestDraft, QuestFields, RawQuestQuery, business,
};

const DEFAULT_PRICE: i32 = 2000;
const DEFAULT_PLAYERS: i32 = 1;

fn default_organizer_email() -> Option<String> {
    Some(business::EMAIL.to_owned())
}

const fn default_price() -> i32 {
    DEFAULT_PRICE
}

const fn default_players() -> i32 {
    DEFAULT_PLAYERS
}

/// Image attached to a quest draft.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    /// Client-side filename; only its extension is used.
    #[schema(example = "poster.png")]
    pub filename: String,
    /// Standard base64 of the file contents.
    pub content_base64: String,
}

impl ImagePayload {
    fn decode(&self) -> Result<ImageUpload, Error> {
        let bytes = STANDARD.decode(self.content_base64.trim()).map_err(|_| {
            Error::invalid_request("image content is not valid base64")
                .with_details(json!({ "field": "image" }))
        })?;
        Ok(ImageUpload::new(&self.filename, bytes)?)
    }
}

/// Body of `POST /api/v1/admin/quests` and `PUT /api/v1/admin/quests/{id}`.
///
/// Omitted fields take the admin form defaults.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestDraftRequest {
    #[schema(example = "The Cursed Manor")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_organizer_email")]
    #[schema(example = "alibi@mail.ru")]
    pub organizer_email: Option<String>,
    #[serde(default = "default_price")]
    #[schema(example = 2000)]
    pub price: i32,
    #[serde(default)]
    #[schema(example = json!(["horror", "mystic"]))]
    pub genres: Vec<String>,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub fear_level: i32,
    #[serde(default = "default_players")]
    pub players: i32,
    #[serde(default)]
    pub image: Option<ImagePayload>,
}

impl QuestDraftRequest {
    /// Validate the attributes and decode the image.
    pub fn into_parts(self) -> Result<(QuestDraft, Option<ImageUpload>), Error> {
        let image = self.image.as_ref().map(ImagePayload::decode).transpose()?;
        let draft = QuestDraft::try_from(QuestFields {
            title: self.title,
            description: self.description,
            genres: self.genres,
            difficulty: self.difficulty,
            fear_level: self.fear_level,
            players: self.players,
            price: self.price,
            organizer_email: self.organizer_email,
        })?;
        Ok((draft, image))
    }
}

/// OpenAPI shape of `pagination::Page<Quest>`.
#[derive(ToSchema)]
#[schema(as = QuestPage, rename_all = "camelCase")]
#[expect(dead_code, reason = "used only for OpenAPI schema generation")]
pub struct QuestPageSchema {
    items: Vec<Quest>,
    skip: u64,
    limit: u32,
    has_more: bool,
}

/// Catalogue query string. Every value is optional and lenient.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuestListParams {
    /// Case-insensitive title substring.
    pub q: Option<String>,
    /// Comma-separated tags; a quest must carry all of them.
    #[param(example = "horror,mystic")]
    pub genre: Option<String>,
    /// Comma-separated labels; a quest must match one.
    pub difficulty: Option<String>,
    /// Minimum fear level.
    pub fear_level: Option<String>,
    /// Maximum players.
    pub players: Option<String>,
    /// `title_asc`, `title_desc`, `newest`, `oldest`, `price_low` or `price_high`.
    pub sort: Option<String>,
    pub skip: Option<String>,
    pub limit: Option<String>,
}

impl From<QuestListParams> for RawQuestQuery {
    fn from(params: QuestListParams) -> Self {
        Self {
            q: params.q,
            genre: params.genre,
            difficulty: params.difficulty,
            fear_level: params.fear_level,
            players: params.players,
            sort: params.sort,
            skip: params.skip,
            limit: params.limit,
        }
    }
}

/// Parse a numeric id carried as text, naming the field on failure.
pub(crate) fn parse_id(field: &str, raw: Option<&str>) -> Result<i64, Error> {
    let value = raw.map(str::trim).filter(|v| !v.is_empty()).ok_or_else(|| {
        Error::invalid_request(format!("{field} is required"))
            .with_details(json!({ "field": field }))
    })?;
    value.parse().map_err(|_| {
        Error::invalid_request(format!("{field} must be an integer"))
            .with_details(json!({ "field": field }))
    })
}

/// `GET /api/v1/available-slots` parameters.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailableSlotsQuery {
    #[param(value_type = i64, example = 3)]
    pub quest_id: Option<String>,
    /// `YYYY-MM-DD`.
    #[param(example = "2026-05-01")]
    pub date: Option<String>,
}

/// `GET /api/v1/admin/bookings` parameters.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminBookingsQuery {
    /// Restrict to one quest.
    #[param(value_type = Option<i64>)]
    pub quest_id: Option<String>,
}

/// `GET /api/v1/admin/reports/bookings` parameters.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// `csv` (default) or `json`.
    #[param(example = "csv")]
    pub format: Option<String>,
}

/// URL-encoded booking form.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct BookingForm {
    #[serde(default)]
    #[schema(example = "3")]
    pub quest_id: String,
    #[serde(default)]
    #[schema(example = "2026-05-01")]
    pub date: String,
    #[serde(default)]
    #[schema(example = "18:00")]
    pub timeslot: String,
}

/// Outcome of `POST /api/v1/bookings`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<Booking>,
}

/// `POST /api/v1/login` body.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "alice")]
    pub username: String,
    pub password: String,
}

/// `POST /api/v1/register` body.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "alice")]
    pub username: String,
    #[serde(default)]
    #[schema(example = "alice@example.com")]
    pub email: Option<String>,
    pub password: String,
}

/// `POST /api/v1/documents/statement` body.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct StatementBody {
    #[schema(example = "Ivan Petrov")]
    pub full_name: String,
    #[schema(example = "4510")]
    pub passport_series: String,
    #[schema(example = "123456")]
    pub passport_number: String,
    #[schema(example = "The Cursed Manor")]
    pub quest_title: String,
}

/// `POST /api/v1/documents/receipt` body.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptBody {
    #[serde(default)]
    pub quest_title: String,
    #[schema(example = 2000)]
    pub quest_price: i64,
}

/// Number of rows removed by a bulk delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedBookings {
    pub deleted_bookings: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn draft_defaults_follow_the_admin_form() {
        let request: QuestDraftRequest =
            serde_json::from_value(json!({ "title": "Manor", "genres": ["horror"] }))
                .expect("minimal draft");
        let (draft, image) = request.into_parts().expect("valid draft");

        assert!(image.is_none());
        assert_eq!(draft.price(), 2000);
        assert_eq!(draft.players(), 1);
        assert_eq!(draft.fear_level(), 0);
        assert_eq!(draft.description(), "");
        assert_eq!(draft.organizer_email(), Some("alibi@mail.ru"));
    }

    #[rstest]
    fn explicit_null_organizer_email_clears_it() {
        let request: QuestDraftRequest = serde_json::from_value(
            json!({ "title": "Manor", "genres": ["horror"], "organizerEmail": null }),
        )
        .expect("draft");
        let (draft, _) = request.into_parts().expect("valid draft");
        assert_eq!(draft.organizer_email(), None);
    }

    #[rstest]
    fn image_is_decoded() {
        let request: QuestDraftRequest = serde_json::from_value(json!({
            "title": "Manor",
            "genres": ["horror"],
            "image": { "filename": "poster.PNG", "contentBase64": "AQID" }
        }))
        .expect("draft");
        let (_, image) = request.into_parts().expect("valid draft");
        let image = image.expect("image present");
        assert_eq!(image.extension(), "png");
        assert_eq!(image.bytes(), &[1, 2, 3]);
    }

    #[rstest]
    #[case(json!({ "filename": "poster.png", "contentBase64": "***" }))]
    #[case(json!({ "filename": "notes.txt", "contentBase64": "AQID" }))]
    fn bad_images_name_the_field(#[case] image: serde_json::Value) {
        let request: QuestDraftRequest = serde_json::from_value(
            json!({ "title": "Manor", "genres": ["horror"], "image": image }),
        )
        .expect("draft");
        let err = request.into_parts().expect_err("invalid image");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.details(), Some(&json!({ "field": "image" })));
    }

    #[rstest]
    #[case(Some("12"), Ok(12))]
    #[case(Some(" 7 "), Ok(7))]
    #[case(Some("x"), Err("quest_id must be an integer"))]
    #[case(None, Err("quest_id is required"))]
    #[case(Some("  "), Err("quest_id is required"))]
    fn ids_are_parsed_leniently(#[case] raw: Option<&str>, #[case] expected: Result<i64, &str>) {
        let result = parse_id("quest_id", raw).map_err(|err| err.message().to_owned());
        assert_eq!(result, expected.map_err(str::to_owned));
    }

    #[rstest]
    fn outcome_omits_missing_booking() {
        let value = serde_json::to_value(BookingOutcome {
            success: false,
            message: "taken".to_owned(),
            booking: None,
        })
        .expect("serialise outcome");
        assert_eq!(value, json!({ "success": false, "message": "taken" }));
    }
}
