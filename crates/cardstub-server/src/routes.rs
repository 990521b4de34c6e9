// SPDX-License-Identifier: BUSL-1.1
//! Route definitions for the card API stub.
//!
//! Handlers are thin translators: validate credentials, validate or derive
//! identifiers, perform one store operation, serialize the entity. Each
//! request is a single transaction; there is no cross-request state beyond
//! the stores themselves.

use axum::{
    extract::{DefaultBodyLimit, Path, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use cardstub_core::{identifier, Position, ValidationError};

use crate::error::ApiError;
use crate::extract::Values;
use crate::ingest;
use crate::model::{AttachmentDraft, CardDraft};
use crate::store::{AppState, StateSnapshot};

/// Body budget for attachment uploads; all other routes keep the app-wide
/// default.
const ATTACHMENT_BODY_LIMIT: usize = 64 * 1024 * 1024;

/// Build the complete router with all card API stub routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(health))
        // Cards
        .route("/1/cards", post(create_card))
        .route("/1/cards/:cardid/idLabels", post(add_label))
        .route(
            "/1/cards/:cardid/attachments",
            post(add_attachment).layer(DefaultBodyLimit::max(ATTACHMENT_BODY_LIMIT)),
        )
        .route("/1/lists/:listid/cards", get(list_cards))
        // Debug state dump — unauthenticated, for test harnesses.
        .route("/__get_state", get(get_state))
        .with_state(state)
}

// ── Health ──────────────────────────────────────────────────────────

async fn health() -> StatusCode {
    StatusCode::OK
}

// ── Cards ───────────────────────────────────────────────────────────

async fn create_card(
    State(state): State<AppState>,
    values: Values,
) -> Result<Response, ApiError> {
    values.check_credentials()?;

    let id_list = values
        .get("idList")
        .ok_or(ValidationError::MissingValue("idList"))?;
    identifier::ensure_hex_id(id_list, "idList")?;

    let position: Position = match values.get("pos") {
        Some(raw) => raw.parse()?,
        None => Position::default(),
    };

    let draft = CardDraft {
        name: values.get("name").unwrap_or_default().to_string(),
        desc: values.get("desc").unwrap_or_default().to_string(),
        address: values.get("address").map(str::to_string),
        coordinates: values.get("coordinates").map(str::to_string),
        location_name: values.get("locationName").map(str::to_string),
        due: values.get("due").map(str::to_string),
        due_reminder: values.get("dueComplete").map(str::to_string),
        id_labels: split_ids(values.get("idLabels")),
        id_members: split_ids(values.get("idMembers")),
        url: values.get("urlSource").unwrap_or_default().to_string(),
    };

    let card = state.create_card(id_list, position, draft);
    Ok(Json(card).into_response())
}

/// Comma-separated identifier sequences, as the upstream accepts them.
fn split_ids(raw: Option<&str>) -> Vec<String> {
    raw.map(|joined| {
        joined
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

async fn add_label(
    State(state): State<AppState>,
    Path(cardid): Path<String>,
    values: Values,
) -> Result<Response, ApiError> {
    values.check_credentials()?;
    identifier::ensure_hex_id(&cardid, "cardid")?;

    let label = values
        .get("value")
        .ok_or(ValidationError::UnusableValue("value"))?;

    // Stored identifiers are lowercase; the path segment may not be.
    let labels = state
        .append_label(&cardid.to_ascii_lowercase(), label.to_string())
        .ok_or(ValidationError::UnusableValue("value"))?;

    Ok(Json(labels).into_response())
}

async fn add_attachment(
    State(state): State<AppState>,
    Path(cardid): Path<String>,
    req: Request,
) -> Result<Response, ApiError> {
    // Credentials may arrive as multipart fields, so the body is read
    // before the guard runs; no store is touched until both checks pass.
    let (values, upload) = ingest::read_attachment_request(req).await?;
    values.check_credentials()?;
    identifier::ensure_hex_id(&cardid, "cardid")?;

    let (intrinsic_mime, intrinsic_name) = upload
        .as_ref()
        .map(|u| (u.mime_type.clone(), u.file_name.clone()))
        .unwrap_or_default();
    let draft = AttachmentDraft {
        bytes: upload.as_ref().map(|u| u.bytes),
        chksum: upload.map(|u| u.chksum),
        mime_type: values
            .get("mimeType")
            .map(str::to_string)
            .unwrap_or(intrinsic_mime),
        name: values
            .get("name")
            .map(str::to_string)
            .unwrap_or(intrinsic_name),
    };

    let attachment = state.append_attachment(&cardid, draft);

    // The checksum is internal: visible in the state dump, never in the
    // endpoint response.
    let mut body = serde_json::to_value(&attachment)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    if let Some(map) = body.as_object_mut() {
        map.remove("chksum");
    }
    Ok(Json(body).into_response())
}

// ── Lists ───────────────────────────────────────────────────────────

async fn list_cards(
    State(state): State<AppState>,
    Path(listid): Path<String>,
    values: Values,
) -> Result<Response, ApiError> {
    values.check_credentials()?;
    Ok(Json(state.cards_in_list(&listid)).into_response())
}

// ── Debug ───────────────────────────────────────────────────────────

async fn get_state(State(state): State<AppState>) -> Json<StateSnapshot> {
    Json(state.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    const KEY: &str = "0123456789abcdef0123456789abcdef";
    const TOKEN: &str =
        "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";
    const LIST: &str = "aaaaaaaaaaaaaaaaaaaaaaaa";

    fn test_app() -> Router {
        router(AppState::new())
    }

    fn creds() -> String {
        format!("key={KEY}&token={TOKEN}")
    }

    async fn body_json(resp: Response) -> Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn post_form(app: &Router, uri: &str, form: &str) -> Response {
        let req = axum::http::Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        app.clone().oneshot(req).await.unwrap()
    }

    #[tokio::test]
    async fn health_returns_200() {
        let app = test_app();
        let req = axum::http::Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn create_card_returns_full_entity() {
        let app = test_app();
        let resp = post_form(
            &app,
            "/1/cards",
            &format!("{}&idList={LIST}&name=first&desc=body", creds()),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let card = body_json(resp).await;
        assert_eq!(card["idList"], LIST);
        assert_eq!(card["name"], "first");
        assert_eq!(card["desc"], "body");
        assert_eq!(card["pos"], 1000.0);
        assert_eq!(card["id"].as_str().unwrap().len(), 24);
        assert_eq!(card["closed"], false);
    }

    #[tokio::test]
    async fn create_card_without_id_list_is_400() {
        let app = test_app();
        let resp = post_form(&app, "/1/cards", &creds()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_card_with_malformed_id_list_is_400() {
        let app = test_app();
        let resp =
            post_form(&app, "/1/cards", &format!("{}&idList=not-hex", creds())).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_card_with_garbage_pos_is_400() {
        let app = test_app();
        let resp = post_form(
            &app,
            "/1/cards",
            &format!("{}&idList={LIST}&pos=middle", creds()),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_card_without_credentials_is_401() {
        let app = test_app();
        let resp = post_form(&app, "/1/cards", &format!("idList={LIST}")).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn add_label_requires_hex_card_id() {
        let app = test_app();
        let resp = post_form(
            &app,
            "/1/cards/not-a-card-id/idLabels",
            &format!("{}&value=x", creds()),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn add_label_appends_in_order() {
        let app = test_app();
        let resp = post_form(&app, "/1/cards", &format!("{}&idList={LIST}", creds())).await;
        let card = body_json(resp).await;
        let id = card["id"].as_str().unwrap().to_string();

        let uri = format!("/1/cards/{id}/idLabels");
        let resp = post_form(&app, &uri, &format!("{}&value=a", creds())).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, serde_json::json!(["a"]));

        let resp = post_form(&app, &uri, &format!("{}&value=b", creds())).await;
        assert_eq!(body_json(resp).await, serde_json::json!(["a", "b"]));
    }

    #[tokio::test]
    async fn add_label_matches_uppercase_path_id() {
        let app = test_app();
        let resp = post_form(&app, "/1/cards", &format!("{}&idList={LIST}", creds())).await;
        let card = body_json(resp).await;
        let id = card["id"].as_str().unwrap().to_uppercase();

        let resp = post_form(
            &app,
            &format!("/1/cards/{id}/idLabels"),
            &format!("{}&value=a", creds()),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn add_label_on_unknown_card_is_400() {
        let app = test_app();
        let resp = post_form(
            &app,
            "/1/cards/bbbbbbbbbbbbbbbbbbbbbbbb/idLabels",
            &format!("{}&value=x", creds()),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn attachment_without_file_has_null_bytes_and_no_chksum_field() {
        let app = test_app();
        let resp = post_form(
            &app,
            &format!("/1/cards/{LIST}/attachments"),
            &format!("{}&name=link-only", creds()),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let attachment = body_json(resp).await;
        assert_eq!(attachment["bytes"], Value::Null);
        assert_eq!(attachment["name"], "link-only");
        assert_eq!(attachment["pos"], 0);
        assert!(attachment.get("chksum").is_none());
    }

    #[tokio::test]
    async fn attachment_positions_increase_per_card() {
        let app = test_app();
        let uri = format!("/1/cards/{LIST}/attachments");
        for expected in 0..2 {
            let resp = post_form(&app, &uri, &creds()).await;
            let attachment = body_json(resp).await;
            assert_eq!(attachment["pos"], expected);
        }
    }

    #[tokio::test]
    async fn list_cards_orders_by_pos() {
        let app = test_app();
        for pos in ["1000", "10", "500"] {
            post_form(
                &app,
                "/1/cards",
                &format!("{}&idList={LIST}&pos={pos}&name=c{pos}", creds()),
            )
            .await;
        }

        let req = axum::http::Request::builder()
            .uri(format!("/1/lists/{LIST}/cards?{}", creds()))
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let cards = body_json(resp).await;
        let positions: Vec<f64> = cards
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["pos"].as_f64().unwrap())
            .collect();
        assert_eq!(positions, vec![10.0, 500.0, 1000.0]);
    }

    #[tokio::test]
    async fn unknown_list_returns_empty_array() {
        let app = test_app();
        let req = axum::http::Request::builder()
            .uri(format!("/1/lists/{LIST}/cards?{}", creds()))
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn state_dump_requires_no_credentials() {
        let app = test_app();
        let req = axum::http::Request::builder()
            .uri("/__get_state")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let state = body_json(resp).await;
        assert!(state.get("lists").is_some());
        assert!(state.get("attachments").is_some());
    }

    #[test]
    fn split_ids_handles_absent_and_comma_joined() {
        assert!(split_ids(None).is_empty());
        assert_eq!(split_ids(Some("a,b")), vec!["a", "b"]);
        assert_eq!(split_ids(Some(" a , b ")), vec!["a", "b"]);
        assert!(split_ids(Some("")).is_empty());
    }
}
