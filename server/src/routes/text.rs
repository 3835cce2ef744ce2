use axum::Json;
use axum::extract::State;
use kingdom_overlay_shared::{UiChannel, UiText};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TextFilterRequest {
    pub channel: UiChannel,
    #[serde(flatten)]
    pub text: UiText,
}

#[derive(Debug, Serialize)]
pub struct TextFilterResponse {
    pub suppressed: bool,
    /// What the host should display instead.
    pub text: UiText,
}

pub async fn post_text_filter(
    State(state): State<AppState>,
    Json(request): Json<TextFilterRequest>,
) -> Json<TextFilterResponse> {
    let suppressed = state.text_filter.is_suppressed(&request.text);
    state.observability.record_text_filter_request(suppressed);
    let text = state.text_filter.filter(request.channel, request.text);
    Json(TextFilterResponse { suppressed, text })
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use kingdom_overlay_shared::TooltipLabels;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::state::AppState;

    async fn filter(state: AppState, body: &'static str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/text-filter")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .expect("build request");
        let response = crate::app::build_app(state)
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read response body");
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn claim_titles_are_blanked() {
        let state = AppState::new(TooltipLabels::default());
        let (status, body) = filter(
            state.clone(),
            r#"{"channel": "title", "key": "gui.xaero_pac_title_entered_claim", "literal": "Alex's claim"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["suppressed"], true);
        assert_eq!(body["text"]["literal"], "");

        let snapshot = state.observability.snapshot();
        assert_eq!(snapshot.text_filter_requests_total, 1);
        assert_eq!(snapshot.text_suppressed_total, 1);
    }

    #[tokio::test]
    async fn other_messages_pass_through() {
        let state = AppState::new(TooltipLabels::default());
        let (_, body) = filter(
            state,
            r#"{"channel": "action_bar", "literal": "Harvest complete"}"#,
        )
        .await;
        assert_eq!(body["suppressed"], false);
        assert_eq!(body["text"]["literal"], "Harvest complete");
    }

    #[tokio::test]
    async fn unknown_channel_is_rejected() {
        let state = AppState::new(TooltipLabels::default());
        let (status, _) = filter(state, r#"{"channel": "chat", "literal": "hi"}"#).await;
        assert!(status.is_client_error());
    }
}
