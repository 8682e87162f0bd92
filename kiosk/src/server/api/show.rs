//! POST /show – render a code and push it to the panel.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::Deserialize;
use serde_json::json;

use crate::app::SharedState;
use layout_engine::RenderRequest;

/// Form body of a show request. Field names match the wire protocol.
#[derive(Debug, Default, Deserialize)]
pub struct ShowForm {
    pub data: Option<String>,
    pub label: Option<String>,
    #[serde(rename = "display-type")]
    pub display_type: Option<String>,
    #[serde(rename = "font-size")]
    pub font_size: Option<String>,
    #[serde(rename = "scale-type")]
    pub scale_type: Option<String>,
}

impl ShowForm {
    /// Convert to a render request, or `None` when `data` is missing.
    ///
    /// Browser form posts carry untouched fields as empty strings; those
    /// count as absent, not as literal tokens.
    fn into_request(self) -> Option<RenderRequest> {
        let mut request = RenderRequest::new(self.data?);
        if let Some(label) = self.label {
            request.labels = RenderRequest::split_labels(&label);
        }
        request.display_type = self.display_type.filter(|s| !s.is_empty());
        request.font_size = self.font_size.filter(|s| !s.is_empty());
        request.scale_mode = self.scale_type.filter(|s| !s.is_empty());
        Some(request)
    }
}

/// POST /show – validate, render and present one frame.
///
/// Every outcome after form validation is a 200 with `result` telling
/// success apart from failure; only a missing `data` field is a 400.
pub async fn show(State(state): State<SharedState>, Form(form): Form<ShowForm>) -> Response {
    let Some(request) = form.into_request() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "result": false, "msg": "missing form field: data" })),
        )
            .into_response();
    };

    let output = match state.engine().render(&request) {
        Ok(output) => output,
        Err(e) => {
            tracing::warn!("Show request rejected: {e}");
            return show_failure(&e.to_string());
        }
    };

    let timeout = state.config().transfer_timeout_secs;
    match state
        .display()
        .present(output.canvas.into_image(), timeout)
        .await
    {
        Ok(()) => Json(json!({
            "result": true,
            "msg": "ok",
            "qrcode-format": output.designator,
        }))
        .into_response(),
        Err(e) => {
            tracing::error!("Display transfer failed: {e}");
            show_failure(&e.to_string())
        }
    }
}

fn show_failure(msg: &str) -> Response {
    Json(json!({ "result": false, "msg": msg })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SharedState;
    use crate::config::AppConfig;
    use crate::services::display::DisplayHandle;
    use axum::body::{Body, to_bytes};
    use axum::extract::FromRequest;
    use epaper::{DisplayProfile, NullDriver};
    use image::GrayImage;
    use layout_engine::{EcLevel, LayoutEngine, QrCodeEncoder, TextRenderer};

    /// Glyph-free text seam with the full supported size set.
    struct StubText;

    impl TextRenderer for StubText {
        fn line_height(&self, size_px: u32) -> Option<u32> {
            layout_engine::fonts::is_supported_size(size_px).then(|| size_px + 6)
        }
        fn draw(&self, _img: &mut GrayImage, _x: i32, _y: i32, _size_px: u32, _text: &str) {}
    }

    fn test_state() -> SharedState {
        let engine = LayoutEngine::new(
            DisplayProfile::EPD_1IN54,
            Box::new(QrCodeEncoder),
            Box::new(StubText),
            EcLevel::H,
            2,
        );
        let display = DisplayHandle::spawn(Box::new(NullDriver::new(DisplayProfile::EPD_1IN54)));
        SharedState::from_parts(AppConfig::default(), engine, display)
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn form_without_data_yields_no_request() {
        let form = ShowForm {
            label: Some("orphan".to_owned()),
            ..ShowForm::default()
        };
        assert!(form.into_request().is_none());
    }

    #[test]
    fn form_fields_map_onto_the_render_request() {
        let form = ShowForm {
            data: Some("https://example.com".to_owned()),
            label: Some("Guest WiFi\nFloor 2".to_owned()),
            display_type: Some("1.54".to_owned()),
            font_size: Some("22".to_owned()),
            scale_type: Some("cm".to_owned()),
        };

        let request = form.into_request().unwrap();
        assert_eq!(request.payload, "https://example.com");
        assert_eq!(request.labels, &["Guest WiFi", "Floor 2"]);
        assert_eq!(request.display_type.as_deref(), Some("1.54"));
        assert_eq!(request.font_size.as_deref(), Some("22"));
        assert_eq!(request.scale_mode.as_deref(), Some("cm"));
    }

    #[test]
    fn empty_optional_fields_count_as_absent() {
        let form = ShowForm {
            data: Some("https://example.com".to_owned()),
            label: Some(String::new()),
            display_type: Some(String::new()),
            font_size: Some(String::new()),
            scale_type: Some(String::new()),
        };

        let request = form.into_request().unwrap();
        assert!(request.labels.is_empty());
        assert_eq!(request.display_type, None);
        assert_eq!(request.font_size, None);
        assert_eq!(request.scale_mode, None);
    }

    #[tokio::test]
    async fn show_reports_success_and_the_symbol_designator() {
        let form = ShowForm {
            data: Some("https://example.com".to_owned()),
            label: Some("Guest WiFi".to_owned()),
            ..ShowForm::default()
        };

        let response = show(State(test_state()), Form(form)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["result"], true);
        assert_eq!(body["msg"], "ok");
        assert_eq!(body["qrcode-format"], "3-H");
    }

    #[tokio::test]
    async fn untouched_page_form_posts_empty_fields_and_renders() {
        // What the bundled page submits with only the URL filled in.
        let wire = "data=https%3A%2F%2Fexample.com&label=&display-type=&font-size=&scale-type=";
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/show")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(wire))
            .unwrap();
        let form = Form::<ShowForm>::from_request(request, &()).await.unwrap();

        let response = show(State(test_state()), form).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["result"], true);
        assert_eq!(body["qrcode-format"], "3-H");
    }

    #[tokio::test]
    async fn missing_data_is_the_only_bad_request() {
        let response = show(State(test_state()), Form(ShowForm::default())).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["result"], false);
    }

    #[tokio::test]
    async fn mismatched_display_type_fails_with_status_200() {
        let form = ShowForm {
            data: Some("hello".to_owned()),
            display_type: Some("2.9".to_owned()),
            ..ShowForm::default()
        };

        let response = show(State(test_state()), Form(form)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["result"], false);
        let msg = body["msg"].as_str().unwrap();
        assert!(msg.contains("mismatch"), "unexpected msg: {msg}");
        assert!(body.get("qrcode-format").is_none());
    }

    #[tokio::test]
    async fn unavailable_font_size_fails_with_status_200() {
        let form = ShowForm {
            data: Some("hello".to_owned()),
            font_size: Some("17".to_owned()),
            ..ShowForm::default()
        };

        let response = show(State(test_state()), Form(form)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["result"], false);
        assert!(body["msg"].as_str().unwrap().contains("not available"));
    }
}
