use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::Responder;
use rocket::{response, Response};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// One ranked result, ready for JSON serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedVideo {
    pub id: String,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub views: u64,
    pub views_formatted: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(alias = "g-recaptcha-response")]
    pub recaptcha_token: String,
}

#[derive(Debug)]
pub struct ErrorResponse {
    pub error: String,
    pub status: Status,
}

impl ErrorResponse {
    pub fn new(status: Status, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status,
        }
    }

    fn body_json(&self) -> String {
        serde_json::json!({ "error": self.error }).to_string()
    }
}

impl<'r> Responder<'r, 'static> for ErrorResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let json = self.body_json();
        Response::build()
            .status(self.status)
            .header(ContentType::JSON)
            .sized_body(json.len(), Cursor::new(json))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_request_accepts_recaptcha_alias() {
        let body = r#"{"query": "lofi", "g-recaptcha-response": "tok"}"#;
        let request: SearchRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.query, "lofi");
        assert_eq!(request.recaptcha_token, "tok");
    }

    #[test]
    fn error_response_body_carries_only_the_message() {
        let response = ErrorResponse::new(Status::InternalServerError, "fetch failed");
        assert_eq!(response.body_json(), r#"{"error":"fetch failed"}"#);
    }

    #[test]
    fn ranked_video_serializes_all_fields() {
        let video = RankedVideo {
            id: "abc".to_string(),
            title: "A Song".to_string(),
            thumbnail_url: None,
            views: 42,
            views_formatted: "42".to_string(),
            url: "https://music.youtube.com/watch?v=abc".to_string(),
        };
        let json = serde_json::to_value(&video).unwrap();
        assert_eq!(json["views"], 42);
        assert_eq!(json["url"], "https://music.youtube.com/watch?v=abc");
    }
}
