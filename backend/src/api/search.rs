use crate::config::RECAPTCHA_SECRET_KEY;
use crate::models::{ErrorResponse, RankedVideo, SearchRequest};
use crate::services::rate_limit::SearchRateLimit;
use crate::services::recaptcha;
use crate::services::youtube::{self, DEFAULT_MAX_RESULTS};
use crate::AppState;
use log::error;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{catch, post, State};

#[post("/search", data = "<request>")]
pub async fn search_top_videos(
    _cooldown: SearchRateLimit,
    state: &State<AppState>,
    request: Json<SearchRequest>,
) -> Result<Json<Vec<RankedVideo>>, ErrorResponse> {
    match recaptcha::verify_token(&RECAPTCHA_SECRET_KEY, &request.recaptcha_token).await {
        Ok(true) => {}
        Ok(false) => {
            return Err(ErrorResponse::new(
                Status::BadRequest,
                "reCAPTCHA verification failed.",
            ))
        }
        Err(e) => {
            error!("reCAPTCHA verification request failed: {e:?}");
            return Err(ErrorResponse::new(
                Status::BadRequest,
                "reCAPTCHA verification failed.",
            ));
        }
    }

    let query = request.query.trim();
    if query.is_empty() {
        return Err(ErrorResponse::new(Status::BadRequest, "No query provided."));
    }

    match youtube::fetch_top_videos(&state.youtube, query, DEFAULT_MAX_RESULTS).await {
        Ok(videos) => Ok(Json(videos)),
        Err(e) => {
            error!("YouTube fetch failed for '{query}': {e}");
            Err(ErrorResponse::new(
                Status::InternalServerError,
                "Error fetching data from YouTube.",
            ))
        }
    }
}

#[catch(429)]
pub fn too_many_requests() -> ErrorResponse {
    ErrorResponse::new(
        Status::TooManyRequests,
        "Too many searches. Try again in a few seconds.",
    )
}
