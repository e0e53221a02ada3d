use crate::services::rate_limit::RateLimiter;
use crate::services::youtube::YouTubeClient;
use crate::AppState;
use anyhow::Result;
use env_logger::Builder;
use lazy_static::lazy_static;
use log::{info, LevelFilter};
use rocket::http::Method;
use rocket_cors::{AllowedHeaders, AllowedOrigins, CorsOptions};
use std::env;
use std::time::Duration;

lazy_static! {
    pub static ref YOUTUBE_API_KEY: String =
        env::var("YOUTUBE_API_KEY").expect("YOUTUBE_API_KEY environment variable must be set");
    pub static ref RECAPTCHA_SITE_KEY: String = env::var("RECAPTCHA_SITE_KEY")
        .expect("RECAPTCHA_SITE_KEY environment variable must be set");
    pub static ref RECAPTCHA_SECRET_KEY: String = env::var("RECAPTCHA_SECRET_KEY")
        .expect("RECAPTCHA_SECRET_KEY environment variable must be set");
    pub static ref SEARCH_COOLDOWN_SECONDS: u64 = env::var("SEARCH_COOLDOWN_SECONDS")
        .unwrap_or_else(|_| "5".to_string())
        .parse::<u64>()
        .unwrap_or(5);
    pub static ref CORS_ALLOWED_ORIGIN: String =
        env::var("CORS_ALLOWED_ORIGIN").unwrap_or_else(|_| "http://localhost:8080".to_string());
}

pub fn init_logger() {
    Builder::new().filter_level(LevelFilter::Info).init();
    info!("Starting Rocket backend...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

pub fn create_app_state() -> Result<AppState> {
    // Force required keys now so a missing variable fails at boot,
    // not on the first request.
    let youtube = YouTubeClient::new(YOUTUBE_API_KEY.clone())?;
    let _ = RECAPTCHA_SITE_KEY.len();
    let _ = RECAPTCHA_SECRET_KEY.len();

    Ok(AppState {
        youtube,
        rate_limiter: RateLimiter::new(Duration::from_secs(*SEARCH_COOLDOWN_SECONDS)),
    })
}

pub fn create_cors() -> Result<rocket_cors::Cors> {
    let cors = CorsOptions::default()
        .allowed_origins(AllowedOrigins::some_exact(&[CORS_ALLOWED_ORIGIN.as_str()]))
        .allowed_methods(
            vec![Method::Get, Method::Post, Method::Options]
                .into_iter()
                .map(From::from)
                .collect(),
        )
        .allowed_headers(AllowedHeaders::some(&["Accept", "Content-Type"]))
        .to_cors()
        .map_err(|e| anyhow::anyhow!("Failed to create CORS options: {}", e))?;

    Ok(cors)
}
