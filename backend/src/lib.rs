pub mod api;
pub mod config;
pub mod models;
pub mod services;
pub mod utils;

use crate::services::rate_limit::RateLimiter;
use crate::services::youtube::YouTubeClient;

pub struct AppState {
    pub youtube: YouTubeClient,
    pub rate_limiter: RateLimiter,
}
