use crate::AppState;
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::Request;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Fixed-window per-IP limiter: one request per window, tracked by the
/// time of the last admitted hit.
pub struct RateLimiter {
    window: Duration,
    last_hit: Mutex<HashMap<IpAddr, Instant>>,
}

impl RateLimiter {
    pub fn new(window: Duration) -> Self {
        RateLimiter {
            window,
            last_hit: Mutex::new(HashMap::new()),
        }
    }

    /// Returns true and records the hit when the caller is admitted.
    /// Entries older than the window are evicted on the way in, so the
    /// map only holds addresses still inside their cooldown.
    pub fn check(&self, addr: IpAddr) -> bool {
        if let Ok(mut hits) = self.last_hit.lock() {
            let now = Instant::now();
            hits.retain(|_, last| now.duration_since(*last) < self.window);
            match hits.get(&addr) {
                Some(last) if now.duration_since(*last) < self.window => false,
                _ => {
                    hits.insert(addr, now);
                    true
                }
            }
        } else {
            true
        }
    }
}

/// Request guard applying the search cooldown.
pub struct SearchRateLimit;

#[rocket::async_trait]
impl<'r> FromRequest<'r> for SearchRateLimit {
    type Error = &'static str;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let state = match request.rocket().state::<AppState>() {
            Some(state) => state,
            None => return Outcome::Error((Status::InternalServerError, "missing app state")),
        };

        // Requests without a resolvable client address pass through.
        let Some(addr) = request.client_ip() else {
            return Outcome::Success(SearchRateLimit);
        };

        if state.rate_limiter.check(addr) {
            Outcome::Success(SearchRateLimit)
        } else {
            Outcome::Error((Status::TooManyRequests, "search cooldown active"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn ip(last_octet: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, last_octet))
    }

    #[test]
    fn admits_first_hit_and_blocks_within_window() {
        let limiter = RateLimiter::new(Duration::from_secs(60));
        assert!(limiter.check(ip(1)));
        assert!(!limiter.check(ip(1)));
    }

    #[test]
    fn tracks_addresses_independently() {
        let limiter = RateLimiter::new(Duration::from_secs(60));
        assert!(limiter.check(ip(1)));
        assert!(limiter.check(ip(2)));
    }

    #[test]
    fn evicts_expired_entries() {
        let limiter = RateLimiter::new(Duration::from_millis(10));
        assert!(limiter.check(ip(1)));
        assert!(limiter.check(ip(2)));

        std::thread::sleep(Duration::from_millis(30));

        assert!(limiter.check(ip(3)));
        let hits = limiter.last_hit.lock().unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits.contains_key(&ip(3)));
    }

    #[test]
    fn readmits_after_window_elapses() {
        let limiter = RateLimiter::new(Duration::from_millis(10));
        assert!(limiter.check(ip(1)));
        std::thread::sleep(Duration::from_millis(30));
        assert!(limiter.check(ip(1)));
    }

    #[test]
    fn zero_window_never_blocks() {
        let limiter = RateLimiter::new(Duration::ZERO);
        assert!(limiter.check(ip(1)));
        assert!(limiter.check(ip(1)));
    }
}
