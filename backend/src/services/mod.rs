pub mod rate_limit;
pub mod recaptcha;
pub mod youtube;
