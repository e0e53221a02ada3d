use log::warn;
use serde::Deserialize;

const VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

#[derive(Debug, Deserialize)]
pub struct VerifyResponse {
    pub success: bool,
    #[serde(rename = "error-codes", default)]
    pub error_codes: Vec<String>,
}

/// Checks a client token against Google's siteverify endpoint.
pub async fn verify_token(secret: &str, token: &str) -> Result<bool, reqwest::Error> {
    let client = reqwest::Client::new();

    let response: VerifyResponse = client
        .post(VERIFY_URL)
        .form(&[("secret", secret), ("response", token)])
        .send()
        .await?
        .json()
        .await?;

    if !response.success {
        warn!("reCAPTCHA verification failed: {:?}", response.error_codes);
    }

    Ok(response.success)
}
