#[cfg(feature = "network")]
pub type HttpClient = reqwest::blocking::Client;

#[cfg(feature = "network")]
pub fn build_client(timeout_secs: u64) -> Result<HttpClient, reqwest::Error> {
    reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .user_agent(concat!("keyrush/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Status line and body of a non-2xx response, for error messages.
#[cfg(feature = "network")]
pub fn describe_failure(response: reqwest::blocking::Response) -> (u16, String) {
    let status = response.status();
    let reason = status.canonical_reason().unwrap_or("");
    let body = response.text().unwrap_or_default();
    let text = if body.trim().is_empty() {
        reason.to_string()
    } else {
        body.trim().to_string()
    };
    (status.as_u16(), text)
}
