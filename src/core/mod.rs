pub mod middleware;

use serde::Deserialize;

/// The standard Google API error envelope, as returned by Drive v3.
#[derive(Debug, Deserialize)]
pub struct DriveErrorResponse {
    pub error: DriveErrorDetails,
}

#[derive(Debug, Deserialize)]
pub struct DriveErrorDetails {
    pub code: u16,
    pub message: String,
    pub status: Option<String>,
    pub errors: Option<Vec<DriveSubError>>,
}

#[derive(Debug, Deserialize)]
pub struct DriveSubError {
    pub message: String,
    pub domain: Option<String>,
    pub reason: Option<String>,
}

impl DriveErrorResponse {
    pub fn display_message(&self) -> String {
        format!("{} (code: {})", self.error.message, self.error.code)
    }
}

pub async fn parse_error_response(response: reqwest::Response, default_msg: &str) -> String {
    let status = response.status();
    match response.json::<DriveErrorResponse>().await {
        Ok(error_resp) => error_resp.display_message(),
        Err(_) => format!("{}: {}", default_msg, status),
    }
}
