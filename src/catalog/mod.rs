//! Drive folder listing and content proxy.
//!
//! Read-only edge over the Drive v3 `files` API: lists the configured shared
//! folders, validates each entry into a [`DriveFileRecord`], and hands the
//! combined listing to the resolver. Transport concerns (auth decoration,
//! retries, error envelopes) all live here; the resolver itself never does
//! I/O.
//!
//! # Examples
//!
//! ```rust,ignore
//! # use drive_model_catalog::{FolderScope, ModelDrive};
//! # async fn run(drive: ModelDrive) {
//! let catalog = drive.catalog();
//! let identity = catalog.folders().identity_for("jane.doe@gmail.com");
//! let listing = catalog.scan(FolderScope::UserObjects, &identity).await;
//! # }
//! ```

pub mod models;


use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::middleware::AuthMiddleware;
use crate::core::parse_error_response;
use crate::resolver::{classify, Classified, DriveFileRecord, Identity};
use models::{FileListResponse, FolderConfig, FolderScope};

const DRIVE_V3_API: &str = "https://www.googleapis.com/drive/v3";
const LISTING_FIELDS: &str = "files(id,name,mimeType,size,createdTime,webViewLink)";

static FILE_ID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"/d/([A-Za-z0-9_-]+)").unwrap());

/// Errors that can occur while talking to the Drive API.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Wrapper for `reqwest::Error`.
    #[error("HTTP Request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    /// Wrapper for `reqwest_middleware::Error`.
    #[error("Middleware error: {0}")]
    MiddlewareError(#[from] reqwest_middleware::Error),
    /// Errors returned by the Drive API.
    #[error("API error: {0}")]
    ApiError(String),
    /// Wrapper for `serde_json::Error`.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Client for the shared model folders.
#[derive(Clone)]
pub struct DriveCatalog {
    client: ClientWithMiddleware,
    pub base_url: String,
    folders: FolderConfig,
}

impl DriveCatalog {
    /// Creates a catalog client with retrying transport and the given auth
    /// decoration.
    ///
    /// This is typically called via [`ModelDrive::catalog`](crate::ModelDrive::catalog).
    pub fn new(middleware: AuthMiddleware, folders: FolderConfig) -> Self {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);

        let client = ClientBuilder::new(Client::new())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .with(middleware)
            .build();

        Self {
            client,
            base_url: DRIVE_V3_API.to_string(),
            folders,
        }
    }

    /// Injects a prebuilt client and base URL, for emulators and tests.
    pub fn new_with_client(
        client: ClientWithMiddleware,
        base_url: String,
        folders: FolderConfig,
    ) -> Self {
        Self {
            client,
            base_url,
            folders,
        }
    }

    pub fn folders(&self) -> &FolderConfig {
        &self.folders
    }

    /// Lists every file in one folder.
    pub async fn list_folder(&self, folder_id: &str) -> Result<Vec<DriveFileRecord>, CatalogError> {
        let url = format!("{}/files", self.base_url);
        let query = format!("'{}' in parents", folder_id);

        let response = self
            .client
            .get(&url)
            .query(&[("q", query.as_str()), ("fields", LISTING_FIELDS)])
            .send()
            .await?;

        if !response.status().is_success() {
            let message = parse_error_response(response, "Folder listing failed").await;
            return Err(CatalogError::ApiError(message));
        }

        let listing: FileListResponse = response.json().await?;
        Ok(listing.files.unwrap_or_default())
    }

    /// Lists the folders in `scope` and classifies the combined listing for
    /// `identity`.
    ///
    /// A folder that fails to list is skipped with a warning as long as some
    /// other folder succeeded; when every folder fails the first error is
    /// returned.
    pub async fn scan(
        &self,
        scope: FolderScope,
        identity: &Identity,
    ) -> Result<Classified, CatalogError> {
        let mut files = Vec::new();
        let mut first_error = None;
        let mut listed_any = false;

        for (label, folder_id) in self.folders.scoped(scope) {
            match self.list_folder(folder_id).await {
                Ok(batch) => {
                    debug!(folder = label, count = batch.len(), "listed folder");
                    files.extend(batch);
                    listed_any = true;
                }
                Err(error) => {
                    warn!(folder = label, %error, "folder listing failed");
                    if first_error.is_none() {
                        first_error = Some(error);
                    }
                }
            }
        }

        if !listed_any {
            if let Some(error) = first_error {
                return Err(error);
            }
        }

        Ok(classify(&files, identity))
    }

    /// Fetches a file's content (`alt=media`), the upstream side of the
    /// `/api/models/{fileId}` and `/api/images/{fileId}` proxy routes.
    #[cfg(feature = "download")]
    pub async fn download(&self, file_id: &str) -> Result<bytes::Bytes, CatalogError> {
        let encoded_id: String = url::form_urlencoded::byte_serialize(file_id.as_bytes()).collect();
        let url = format!("{}/files/{}", self.base_url, encoded_id);

        let response = self
            .client
            .get(&url)
            .query(&[("alt", "media")])
            .send()
            .await?;

        if !response.status().is_success() {
            let message = parse_error_response(response, "Download failed").await;
            return Err(CatalogError::ApiError(message));
        }

        Ok(response.bytes().await?)
    }
}

/// Whether a link points at Drive at all.
pub fn is_drive_url(url: &str) -> bool {
    url.contains("drive.google.com")
}

/// Pulls the file id out of a Drive share URL (`.../d/{fileId}/view`).
pub fn extract_file_id(url: &str) -> Option<&str> {
    FILE_ID_PATTERN
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
