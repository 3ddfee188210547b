use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single file entry from a Drive folder listing.
///
/// The listing API exposes no per-file ownership metadata; `name` is the only
/// signal an owner can be recovered from. Everything besides `id` and `name`
/// is passthrough metadata, validated into an explicit shape at the ingestion
/// boundary but never interpreted by the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DriveFileRecord {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Drive reports sizes as decimal strings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_view_link: Option<String>,
}

impl DriveFileRecord {
    /// The reported size parsed as bytes; 0 when absent or malformed.
    pub fn size_bytes(&self) -> u64 {
        self.size
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    }
}

/// Whose files a classification pass should return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// Unfiltered view; no ownership extraction is attempted.
    All,
    /// A signed-in account email; only files resolving to it are returned.
    Email(String),
}

impl Identity {
    pub fn email(address: impl Into<String>) -> Self {
        Identity::Email(address.into())
    }
}

/// Owner guess recovered from a filename suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerIdentifier {
    /// The `_`-joined suffix judged to encode the owner, exactly as it
    /// appears in the filename.
    pub raw_segment: String,
    /// `raw_segment` with underscores folded to dots.
    pub normalized_handle: String,
}

impl OwnerIdentifier {
    /// The synthesized matching key. Nothing verifies that this account
    /// exists; it is only ever compared against the signed-in user's email.
    pub fn pseudo_email(&self) -> String {
        format!("{}@gmail.com", self.normalized_handle)
    }
}

/// A 3D model file paired with its thumbnail and owner guess.
///
/// Built fresh on every classification pass; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelAsset {
    pub id: String,
    pub source_file: DriveFileRecord,
    pub display_name: String,
    pub thumbnail: Option<DriveFileRecord>,
    pub owner_handle: Option<OwnerIdentifier>,
}

impl ModelAsset {
    /// App-relative proxy link for the model content.
    pub fn download_url(&self) -> String {
        proxy_url("/api/models", &self.id, &self.source_file.name)
    }

    /// App-relative proxy link for the paired thumbnail, if one matched.
    pub fn image_url(&self) -> Option<String> {
        self.thumbnail
            .as_ref()
            .map(|image| proxy_url("/api/images", &image.id, &image.name))
    }
}

fn proxy_url(base: &str, file_id: &str, filename: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(filename.as_bytes()).collect();
    format!("{}/{}?filename={}", base, file_id, encoded)
}

/// Output of [`classify`](crate::resolver::classify).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Classified {
    pub objects: Vec<ModelAsset>,
}
