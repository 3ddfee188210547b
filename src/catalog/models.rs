use serde::{Deserialize, Serialize};

use crate::resolver::{DriveFileRecord, Identity};

/// Wire shape of a Drive v3 `files.list` response.
#[derive(Debug, Deserialize)]
pub struct FileListResponse {
    pub files: Option<Vec<DriveFileRecord>>,
}

/// Registry of the shared folders the catalog reads, plus the accounts that
/// get the unfiltered view.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FolderConfig {
    /// Folder holding finished 3D models and their thumbnails.
    pub user_objects: String,
    /// Folder holding request uploads (reference images).
    pub user_requests: String,
    /// Accounts whose views are never filtered by ownership.
    #[serde(default)]
    pub admin_emails: Vec<String>,
}

impl FolderConfig {
    pub fn new(user_objects: impl Into<String>, user_requests: impl Into<String>) -> Self {
        Self {
            user_objects: user_objects.into(),
            user_requests: user_requests.into(),
            admin_emails: Vec::new(),
        }
    }

    pub fn with_admins(mut self, emails: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.admin_emails = emails.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_admin(&self, email: &str) -> bool {
        let email = email.to_lowercase();
        self.admin_emails
            .iter()
            .any(|admin| admin.to_lowercase() == email)
    }

    /// The scan identity for a signed-in account: admins get the unfiltered
    /// view, everyone else is scoped to their own files.
    pub fn identity_for(&self, email: &str) -> Identity {
        if self.is_admin(email) {
            Identity::All
        } else {
            Identity::Email(email.to_string())
        }
    }

    pub(crate) fn scoped(&self, scope: FolderScope) -> Vec<(&'static str, &str)> {
        match scope {
            FolderScope::UserObjects => vec![("user_objects", self.user_objects.as_str())],
            FolderScope::UserRequests => vec![("user_requests", self.user_requests.as_str())],
            FolderScope::Both => vec![
                ("user_objects", self.user_objects.as_str()),
                ("user_requests", self.user_requests.as_str()),
            ],
        }
    }
}

/// Which of the configured folders a scan reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FolderScope {
    UserObjects,
    UserRequests,
    #[default]
    Both,
}
