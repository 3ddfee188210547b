//! Google Drive-backed 3D model catalog.
//!
//! The storefront keeps user-requested 3D models and their thumbnails in
//! shared Drive folders. This crate is the read side of that arrangement: it
//! lists the folders, works out from the filename alone which signed-in user
//! each file belongs to, and pairs every model with its thumbnail.
//!
//! The [`resolver`] module is the pure core (no I/O, safe to call per
//! render). The [`catalog`] module (feature `catalog`, default on) is the
//! Drive client that feeds it.
//!
//! ```rust,ignore
//! use drive_model_catalog::{FolderConfig, FolderScope, ModelDrive};
//!
//! # async fn run() {
//! let folders = FolderConfig::new("objects-folder-id", "requests-folder-id")
//!     .with_admins(["ops@example.com"]);
//! let drive = ModelDrive::with_api_key("api-key", folders);
//!
//! let catalog = drive.catalog();
//! let identity = catalog.folders().identity_for("jane.doe@gmail.com");
//! let listing = catalog.scan(FolderScope::UserObjects, &identity).await;
//! # }
//! ```

pub mod core;
pub mod resolver;

#[cfg(feature = "catalog")]
pub mod catalog;

pub use resolver::{
    classify, extract_owner_handle, generate_display_name, Classified, DriveFileRecord, Identity,
    ModelAsset, OwnerIdentifier,
};

#[cfg(feature = "catalog")]
pub use catalog::models::{FolderConfig, FolderScope};
#[cfg(feature = "catalog")]
pub use catalog::{CatalogError, DriveCatalog};

#[cfg(feature = "catalog")]
use crate::core::middleware::AuthMiddleware;
#[cfg(feature = "catalog")]
use yup_oauth2::ServiceAccountKey;

/// Entry point tying read credentials to the shared folder registry.
#[cfg(feature = "catalog")]
pub struct ModelDrive {
    auth: AuthMiddleware,
    folders: FolderConfig,
}

#[cfg(feature = "catalog")]
impl ModelDrive {
    /// Read access through the shared public API key.
    pub fn with_api_key(api_key: impl Into<String>, folders: FolderConfig) -> Self {
        Self {
            auth: AuthMiddleware::api_key(api_key),
            folders,
        }
    }

    /// Read access as the service account.
    pub fn with_service_account(key: ServiceAccountKey, folders: FolderConfig) -> Self {
        Self {
            auth: AuthMiddleware::service_account(key),
            folders,
        }
    }

    pub fn catalog(&self) -> DriveCatalog {
        DriveCatalog::new(self.auth.clone(), self.folders.clone())
    }
}
