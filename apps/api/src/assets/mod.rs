//! Company asset directory: catalog scans for the pipeline, plus the
//! upload/delete operations behind the asset routes.
//!
//! The directory is the only source of truth. Nothing is cached, so every
//! catalog call reflects the latest upload or delete.

pub mod handlers;

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::errors::AppError;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Request body cap for the upload routes. axum's 2 MiB default is too small
/// for photos.
pub const MAX_ASSET_UPLOAD_SIZE: usize = 50 * 1024 * 1024;

/// URL prefix under which the asset directory is served.
pub const ASSET_URL_PREFIX: &str = "/assets";

/// Catalogued image references, split into logos and everything else.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssetListing {
    pub images: Vec<String>,
    pub logos: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAsset {
    pub filename: String,
    pub size: u64,
}

#[derive(Debug, Clone)]
pub struct AssetCatalog {
    dir: PathBuf,
}

impl AssetCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the asset directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<(), AppError> {
        if tokio::fs::metadata(&self.dir).await.is_err() {
            tokio::fs::create_dir_all(&self.dir).await?;
            info!("Created asset directory {}", self.dir.display());
        }
        Ok(())
    }

    /// Scans the directory for both image lists at once. A missing directory
    /// is an empty catalog.
    pub async fn listing(&self) -> Result<AssetListing, AppError> {
        let mut names = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(AssetListing::default())
            }
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if is_image(name) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();

        let (logos, images): (Vec<_>, Vec<_>) = names
            .into_iter()
            .partition(|name| name.to_lowercase().contains("logo"));

        Ok(AssetListing {
            images: images.iter().map(|n| asset_ref(n)).collect(),
            logos: logos.iter().map(|n| asset_ref(n)).collect(),
        })
    }

    /// Writes an uploaded file, replacing any file with the same name.
    pub async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<StoredAsset, AppError> {
        let filename = sanitize_filename(original_name)?;
        self.ensure_dir().await?;
        tokio::fs::write(self.dir.join(&filename), bytes).await?;
        info!("Stored asset {filename} ({} bytes)", bytes.len());
        Ok(StoredAsset {
            filename,
            size: bytes.len() as u64,
        })
    }

    pub async fn delete(&self, name: &str) -> Result<String, AppError> {
        let filename = sanitize_filename(name)?;
        let path = self.dir.join(&filename);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!("Deleted asset {filename}");
                Ok(filename)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound(format!("File not found: {filename}")))
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn is_image(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

fn asset_ref(name: &str) -> String {
    format!("{ASSET_URL_PREFIX}/{name}")
}

/// Accepts a bare file name only. Anything that could address a path outside
/// the asset directory is rejected.
pub fn sanitize_filename(name: &str) -> Result<String, AppError> {
    let trimmed = name.trim();
    let invalid = trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains('/')
        || trimmed.contains('\\')
        || trimmed.contains('\0');
    if invalid {
        return Err(AppError::Validation(format!("Invalid file name: {name:?}")));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn catalog_with(files: &[&str]) -> (tempfile::TempDir, AssetCatalog) {
        let dir = tempfile::tempdir().unwrap();
        for file in files {
            tokio::fs::write(dir.path().join(file), b"img").await.unwrap();
        }
        let catalog = AssetCatalog::new(dir.path());
        (dir, catalog)
    }

    #[tokio::test]
    async fn test_listing_splits_logos_and_filters_extensions() {
        let (_dir, catalog) = catalog_with(&[
            "storefront.JPG",
            "Company-Logo.png",
            "notes.txt",
            "bread.webp",
        ])
        .await;

        let listing = catalog.listing().await.unwrap();
        assert_eq!(
            listing.images,
            vec!["/assets/bread.webp", "/assets/storefront.JPG"]
        );
        assert_eq!(listing.logos, vec!["/assets/Company-Logo.png"]);
    }

    #[tokio::test]
    async fn test_missing_dir_is_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = AssetCatalog::new(dir.path().join("nope"));
        assert_eq!(catalog.listing().await.unwrap(), AssetListing::default());
    }

    #[tokio::test]
    async fn test_store_then_delete() {
        let (_dir, catalog) = catalog_with(&[]).await;

        let stored = catalog.store("oven.png", b"12345").await.unwrap();
        assert_eq!(stored.filename, "oven.png");
        assert_eq!(stored.size, 5);
        assert_eq!(catalog.listing().await.unwrap().images, vec!["/assets/oven.png"]);

        catalog.delete("oven.png").await.unwrap();
        assert!(catalog.listing().await.unwrap().images.is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_file_is_not_found() {
        let (_dir, catalog) = catalog_with(&[]).await;
        assert!(matches!(
            catalog.delete("ghost.png").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_store_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = AssetCatalog::new(dir.path().join("company-assets"));
        catalog.store("a.png", b"x").await.unwrap();
        assert_eq!(catalog.listing().await.unwrap().images, vec!["/assets/a.png"]);
    }

    #[test]
    fn test_sanitize_rejects_traversal() {
        assert!(sanitize_filename("../etc/passwd").is_err());
        assert!(sanitize_filename("..").is_err());
        assert!(sanitize_filename("a\\b.png").is_err());
        assert!(sanitize_filename("   ").is_err());
        assert_eq!(sanitize_filename(" logo.png ").unwrap(), "logo.png");
    }
}
