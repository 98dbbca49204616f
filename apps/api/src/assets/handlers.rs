use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assets::{AssetListing, StoredAsset};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedAsset {
    pub filename: String,
    pub original_name: String,
    pub size: u64,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub uploaded: Vec<UploadedAsset>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteAssetRequest {
    pub filename: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteAssetResponse {
    pub success: bool,
    pub message: String,
    pub filename: String,
}

/// Browsers may send a full client-side path; only the last component is kept.
fn upload_name(raw: &str) -> &str {
    raw.rsplit(['/', '\\']).next().unwrap_or(raw)
}

/// Stores file fields named `field_name`, up to `max_files` of them. Other
/// fields are ignored and nothing past the cap is read.
async fn store_fields(
    state: &AppState,
    mut multipart: Multipart,
    field_name: &str,
    max_files: usize,
) -> Result<Vec<UploadedAsset>, AppError> {
    let mut uploaded = Vec::new();

    while uploaded.len() < max_files {
        let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
        else {
            break;
        };
        if field.name() != Some(field_name) {
            continue;
        }
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        let StoredAsset { filename, size } =
            state.assets.store(upload_name(&original_name), &bytes).await?;
        uploaded.push(UploadedAsset {
            filename,
            original_name,
            size,
        });
    }

    Ok(uploaded)
}

/// GET /api/assets
pub async fn handle_list_assets(
    State(state): State<AppState>,
) -> Result<Json<AssetListing>, AppError> {
    Ok(Json(state.assets.listing().await?))
}

/// POST /upload-asset: single file in field `asset`.
pub async fn handle_upload_asset(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let uploaded = store_fields(&state, multipart, "asset", 1).await?;
    if uploaded.is_empty() {
        return Err(AppError::Validation("No file uploaded".to_string()));
    }

    Ok(Json(UploadResponse {
        success: true,
        message: format!("Uploaded {}", uploaded[0].filename),
        uploaded,
    }))
}

/// POST /upload-assets: any number of files in field `assets`.
pub async fn handle_upload_assets(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let uploaded = store_fields(&state, multipart, "assets", usize::MAX).await?;
    if uploaded.is_empty() {
        return Err(AppError::Validation("No files uploaded".to_string()));
    }
    info!("Uploaded {} company assets", uploaded.len());

    Ok(Json(UploadResponse {
        success: true,
        message: format!("Successfully uploaded {} file(s)", uploaded.len()),
        uploaded,
    }))
}

/// DELETE /delete-asset
pub async fn handle_delete_asset(
    State(state): State<AppState>,
    Json(request): Json<DeleteAssetRequest>,
) -> Result<Json<DeleteAssetResponse>, AppError> {
    let filename = request
        .filename
        .filter(|f| !f.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Filename is required".to_string()))?;

    let filename = state.assets.delete(&filename).await?;

    Ok(Json(DeleteAssetResponse {
        success: true,
        message: "Asset deleted successfully".to_string(),
        filename,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_name_strips_client_paths() {
        assert_eq!(upload_name("C:\\Users\\ada\\logo.png"), "logo.png");
        assert_eq!(upload_name("photos/bread.jpg"), "bread.jpg");
        assert_eq!(upload_name("plain.webp"), "plain.webp");
    }
}
