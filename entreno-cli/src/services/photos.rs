//! Progress photo gallery backed by object storage.

use chrono::Utc;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::GenericImageView;
use uuid::Uuid;

use super::{credentials, Result};
use crate::context::AppContext;
use crate::models::{NewProgressPhoto, ProgressPhoto, RecordId};

const TABLE: &str = "entrenamiento_selfies";

/// Longest side after resizing
pub const MAX_DIMENSION: u32 = 1200;
pub const JPEG_QUALITY: u8 = 80;

/// Size that fits within `max`×`max` keeping the aspect ratio. Never upscales.
pub fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width <= max && height <= max {
        return (width, height);
    }

    let scale = (max as f64 / width as f64).min(max as f64 / height as f64);
    let new_width = ((width as f64 * scale).round() as u32).clamp(1, max);
    let new_height = ((height as f64 * scale).round() as u32).clamp(1, max);
    (new_width, new_height)
}

/// Decode any supported image, shrink it and re-encode as JPEG
pub fn prepare_image(bytes: &[u8]) -> Result<Vec<u8>> {
    let image = image::load_from_memory(bytes)?;
    let original = image.dimensions();
    let (width, height) = fit_within(original.0, original.1, MAX_DIMENSION);

    let image = if (width, height) == original {
        image
    } else {
        image.resize_exact(width, height, FilterType::Triangle)
    };

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY).encode_image(&image.to_rgb8())?;

    tracing::debug!("Prepared {}x{} JPEG, {} bytes", width, height, out.len());
    Ok(out)
}

/// `selfies/<user_id>/<unix_millis>.jpg`
pub fn object_path(user_id: Uuid, unix_millis: i64) -> String {
    format!("selfies/{}/{}.jpg", user_id, unix_millis)
}

/// Upload a photo and record it in the gallery. Returns the public URL.
///
/// If recording the row fails, the uploaded object is removed again
/// (best-effort) and the insert error is returned.
pub async fn upload(ctx: &AppContext, bytes: &[u8], description: &str) -> Result<String> {
    let jpeg = prepare_image(bytes)?;
    let (token, user_id) = credentials(ctx).await?;

    let bucket = ctx.backend.storage(&ctx.config.backend.storage_bucket, &token);
    let path = object_path(user_id, Utc::now().timestamp_millis());

    bucket.upload(&path, jpeg, "image/jpeg").await?;
    let image_url = bucket.public_url(&path);

    let row = NewProgressPhoto {
        user_id,
        image_url: image_url.clone(),
        description: description.trim().to_string(),
    };

    if let Err(e) = ctx.backend.table(TABLE, &token).insert(&row).await {
        if let Err(cleanup) = bucket.remove(&[path.clone()]).await {
            tracing::warn!("Failed to remove orphaned upload {}: {}", path, cleanup);
        }
        return Err(e.into());
    }

    tracing::info!("Uploaded progress photo {}", path);
    Ok(image_url)
}

/// Gallery, newest first
pub async fn list(ctx: &AppContext) -> Result<Vec<ProgressPhoto>> {
    let (token, user_id) = credentials(ctx).await?;

    let photos = ctx
        .backend
        .table(TABLE, &token)
        .eq("user_id", user_id)
        .order("created_at", false)
        .fetch()
        .await?;
    Ok(photos)
}

pub async fn delete(
    ctx: &AppContext,
    gallery: &mut Vec<ProgressPhoto>,
    id: &RecordId,
) -> Result<()> {
    let (token, _) = credentials(ctx).await?;

    ctx.backend.table(TABLE, &token).eq("id", id).delete().await?;
    gallery.retain(|p| &p.id != id);
    Ok(())
}
