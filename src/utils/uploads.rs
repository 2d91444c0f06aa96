use crate::utils::error::AppError;
use actix_multipart::Field;
use actix_web::web;
use futures::StreamExt;
use std::env;
use std::path::{Path, PathBuf};

/// Hard cap for a single profile photo.
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

pub fn upload_dir() -> PathBuf {
    PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()))
}

/// Strips path components and replaces anything outside [A-Za-z0-9._-].
pub fn sanitize_filename(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("photo");

    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

pub fn allowed_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Persists an uploaded photo field under the upload directory and returns
/// the public `/uploads/...` path. Returns `Ok(None)` when the form carried
/// an empty file field (browser submit with no file selected).
pub async fn save_photo(field: &mut Field) -> Result<Option<String>, AppError> {
    let original = field
        .content_disposition()
        .get_filename()
        .map(sanitize_filename)
        .unwrap_or_default();

    if original.is_empty() {
        // Drain the empty field so the multipart stream stays consumable.
        while let Some(chunk) = field.next().await {
            chunk.map_err(|e| AppError::Upload(format!("Malformed upload: {}", e)))?;
        }
        return Ok(None);
    }

    if !allowed_extension(&original) {
        return Err(AppError::Upload(format!(
            "Unsupported photo type: {} (allowed: {})",
            original,
            ALLOWED_EXTENSIONS.join(", ")
        )));
    }

    let mut data: Vec<u8> = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| AppError::Upload(format!("Malformed upload: {}", e)))?;
        if data.len() + chunk.len() > MAX_PHOTO_BYTES {
            return Err(AppError::Upload(format!(
                "Photo exceeds maximum size of {} bytes",
                MAX_PHOTO_BYTES
            )));
        }
        data.extend_from_slice(&chunk);
    }

    // Same naming convention the frontend already expects: epoch millis
    // prefix keeps concurrent uploads of the same filename apart.
    let filename = format!("{}-{}", chrono::Utc::now().timestamp_millis(), original);
    let dir = upload_dir();
    let path = dir.join(&filename);

    let size = data.len();
    web::block(move || -> std::io::Result<()> {
        std::fs::create_dir_all(&dir)?;
        std::fs::write(&path, &data)
    })
    .await
    .map_err(|e| AppError::Io(format!("Upload task failed: {}", e)))?
    .map_err(|e| AppError::Io(format!("Failed to write photo: {}", e)))?;

    log::info!("Stored photo {} ({} bytes)", filename, size);

    Ok(Some(format!("/uploads/{}", filename)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_directories_and_odd_characters() {
        assert_eq!(sanitize_filename("me.png"), "me.png");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("my photo (1).jpg"), "my_photo__1_.jpg");
        assert_eq!(sanitize_filename("/absolute/path/pic.webp"), "pic.webp");
    }

    #[test]
    fn extension_allowlist() {
        assert!(allowed_extension("avatar.jpg"));
        assert!(allowed_extension("avatar.JPEG"));
        assert!(allowed_extension("avatar.webp"));
        assert!(!allowed_extension("avatar.exe"));
        assert!(!allowed_extension("avatar.svg"));
        assert!(!allowed_extension("noextension"));
    }

    #[test]
    fn upload_dir_defaults_to_uploads() {
        if env::var("UPLOAD_DIR").is_err() {
            assert_eq!(upload_dir(), PathBuf::from("uploads"));
        }
    }
}
