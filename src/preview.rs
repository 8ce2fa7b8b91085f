//! Best-effort product image preview.

use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use crate::crawler::ScrapedField;
use crate::error::Result;

/// File extension for a downloaded image, from its content type or URL.
pub fn image_extension(content_type: Option<&str>, url: &str) -> &'static str {
    let from_type = content_type.and_then(|ct| {
        let mime = ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase();
        match mime.as_str() {
            "image/jpeg" | "image/jpg" => Some("jpg"),
            "image/png" => Some("png"),
            "image/webp" => Some("webp"),
            "image/gif" => Some("gif"),
            _ => None,
        }
    });

    from_type.unwrap_or_else(|| {
        let path = url.split(['?', '#']).next().unwrap_or(url).to_ascii_lowercase();
        if path.ends_with(".png") {
            "png"
        } else if path.ends_with(".webp") {
            "webp"
        } else if path.ends_with(".gif") {
            "gif"
        } else {
            "jpg"
        }
    })
}

/// Download the image into the temp directory.
pub async fn download_image(url: &str, timeout: Duration) -> Result<PathBuf> {
    let client = reqwest::Client::builder()
        .user_agent(crate::stealth::random_user_agent())
        .timeout(timeout)
        .build()?;

    let response = client.get(url).send().await?.error_for_status()?;
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = response.bytes().await?;

    let extension = image_extension(content_type.as_deref(), url);
    let path = std::env::temp_dir().join(format!("review-analyzer-preview.{}", extension));
    tokio::fs::write(&path, &bytes).await?;

    info!(path = %path.display(), bytes = bytes.len(), "image downloaded");
    Ok(path)
}

/// Show the product image in the system viewer. Never fails the run.
pub async fn display_image(image: &ScrapedField, timeout: Duration) {
    let Some(url) = image.value().filter(|u| u.starts_with("http")) else {
        println!("Image URL is invalid: {}", image);
        return;
    };

    match download_image(url, timeout).await {
        Ok(path) => {
            if let Err(e) = open::that(&path) {
                warn!(error = %e, "could not open image viewer");
                println!("Error displaying image: {}", e);
            }
        }
        Err(e) => {
            warn!(error = %e, "image download failed");
            println!("Error displaying image: {}", e);
        }
    }
}
