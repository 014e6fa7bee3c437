// src/media.rs
//
// Image upload to the CDN. The rest of the app only sees `ImageHost`:
// bytes in, public URL out.

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::CdnConfig;

pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("unsupported content type `{0}`")]
    UnsupportedType(String),
    #[error("image is larger than {MAX_IMAGE_BYTES} bytes")]
    TooLarge,
    #[error("image is empty")]
    Empty,
    #[error("upload request failed: {0}")]
    RequestFailed(String),
    #[error("CDN rejected upload: {0}")]
    Rejected(String),
}

pub trait ImageHost: Send + Sync {
    fn upload(&self, bytes: Vec<u8>, filename: &str, content_type: &str)
        -> Result<String, UploadError>;
}

/// Size and type checks done before anything leaves the process.
pub fn check_image(bytes: &[u8], content_type: &str) -> Result<(), UploadError> {
    let parsed: mime::Mime = content_type
        .parse()
        .map_err(|_| UploadError::UnsupportedType(content_type.to_string()))?;
    if parsed.type_() != mime::IMAGE {
        return Err(UploadError::UnsupportedType(content_type.to_string()));
    }
    if bytes.is_empty() {
        return Err(UploadError::Empty);
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(UploadError::TooLarge);
    }
    Ok(())
}

/// Unsigned uploads against a Cloudinary-style endpoint.
pub struct CloudinaryUploader {
    upload_url: String,
    upload_preset: String,
    client: Client,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    url: Option<String>,
}

impl CloudinaryUploader {
    pub fn new(cfg: &CdnConfig) -> Self {
        Self {
            upload_url: cfg.upload_url.clone(),
            upload_preset: cfg.upload_preset.clone(),
            client: Client::new(),
        }
    }
}

fn url_from_response(body: &str) -> Result<String, UploadError> {
    let parsed: UploadResponse =
        serde_json::from_str(body).map_err(|e| UploadError::Rejected(e.to_string()))?;
    parsed
        .secure_url
        .or(parsed.url)
        .ok_or_else(|| UploadError::Rejected("response carried no url".into()))
}

impl ImageHost for CloudinaryUploader {
    fn upload(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        content_type: &str,
    ) -> Result<String, UploadError> {
        check_image(&bytes, content_type)?;

        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|_| UploadError::UnsupportedType(content_type.to_string()))?;
        let form = Form::new()
            .text("upload_preset", self.upload_preset.clone())
            .part("file", part);

        let resp = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .map_err(|e| UploadError::RequestFailed(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| UploadError::RequestFailed(e.to_string()))?;
        if !status.is_success() {
            return Err(UploadError::Rejected(format!("{status} - {body}")));
        }

        let url = url_from_response(&body)?;
        log::info!("uploaded {filename} to {url}");
        Ok(url)
    }
}
