//! Cloudinary-backed media gateway.
//!
//! Uploads and deletes go through the signed REST API. Every parameter sent
//! besides `file`, `api_key` and the signature itself is part of the signed
//! string, sorted by name.

use std::time::Duration;

use anyhow::Context as _;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::config::MediaConfig;
use crate::domain::repository::MediaGateway;
use crate::domain::types::{AssetKind, MediaAsset, Upload};
use crate::error::CatalogError;

const API_BASE: &str = "https://api.cloudinary.com/v1_1";

const AVATAR_TRANSFORMATION: &str = "ar_5:6,c_thumb,g_face,h_150,z_0.75";
const POSTER_TRANSFORMATION: &str = "w_1280,h_720";
const POSTER_BREAKPOINTS: &str = r#"[{"create_derived":true,"max_width":640,"max_images":3}]"#;

#[derive(Clone)]
pub struct CloudinaryGateway {
    client: Client,
    config: MediaConfig,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
    #[serde(default)]
    responsive_breakpoints: Vec<BreakpointSet>,
}

#[derive(Debug, Deserialize)]
struct BreakpointSet {
    #[serde(default)]
    breakpoints: Vec<Breakpoint>,
}

#[derive(Debug, Deserialize)]
struct Breakpoint {
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

impl CloudinaryGateway {
    pub fn new(config: &MediaConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("build media http client")?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn endpoint(&self, kind: AssetKind, action: &str) -> String {
        format!(
            "{API_BASE}/{}/{}/{action}",
            self.config.cloud_name,
            kind.resource_type()
        )
    }

    /// Signed parameters for an upload of `kind`, excluding the file.
    fn upload_params(kind: AssetKind, timestamp: i64) -> Vec<(&'static str, String)> {
        let mut params = vec![("timestamp", timestamp.to_string())];
        match kind {
            AssetKind::Avatar => {
                params.push(("transformation", AVATAR_TRANSFORMATION.to_owned()));
            }
            AssetKind::Poster => {
                params.push(("transformation", POSTER_TRANSFORMATION.to_owned()));
                params.push(("responsive_breakpoints", POSTER_BREAKPOINTS.to_owned()));
            }
            AssetKind::Trailer => {}
        }
        params
    }

    fn signed_form(&self, params: Vec<(&'static str, String)>) -> Form {
        let signature = sign(&params, &self.config.api_secret);
        let mut form = Form::new()
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");
        for (key, value) in params {
            form = form.text(key, value);
        }
        form
    }
}

/// Hex SHA-256 of `k1=v1&k2=v2...` (sorted by key) followed by the secret.
pub fn sign(params: &[(&str, String)], api_secret: &str) -> String {
    let mut sorted: Vec<&(&str, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

fn upstream(kind: AssetKind, action: &str, err: impl std::fmt::Display) -> CatalogError {
    tracing::error!(kind = kind.label(), action, error = %err, "media host request failed");
    CatalogError::Upstream(format!("Could not {action} {}", kind.label()))
}

impl MediaGateway for CloudinaryGateway {
    async fn upload(&self, file: &Upload, kind: AssetKind) -> Result<MediaAsset, CatalogError> {
        let params = Self::upload_params(kind, chrono::Utc::now().timestamp());
        let part = Part::bytes(file.bytes.to_vec())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| upstream(kind, "upload", e))?;
        let form = self.signed_form(params).part("file", part);

        let response = self
            .client
            .post(self.endpoint(kind, "upload"))
            .multipart(form)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| upstream(kind, "upload", e))?;
        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| upstream(kind, "upload", e))?;

        let responsive = body
            .responsive_breakpoints
            .into_iter()
            .next()
            .map(|set| set.breakpoints.into_iter().map(|b| b.secure_url).collect())
            .unwrap_or_default();
        tracing::debug!(kind = kind.label(), public_id = %body.public_id, "media uploaded");
        Ok(MediaAsset {
            url: body.secure_url,
            public_id: body.public_id,
            responsive,
        })
    }

    async fn delete(&self, public_id: &str, kind: AssetKind) -> Result<(), CatalogError> {
        let params = vec![
            ("public_id", public_id.to_owned()),
            ("timestamp", chrono::Utc::now().timestamp().to_string()),
        ];
        let response = self
            .client
            .post(self.endpoint(kind, "destroy"))
            .multipart(self.signed_form(params))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| upstream(kind, "remove", e))?;
        let body: DestroyResponse = response
            .json()
            .await
            .map_err(|e| upstream(kind, "remove", e))?;
        if body.result != "ok" {
            return Err(upstream(kind, "remove", format!("result {}", body.result)));
        }
        Ok(())
    }
}
