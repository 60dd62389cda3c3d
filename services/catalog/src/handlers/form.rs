//! Request body plumbing shared by the handlers: JSON rejections mapped to
//! the catalog error body, and multipart forms read into text fields and
//! file uploads.

use std::collections::HashMap;

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Multipart, Query};
use serde::de::DeserializeOwned;

use crate::domain::types::Upload;
use crate::error::CatalogError;
use crate::usecase::movie::MovieInput;

/// Unwrap a JSON body, turning axum's rejection into `InvalidRequest`.
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, CatalogError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected json body");
            Err(CatalogError::invalid(rejection.body_text()))
        }
    }
}

/// Unwrap query parameters, turning axum's rejection into `InvalidRequest`.
pub fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, CatalogError> {
    query
        .map(|Query(value)| value)
        .map_err(|rejection| CatalogError::invalid(rejection.body_text()))
}

/// A fully buffered multipart form.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, Upload>,
}

impl FormData {
    pub async fn read(multipart: Result<Multipart, MultipartRejection>) -> Result<Self, CatalogError> {
        let mut multipart = multipart.map_err(|e| CatalogError::invalid(e.body_text()))?;
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| CatalogError::invalid(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            match field.file_name().map(str::to_owned) {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_owned();
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| CatalogError::invalid(e.body_text()))?;
                    // Browsers send an empty part for an untouched file input.
                    if bytes.is_empty() {
                        continue;
                    }
                    form.files.insert(
                        name,
                        Upload {
                            file_name,
                            content_type,
                            bytes,
                        },
                    );
                }
                None => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| CatalogError::invalid(e.body_text()))?;
                    form.fields.insert(name, text);
                }
            }
        }
        Ok(form)
    }

    /// Field value, or the empty string when absent.
    pub fn text(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    /// Field value when present and not blank.
    pub fn opt_text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
    }

    /// Decode a JSON-encoded field. Absent or blank fields yield `None`.
    pub fn json<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, CatalogError> {
        let Some(raw) = self.opt_text(name) else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|_| CatalogError::invalid(format!("Invalid {name}!")))
    }

    pub fn take_file(&mut self, name: &str) -> Option<Upload> {
        self.files.remove(name)
    }

    /// Movie fields as sent by the admin client. List fields and the
    /// trailer arrive JSON-encoded.
    pub fn movie_input(&self) -> Result<MovieInput, CatalogError> {
        Ok(MovieInput {
            title: self.text("title"),
            story_line: self.text("storyLine"),
            director: self.opt_text("director"),
            writers: self.json("writers")?.unwrap_or_default(),
            cast: self.json("cast")?.unwrap_or_default(),
            genres: self.json("genres")?.unwrap_or_default(),
            tags: self.json("tags")?.unwrap_or_default(),
            release_date: self.text("releaseDate"),
            status: self.text("status"),
            kind: self.text("type"),
            language: self.text("language"),
            trailer: self.json("trailer")?,
        })
    }
}
