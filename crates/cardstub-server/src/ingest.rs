// SPDX-License-Identifier: BUSL-1.1
//! Attachment request ingestion.
//!
//! Pulls an add-attachment request apart into merged request values and the
//! optional uploaded file. The file part is digested in a single streaming
//! pass — each chunk is fed to the SHA-256 accumulator and counted as it
//! comes off the wire, so the payload is never duplicated into a second
//! buffer. Non-multipart bodies are accepted (link-only attachments carry
//! their parameters in the query string or an urlencoded form).

use std::collections::HashMap;

use axum::extract::multipart::{Field, Multipart};
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::header::CONTENT_TYPE;

use cardstub_core::Sha256Accumulator;

use crate::error::ApiError;
use crate::extract::Values;

/// Name of the multipart part carrying the uploaded file.
const FILE_PART: &str = "file";

/// Outcome of the single-pass digest run over an uploaded file part.
#[derive(Debug, Clone)]
pub struct UploadSummary {
    /// Total payload length in bytes. Zero-length uploads are valid.
    pub bytes: u64,
    /// Lowercase hex SHA-256 of the payload.
    pub chksum: String,
    /// Content type declared on the part itself, empty when absent.
    pub mime_type: String,
    /// Filename declared on the part itself, empty when absent.
    pub file_name: String,
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|ct| {
            ct.trim_start()
                .to_ascii_lowercase()
                .starts_with("multipart/form-data")
        })
        .unwrap_or(false)
}

/// Read an add-attachment request: merged values plus the optional upload.
///
/// For multipart bodies, text parts merge into the values after the query
/// parameters (query wins); the first part named `file` is ingested; any
/// other file-bearing part is drained and ignored.
pub async fn read_attachment_request(
    req: Request,
) -> Result<(Values, Option<UploadSummary>), ApiError> {
    if !is_multipart(&req) {
        let values = Values::from_request(req, &()).await?;
        return Ok((values, None));
    }

    let (mut parts, body) = req.into_parts();
    let Query(query) = Query::<HashMap<String, String>>::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| ApiError::UnreadableBody)?;
    let mut values = Values::from_query(query);

    let req = Request::from_parts(parts, body);
    let mut multipart = Multipart::from_request(req, &())
        .await
        .map_err(|_| ApiError::UnreadableBody)?;

    let mut upload: Option<UploadSummary> = None;
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::UnreadableBody)?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if name == FILE_PART && upload.is_none() {
            upload = Some(ingest_file_part(&mut field).await?);
        } else if field.file_name().is_none() {
            if let Ok(text) = field.text().await {
                values.merge(name, text);
            }
        }
    }

    Ok((values, upload))
}

/// Stream one file part through the digest accumulator, counting bytes.
async fn ingest_file_part(field: &mut Field<'_>) -> Result<UploadSummary, ApiError> {
    let mime_type = field.content_type().unwrap_or_default().to_string();
    let file_name = field.file_name().unwrap_or_default().to_string();

    let mut accumulator = Sha256Accumulator::new();
    let mut bytes: u64 = 0;
    while let Some(chunk) = field.chunk().await.map_err(|_| ApiError::UnreadableBody)? {
        bytes += chunk.len() as u64;
        accumulator.update(&chunk);
    }

    Ok(UploadSummary {
        bytes,
        chksum: accumulator.finalize_hex(),
        mime_type,
        file_name,
    })
}
