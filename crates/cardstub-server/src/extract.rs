// SPDX-License-Identifier: BUSL-1.1
//! Merged request values and the credential guard.
//!
//! The upstream service accepts its parameters from the query string or the
//! request body interchangeably. [`Values`] presents both as one map —
//! query parameters take precedence over form fields of the same name —
//! so handlers read `values.get("pos")` without caring how it arrived.

use std::collections::HashMap;

use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Form;

use cardstub_core::validate_credentials;

use crate::error::ApiError;

/// Merged view of a request's query parameters and urlencoded form fields.
#[derive(Debug, Default)]
pub struct Values(HashMap<String, String>);

impl Values {
    /// Seed a values map from query parameters alone (the multipart path
    /// merges its text parts in afterwards).
    pub fn from_query(query: HashMap<String, String>) -> Self {
        Self(query)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Bind `name` unless it is already bound — earlier sources win.
    pub fn merge(&mut self, name: String, value: String) {
        self.0.entry(name).or_insert(value);
    }

    /// Credential guard: the first thing every authenticated handler does,
    /// before any store is read or mutated.
    pub fn check_credentials(&self) -> Result<(), ApiError> {
        validate_credentials(self.get("key"), self.get("token"))?;
        Ok(())
    }
}

fn is_urlencoded_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|ct| {
            ct.trim_start()
                .to_ascii_lowercase()
                .starts_with("application/x-www-form-urlencoded")
        })
        .unwrap_or(false)
}

#[async_trait]
impl<S: Send + Sync> FromRequest<S> for Values {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let has_form_body = is_urlencoded_form(&req);

        let (mut parts, body) = req.into_parts();
        let Query(query) = Query::<HashMap<String, String>>::from_request_parts(&mut parts, state)
            .await
            .map_err(|_| ApiError::UnreadableBody)?;
        let mut values = Self(query);

        if has_form_body {
            let req = Request::from_parts(parts, body);
            let Form(form) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|_| ApiError::UnreadableBody)?;
            for (name, value) in form {
                values.merge(name, value);
            }
        }

        Ok(values)
    }
}
