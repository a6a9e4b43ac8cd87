//
//  imgur-album-upload
//  api/error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Error types for the Imgur API client.
//!
//! The client never decides whether a failure is fatal. It only reports what
//! went wrong:
//!
//! | Variant | Cause |
//! |---------|-------|
//! | [`ClientError::Api`] | The service answered with `success: false` or a non-2xx status |
//! | [`ClientError::Http`] | Connection, TLS or other transport failure |
//! | [`ClientError::Decode`] | The response body was not the expected JSON envelope |
//! | [`ClientError::InvalidCredentials`] | A credential is not a valid header value |
//! | [`ClientError::ReadFile`] | A local image could not be read before upload |

use std::path::PathBuf;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// A failure reported by the remote service itself.
///
/// Carries the server-supplied message and the HTTP status of the response.
///
/// # Example
///
/// ```rust
/// use imgur_album_upload::api::ApiError;
///
/// let err = ApiError::new("File is over the size limit", 400);
/// assert_eq!(err.to_string(), "File is over the size limit (HTTP 400)");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (HTTP {status})")]
pub struct ApiError {
    /// Human readable message taken from the response payload.
    pub message: String,
    /// HTTP status code of the response.
    pub status: u16,
}

impl ApiError {
    pub fn new(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }

    /// Builds an error from the `data` payload of a failed response.
    ///
    /// Imgur reports failures in one of two shapes:
    ///
    /// ```json
    /// {"data": {"error": "Album not found", "request": "/3/image", "method": "POST"}}
    /// {"data": {"error": {"message": "Too large", "code": 1003}}}
    /// ```
    ///
    /// When neither is present the HTTP reason phrase is used instead.
    pub fn from_payload(data: &Value, status: StatusCode) -> Self {
        let error = data.get("error");

        let message = error
            .and_then(|e| e.as_str())
            .or_else(|| error.and_then(|e| e.get("message")).and_then(|m| m.as_str()))
            .map(str::to_string)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });

        Self::new(message, status.as_u16())
    }
}

/// Unified error type for every [`ImgurClient`](super::ImgurClient) operation.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The service rejected the request.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A network-level error occurred during the request.
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be parsed.
    #[error("Malformed response (HTTP {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// A credential cannot be sent as an HTTP header value.
    #[error("Invalid characters in {0} credential")]
    InvalidCredentials(&'static str),

    /// An image file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ClientError {
    /// Returns the underlying [`ApiError`] if the service rejected the request.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    /// The message shown to the user in a diagnostic line.
    ///
    /// For API failures this is exactly the server's message; everything
    /// else uses the full display form.
    pub fn diagnostic(&self) -> String {
        match self {
            Self::Api(err) => err.message.clone(),
            other => other.to_string(),
        }
    }
}
