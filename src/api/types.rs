//
//  imgur-album-upload
//  api/types.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Request and response types for the Imgur API.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The envelope every Imgur response is wrapped in.
///
/// ```json
/// {"data": {"id": "abc123", "deletehash": "..."}, "success": true, "status": 200}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Whether the service accepted the request.
    pub success: bool,

    /// HTTP status echoed by the service.
    #[serde(default)]
    pub status: u16,

    /// The payload: the requested resource on success, error details otherwise.
    #[serde(default)]
    pub data: Value,
}

/// An album as returned by `POST /album`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    /// Album identifier, as used in `https://imgur.com/a/<id>`.
    pub id: String,

    /// Public link. Imgur omits it for freshly created anonymous albums.
    #[serde(default)]
    pub link: Option<String>,

    /// Hash required to modify an anonymous album.
    #[serde(default)]
    pub deletehash: Option<String>,
}

/// An uploaded image as returned by `POST /image`.
///
/// Only `id` is required. The descriptive fields are read leniently: a
/// value of an unexpected shape is dropped rather than failing the upload,
/// since the image is already stored by then.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: String,

    #[serde(default, deserialize_with = "lenient")]
    pub link: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub deletehash: Option<String>,

    /// MIME type as detected by the service.
    #[serde(default, rename = "type", deserialize_with = "lenient")]
    pub mime: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub width: Option<u32>,

    #[serde(default, deserialize_with = "lenient")]
    pub height: Option<u32>,

    /// Size in bytes.
    #[serde(default, deserialize_with = "lenient")]
    pub size: Option<u64>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// How image bytes are put on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageEncoding {
    /// Raw bytes as a multipart file part.
    #[default]
    Binary,

    /// Legacy: base64 text in a form field. Inflates the body by about a third.
    Base64,
}

impl ImageEncoding {
    /// The value of the `type` form field for this encoding.
    pub fn as_field(&self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Base64 => "base64",
        }
    }
}

/// Fields sent along with every image upload.
///
/// # Example
///
/// ```rust
/// use imgur_album_upload::api::{ImageEncoding, UploadOptions};
///
/// let options = UploadOptions::new("abc123").with_metadata("title", "Holiday");
/// assert_eq!(options.encoding, ImageEncoding::Binary);
/// assert_eq!(options.extra_metadata["title"], "Holiday");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadOptions {
    /// Album the image is added to.
    pub album_id: String,

    pub encoding: ImageEncoding,

    /// Additional form fields, e.g. `title` or `description`.
    pub extra_metadata: BTreeMap<String, String>,
}

impl UploadOptions {
    pub fn new(album_id: impl Into<String>) -> Self {
        Self {
            album_id: album_id.into(),
            ..Default::default()
        }
    }

    pub fn with_encoding(mut self, encoding: ImageEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_metadata.insert(key.into(), value.into());
        self
    }
}

/// Optional fields for album creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumOptions {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl AlbumOptions {
    /// Form fields to send; empty when nothing is set.
    pub fn fields(&self) -> Vec<(String, String)> {
        let mut fields = Vec::new();
        if let Some(title) = &self.title {
            fields.push(("title".to_string(), title.clone()));
        }
        if let Some(description) = &self.description {
            fields.push(("description".to_string(), description.clone()));
        }
        fields
    }
}
