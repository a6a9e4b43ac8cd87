//
//  imgur-album-upload
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Imgur API Module
//!
//! A small blocking client for the Imgur v3 API.
//!
//! ## Module Structure
//!
//! - [`client`]: The [`ImgurClient`] and header construction
//! - [`types`]: Response envelope, [`Album`], [`Image`] and upload options
//! - [`error`]: [`ClientError`] and the structured [`ApiError`]
//!
//! ## Endpoints Used
//!
//! | Method | Endpoint | Purpose |
//! |--------|----------|---------|
//! | `POST` | `/album` | Create an album |
//! | `POST` | `/image` | Upload an image into an album |
//! | any | any | Generic passthrough via [`ImgurClient::request`] |
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use imgur_album_upload::api::{ImgurClient, UploadOptions};
//! use imgur_album_upload::config::Credentials;
//!
//! let client = ImgurClient::new(&Credentials::new("my-client-id"))?;
//! let album = client.create_album()?;
//! let image = client.upload_image(Path::new("cat.jpg"), &UploadOptions::new(&album.id))?;
//! println!("Uploaded {}", image.id);
//! # Ok::<(), imgur_album_upload::api::ClientError>(())
//! ```

use std::path::Path;

pub mod client;
pub mod error;
pub mod types;

pub use client::{auth_headers, content_type, ApiRoots, ImgurClient, RequestBody};
pub use error::{ApiError, ClientError};
pub use types::{Album, AlbumOptions, ApiResponse, Image, ImageEncoding, UploadOptions};

/// The operations the album uploader needs from an image host.
///
/// [`ImgurClient`] is the real implementation. The uploader depends only on
/// this trait so it can be driven by a fake in tests.
pub trait ImageHost {
    /// Creates a new album.
    fn create_album(&self, options: &AlbumOptions) -> Result<Album, ClientError>;

    /// Uploads the file at `path` with the given options.
    fn upload_image(&self, path: &Path, options: &UploadOptions) -> Result<Image, ClientError>;
}
