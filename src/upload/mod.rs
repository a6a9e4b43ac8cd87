//
//  imgur-album-upload
//  upload/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Album Upload
//!
//! Uploads every file of one directory into a single album.
//!
//! A run goes `START → ENSURE_ALBUM → UPLOADING[1..n] → DONE` and stops at
//! the first failure. Nothing is rolled back: images that were already
//! uploaded and an album that was already created stay on the service.
//!
//! ## Ordering
//!
//! Files are uploaded in ascending file-name order, one request at a time.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::api::{AlbumOptions, ClientError, Image, ImageEncoding, ImageHost, UploadOptions};

mod album_ref;
mod progress;

pub use album_ref::{share_url, AlbumRef, AlbumRefError, SHARE_ROOT};
pub use progress::{completion_line, progress_line, Progress, TerminalProgress};

/// Why a run was aborted.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("failed creating album: {}", .0.diagnostic())]
    CreateAlbum(#[source] ClientError),

    #[error("failed uploading {}: {}", .path.display(), .source.diagnostic())]
    Upload {
        path: PathBuf,
        #[source]
        source: ClientError,
    },

    #[error("failed listing {}: {source}", .path.display())]
    ListDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadSummary {
    pub directory: PathBuf,
    pub album_id: String,
    pub album_url: String,
    /// `true` if the album was created by this run.
    pub created_album: bool,
    /// Delete hash of a newly created anonymous album.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletehash: Option<String>,
    pub images: Vec<Image>,
}

/// Lists the regular files of `directory`, sorted by file name.
///
/// Symlinks are followed. Subdirectories and other entries are skipped.
pub fn list_images(directory: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(directory)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        } else {
            tracing::debug!("Skipping {}", path.display());
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Drives one directory-to-album upload run.
///
/// # Example
///
/// ```rust,no_run
/// use std::path::Path;
/// use imgur_album_upload::api::ImgurClient;
/// use imgur_album_upload::config::Credentials;
/// use imgur_album_upload::upload::{TerminalProgress, Uploader};
///
/// let client = ImgurClient::new(&Credentials::new("my-client-id"))?;
/// let mut uploader = Uploader::new(client, TerminalProgress::new(false));
/// let summary = uploader.upload_album(Path::new("photos"), None)?;
/// println!("{}", summary.album_url);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Uploader<H, P> {
    host: H,
    progress: P,
    album_options: AlbumOptions,
    encoding: ImageEncoding,
    extra_metadata: BTreeMap<String, String>,
}

impl<H: ImageHost, P: Progress> Uploader<H, P> {
    pub fn new(host: H, progress: P) -> Self {
        Self {
            host,
            progress,
            album_options: AlbumOptions::default(),
            encoding: ImageEncoding::default(),
            extra_metadata: BTreeMap::new(),
        }
    }

    /// Title and description used when a new album is created.
    pub fn with_album_options(mut self, options: AlbumOptions) -> Self {
        self.album_options = options;
        self
    }

    pub fn with_encoding(mut self, encoding: ImageEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Extra form fields sent with every image.
    pub fn with_metadata(mut self, metadata: BTreeMap<String, String>) -> Self {
        self.extra_metadata = metadata;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn progress(&self) -> &P {
        &self.progress
    }

    /// Uploads every file in `directory` into `album`, creating an album
    /// when none is given.
    ///
    /// The directory is listed before any request is made, so an unreadable
    /// directory never leaves an empty album behind.
    ///
    /// # Errors
    ///
    /// Stops at the first failure, reports it through [`Progress::failed`]
    /// and returns it. Files after the failing one are never attempted.
    pub fn upload_album(
        &mut self,
        directory: &Path,
        album: Option<&AlbumRef>,
    ) -> Result<UploadSummary, UploadError> {
        let result = self.run(directory, album);
        if let Err(err) = &result {
            self.progress.failed(&err.to_string());
        }
        result
    }

    fn run(
        &mut self,
        directory: &Path,
        album: Option<&AlbumRef>,
    ) -> Result<UploadSummary, UploadError> {
        let files = list_images(directory).map_err(|source| UploadError::ListDirectory {
            path: directory.to_path_buf(),
            source,
        })?;

        let (album_id, deletehash, created_album) = match album {
            Some(album) => {
                tracing::info!("Uploading into existing album {}", album);
                (album.id().to_string(), None, false)
            }
            None => {
                let created = self
                    .host
                    .create_album(&self.album_options)
                    .map_err(UploadError::CreateAlbum)?;
                (created.id, created.deletehash, true)
            }
        };

        let options = UploadOptions {
            album_id: album_id.clone(),
            encoding: self.encoding,
            extra_metadata: self.extra_metadata.clone(),
        };

        let total = files.len();
        let mut images = Vec::with_capacity(total);

        for (i, path) in files.into_iter().enumerate() {
            self.progress.uploading(&path, i + 1, total);

            let image = self
                .host
                .upload_image(&path, &options)
                .map_err(|source| UploadError::Upload {
                    path: path.clone(),
                    source,
                })?;

            tracing::debug!("Uploaded {} as {}", path.display(), image.id);
            images.push(image);
        }

        let summary = UploadSummary {
            directory: directory.to_path_buf(),
            album_url: share_url(&album_id),
            album_id,
            created_album,
            deletehash,
            images,
        };

        self.progress.finished(&summary);
        Ok(summary)
    }
}
