//
//  imgur-album-upload
//  upload/album_ref.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Album references given on the command line.
//!
//! Users may paste either a bare album id (`abc123`) or the album's share
//! link (`https://imgur.com/a/abc123`). Both resolve to the same [`AlbumRef`].

use std::fmt;

use thiserror::Error;
use url::Url;

/// Public site root used to build share links.
pub const SHARE_ROOT: &str = "https://imgur.com";

const IMGUR_HOSTS: [&str; 3] = ["imgur.com", "www.imgur.com", "m.imgur.com"];

/// An album reference that names no album.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlbumRefError {
    #[error("album id is empty")]
    Empty,

    #[error("'{0}' is an Imgur link without an album id")]
    MissingId(String),
}

/// A normalized album identifier.
///
/// # Example
///
/// ```rust
/// use imgur_album_upload::upload::AlbumRef;
///
/// let album = AlbumRef::parse("https://imgur.com/a/abc123")?;
/// assert_eq!(album.id(), "abc123");
/// assert_eq!(AlbumRef::parse("abc123")?.url(), "https://imgur.com/a/abc123");
/// assert!(AlbumRef::parse("https://imgur.com/a/").is_err());
/// # Ok::<(), imgur_album_upload::upload::AlbumRefError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlbumRef(String);

impl AlbumRef {
    /// Normalizes a bare id or an album share link to the bare id.
    ///
    /// Links are recognized on `imgur.com` (with or without `www.`/`m.`),
    /// with any scheme or none, and may carry a trailing slash, query or
    /// fragment. Anything else is taken as an id and only trimmed.
    ///
    /// # Errors
    ///
    /// Fails on blank input and on Imgur links with no id after `/a/`.
    pub fn parse(input: &str) -> Result<Self, AlbumRefError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(AlbumRefError::Empty);
        }

        match id_from_link(input) {
            Some(Link::Album(id)) => Ok(Self(id)),
            Some(Link::NoId) => Err(AlbumRefError::MissingId(input.to_string())),
            None => Ok(Self(input.to_string())),
        }
    }

    pub fn id(&self) -> &str {
        &self.0
    }

    /// The album's share link, `https://imgur.com/a/<id>`.
    pub fn url(&self) -> String {
        share_url(&self.0)
    }
}

impl fmt::Display for AlbumRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds the share link for an album id.
pub fn share_url(album_id: &str) -> String {
    format!("{}/a/{}", SHARE_ROOT, album_id)
}

enum Link {
    Album(String),
    NoId,
}

/// Returns `None` when `input` is not an Imgur link at all.
fn id_from_link(input: &str) -> Option<Link> {
    let url = match Url::parse(input) {
        Ok(url) => url,
        Err(_) if input.contains('/') => Url::parse(&format!("https://{}", input)).ok()?,
        Err(_) => return None,
    };

    let host = url.host_str()?;
    if !IMGUR_HOSTS.contains(&host) {
        return None;
    }

    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
    match (segments.next(), segments.next()) {
        (Some("a"), Some(id)) => Some(Link::Album(id.to_string())),
        _ => Some(Link::NoId),
    }
}
