//
//  imgur-album-upload
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Imgur Album Upload Library
//!
//! Publishes a local directory of images to Imgur as a single album and
//! returns the album's share link.
//!
//! ## Module Structure
//!
//! - [`cli`]: Command-line interface definition using clap
//! - [`config`]: Credential loading from `secrets.env` and the environment
//! - [`api`]: Blocking HTTP client for the Imgur API
//! - [`upload`]: Directory-to-album upload orchestration and progress output
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use imgur_album_upload::api::ImgurClient;
//! use imgur_album_upload::config::load_credentials;
//! use imgur_album_upload::upload::{AlbumRef, TerminalProgress, Uploader};
//!
//! let credentials = load_credentials(Path::new("secrets.env"))?;
//! let client = ImgurClient::new(&credentials)?;
//! let album = AlbumRef::parse("https://imgur.com/a/abc123")?;
//!
//! let mut uploader = Uploader::new(client, TerminalProgress::new(false));
//! let summary = uploader.upload_album(Path::new("photos"), Some(&album))?;
//! println!("{} images in {}", summary.images.len(), summary.album_url);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Command-line interface definition.
pub mod cli;

/// Imgur API client.
///
/// Handles authentication headers, proxy routing, the response envelope
/// and structured API errors.
pub mod api;

/// Credential loading.
pub mod config;

/// Album upload orchestration.
pub mod upload;

pub use api::ImgurClient;
pub use cli::Cli;
pub use config::Credentials;
pub use upload::Uploader;

/// Binary name, also the user-agent prefix.
pub const APP_NAME: &str = "album-upload";

/// Application version constant, from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// # Example
///
/// ```rust,no_run
/// use imgur_album_upload::exit_codes;
/// use std::process;
///
/// process::exit(exit_codes::AUTH_ERROR);
/// ```
pub mod exit_codes {
    /// Every file was uploaded.
    pub const SUCCESS: i32 = 0;

    /// Album creation or an upload failed, or the run hit a transport error.
    pub const ERROR: i32 = 1;

    /// Credentials are missing or unusable.
    ///
    /// Set `CLIENT_ID` in `secrets.env` or the environment.
    pub const AUTH_ERROR: i32 = 4;
}
