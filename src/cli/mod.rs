//
//  imgur-album-upload
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI definition using clap derive macros
//!
//! ## Examples
//!
//! ```bash
//! # Create a new album from a folder
//! album-upload ./photos
//!
//! # Add the folder to an existing album
//! album-upload ./photos --album https://imgur.com/a/abc123
//!
//! # Title the new album and tag every image
//! album-upload ./photos -t "Summer 2025" -F description="Lake trip"
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::api::{AlbumOptions, ClientError, ImageEncoding, ImgurClient};
use crate::config::{load_credentials, ConfigError, DEFAULT_SECRETS_FILE};
use crate::exit_codes;
use crate::upload::{AlbumRef, TerminalProgress, UploadError, Uploader};

/// Upload a directory of images to Imgur as a single album
#[derive(Parser, Debug)]
#[command(
    name = crate::APP_NAME,
    version,
    about = "Upload a directory of images to Imgur as a single album",
    long_about = "album-upload sends every file in a directory to Imgur, in file-name order,\n\
                  and prints the album's share link when done.\n\n\
                  Credentials are read from secrets.env and the environment:\n\
                  CLIENT_ID (required), ACCESS_TOKEN, MASHAPE_KEY."
)]
pub struct Cli {
    /// Directory of images to upload
    pub directory: PathBuf,

    /// Existing album id or link to upload into instead of creating one
    #[arg(long, short = 'a', value_name = "ALBUM", value_parser = AlbumRef::parse)]
    pub album: Option<AlbumRef>,

    /// Title for the new album
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// Description for the new album
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Extra form field sent with every image (can be specified multiple times)
    #[arg(long, short = 'F', value_name = "KEY=VALUE", value_parser = parse_field, action = clap::ArgAction::Append)]
    pub field: Vec<(String, String)>,

    /// Send images as base64 text instead of binary (legacy)
    #[arg(long)]
    pub base64: bool,

    /// Secrets file with KEY=VALUE credentials
    #[arg(long, env = "ALBUM_UPLOAD_SECRETS", default_value = DEFAULT_SECRETS_FILE)]
    pub secrets: PathBuf,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        let credentials = load_credentials(&self.secrets)?;
        tracing::debug!("Loaded {:?}", credentials);

        let client = ImgurClient::new(&credentials)?;

        let album_options = AlbumOptions {
            title: self.title.clone(),
            description: self.description.clone(),
        };
        if self.album.is_some() && album_options != AlbumOptions::default() {
            tracing::warn!("--title and --description only apply to new albums");
        }

        let encoding = if self.base64 {
            ImageEncoding::Base64
        } else {
            ImageEncoding::Binary
        };

        let mut uploader = Uploader::new(client, TerminalProgress::new(self.json))
            .with_album_options(album_options)
            .with_encoding(encoding)
            .with_metadata(self.field.iter().cloned().collect());

        uploader.upload_album(&self.directory, self.album.as_ref())?;
        Ok(())
    }
}

/// Parses a `key=value` field argument.
fn parse_field(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid field '{}': expected KEY=VALUE", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid field '{}': empty key", s));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Maps a failed run to its process exit code.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<ConfigError>().is_some() {
        return exit_codes::AUTH_ERROR;
    }
    if let Some(ClientError::InvalidCredentials(_)) = err.downcast_ref::<ClientError>() {
        return exit_codes::AUTH_ERROR;
    }
    exit_codes::ERROR
}

/// Returns `true` if the error was already shown to the user by the uploader.
pub fn already_reported(err: &anyhow::Error) -> bool {
    err.downcast_ref::<UploadError>().is_some()
}
