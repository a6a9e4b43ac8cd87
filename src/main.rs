//
//  imgur-album-upload
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use imgur_album_upload::cli::{self, Cli};
use imgur_album_upload::exit_codes;

fn main() {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Handle result and exit
    match cli.run() {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            if !cli::already_reported(&e) {
                eprintln!("Error: {e:#}");
            }
            std::process::exit(cli::exit_code(&e));
        }
    }
}

/// Initialize logging based on environment
///
/// Logs go to stderr so they never break the stdout progress line.
fn init_logging() {
    let filter = EnvFilter::try_from_env("ALBUM_UPLOAD_DEBUG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
