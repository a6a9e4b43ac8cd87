//
//  imgur-album-upload
//  upload/progress.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! User-visible progress reporting for album uploads.

use std::path::Path;

use console::{style, Term};

use super::UploadSummary;

/// Receives progress events from the [`Uploader`](super::Uploader).
pub trait Progress {
    /// Called before the `index`-th of `total` files (1-based) is uploaded.
    fn uploading(&mut self, path: &Path, index: usize, total: usize);

    /// Called once after every file was uploaded.
    fn finished(&mut self, summary: &UploadSummary);

    /// Called once with a diagnostic line when the run is aborted.
    fn failed(&mut self, diagnostic: &str);
}

/// Formats the in-place progress line.
pub fn progress_line(path: &Path, index: usize, total: usize) -> String {
    format!("Uploading {} ({}/{})", path.display(), index, total)
}

/// Formats the completion sentence.
pub fn completion_line(summary: &UploadSummary) -> String {
    format!(
        "Uploaded {} to {}",
        summary.directory.display(),
        summary.album_url
    )
}

/// Progress on the terminal.
///
/// Output is split over two terms. Progress lines and the failure
/// diagnostic go to the status term. The completion sentence or the JSON
/// summary goes to the output term. In JSON mode the status term is stderr,
/// so stdout carries nothing but the JSON document.
///
/// When the status term is a terminal the progress line is cleared and
/// rewritten in place. Otherwise every update is appended on its own line,
/// since a log file or pipe has no line to rewrite.
pub struct TerminalProgress {
    out: Term,
    status: Term,
    json: bool,
    in_place: bool,
    line_open: bool,
}

impl TerminalProgress {
    pub fn new(json: bool) -> Self {
        if json {
            Self::with_terms(Term::stdout(), Term::stderr(), true)
        } else {
            Self::with_term(Term::stdout(), false)
        }
    }

    /// Writes everything to one term.
    pub fn with_term(term: Term, json: bool) -> Self {
        Self::with_terms(term.clone(), term, json)
    }

    pub fn with_terms(out: Term, status: Term, json: bool) -> Self {
        Self {
            in_place: status.is_term(),
            out,
            status,
            json,
            line_open: false,
        }
    }

    /// Overrides whether progress is rewritten in place.
    pub fn in_place(mut self, in_place: bool) -> Self {
        self.in_place = in_place;
        self
    }

    fn close_line(&mut self) -> std::io::Result<()> {
        if self.line_open {
            self.status.write_line("")?;
            self.line_open = false;
        }
        Ok(())
    }

    fn write_progress(&mut self, line: &str) -> std::io::Result<()> {
        if self.in_place {
            self.status.clear_line()?;
            self.status.write_str(line)?;
            self.line_open = true;
            Ok(())
        } else {
            self.status.write_line(line)
        }
    }

    fn write_summary(&mut self, summary: &UploadSummary) -> std::io::Result<()> {
        self.close_line()?;
        if self.json {
            let json = serde_json::to_string_pretty(summary)?;
            self.out.write_line(&json)
        } else {
            self.out.write_line(&format!(
                "{} {}",
                style("✓").green(),
                completion_line(summary)
            ))
        }
    }

    fn write_failure(&mut self, diagnostic: &str) -> std::io::Result<()> {
        self.close_line()?;
        self.status
            .write_line(&format!("{} {}", style("✗").red(), diagnostic))
    }
}

impl Progress for TerminalProgress {
    fn uploading(&mut self, path: &Path, index: usize, total: usize) {
        if let Err(e) = self.write_progress(&progress_line(path, index, total)) {
            tracing::debug!("Failed to write progress: {}", e);
        }
    }

    fn finished(&mut self, summary: &UploadSummary) {
        if let Err(e) = self.write_summary(summary) {
            tracing::debug!("Failed to write summary: {}", e);
        }
    }

    fn failed(&mut self, diagnostic: &str) {
        if let Err(e) = self.write_failure(diagnostic) {
            tracing::debug!("Failed to write diagnostic: {}", e);
        }
    }
}
