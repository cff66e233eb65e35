//! Workbench state machine.
//!
//! States: `Idle -> Generating -> {Ready | Error}`;
//! `Ready -> Exporting -> Ready`; any state returns to `Idle` via `reset`.
//! The file set is exclusively owned and mutated here, on a single control
//! flow; a submit while a build is in flight is dropped, not queued.

use chrono::{DateTime, Utc};

use atelier_types::builder::{BuildReply, BuildRequest, BuilderResponse, GeneratedFile};

use crate::builder::{path, prompt};

use super::export::{self, ExportError};
use super::remote::BuilderRemote;
use super::tree::{self, TreeGroup};

/// Per-file ceiling for uploaded context files, in bytes.
pub const MAX_UPLOAD_BYTES: usize = 500 * 1024;

/// Workbench lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbenchStatus {
    Idle,
    Generating,
    Ready,
    Exporting,
    Error,
}

/// Category of a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Echo of a submitted prompt.
    Prompt,
    Info,
    Success,
    Warning,
    Error,
}

/// One line of the build transcript.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub at: DateTime<Utc>,
}

/// The client-side mirror of the builder: file set, upload context,
/// selection, transcript, and the status machine.
#[derive(Debug)]
pub struct Workbench {
    status: WorkbenchStatus,
    files: Vec<GeneratedFile>,
    uploaded_files: Vec<GeneratedFile>,
    selected_path: Option<String>,
    transcript: Vec<Notice>,
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new()
    }
}

impl Workbench {
    pub fn new() -> Self {
        Self {
            status: WorkbenchStatus::Idle,
            files: Vec::new(),
            uploaded_files: Vec::new(),
            selected_path: None,
            transcript: Vec::new(),
        }
    }

    pub fn status(&self) -> WorkbenchStatus {
        self.status
    }

    pub fn files(&self) -> &[GeneratedFile] {
        &self.files
    }

    pub fn uploaded_files(&self) -> &[GeneratedFile] {
        &self.uploaded_files
    }

    pub fn selected_path(&self) -> Option<&str> {
        self.selected_path.as_deref()
    }

    pub fn transcript(&self) -> &[Notice] {
        &self.transcript
    }

    /// The currently selected file, if any.
    pub fn selected_file(&self) -> Option<&GeneratedFile> {
        let selected = self.selected_path.as_deref()?;
        self.files.iter().find(|f| f.path == selected)
    }

    /// Grouped file listing for display.
    pub fn tree(&self) -> Vec<TreeGroup> {
        tree::group(&self.files, self.selected_path.as_deref())
    }

    /// Select a file for preview. Returns it when the path exists.
    pub fn select(&mut self, path: &str) -> Option<&GeneratedFile> {
        if self.files.iter().any(|f| f.path == path) {
            self.selected_path = Some(path.to_string());
            self.selected_file()
        } else {
            None
        }
    }

    /// Add an uploaded context file.
    ///
    /// Valid in any state except `Exporting`. Files over the size ceiling
    /// are skipped with a visible notice; accepted files land in both the
    /// upload context and the exportable file set. The status never
    /// changes.
    pub fn upload(&mut self, name: &str, content: String) -> bool {
        if self.status == WorkbenchStatus::Exporting {
            self.notice(NoticeKind::Warning, format!("Cannot upload during export: {name}"));
            return false;
        }
        if content.len() > MAX_UPLOAD_BYTES {
            self.notice(NoticeKind::Warning, format!("Skipped {name} (too large)"));
            return false;
        }
        let clean = path::sanitize(name);
        if clean.is_empty() {
            self.notice(NoticeKind::Warning, format!("Skipped {name} (invalid name)"));
            return false;
        }

        let file = GeneratedFile::new(clean.clone(), content);
        self.uploaded_files.push(file.clone());
        self.files.push(file);
        self.notice(NoticeKind::Success, format!("Uploaded: {clean}"));
        true
    }

    /// Submit a build.
    ///
    /// Returns false when the submission is dropped (empty prompt, or a
    /// build already in flight -- newest request is dropped, not queued).
    /// Otherwise drives the full exchange including the transparent
    /// one-shot retry, and ends in `Ready` or `Error`.
    pub async fn build<R: BuilderRemote>(&mut self, remote: &R, prompt_text: &str) -> bool {
        if prompt_text.trim().is_empty() {
            return false;
        }
        if matches!(
            self.status,
            WorkbenchStatus::Generating | WorkbenchStatus::Exporting
        ) {
            tracing::debug!("build dropped: workbench busy");
            return false;
        }

        self.notice(NoticeKind::Prompt, prompt_text.to_string());
        self.status = WorkbenchStatus::Generating;
        self.notice(NoticeKind::Info, "Generating...".to_string());

        let full_prompt = prompt::with_context(prompt_text, &self.uploaded_files);

        let reply = remote
            .submit(&BuildRequest {
                prompt: full_prompt.clone(),
                is_retry: false,
            })
            .await;

        let reply = match reply {
            Ok(BuildReply::Retry(_)) => {
                // Transparent to the user beyond a transient notice; the
                // retry flag is not recursive.
                self.notice(NoticeKind::Info, "Fixing output format...".to_string());
                remote
                    .submit(&BuildRequest {
                        prompt: full_prompt,
                        is_retry: true,
                    })
                    .await
            }
            other => other,
        };

        match reply {
            Ok(BuildReply::Ready(response)) => self.apply_ready(response),
            Ok(BuildReply::Retry(_)) => {
                // Out of contract: the server never signals retry twice.
                self.apply_failure("Builder output remained malformed after retry".to_string());
            }
            Err(e) => self.apply_failure(e.to_string()),
        }
        true
    }

    /// Export the current file set as a zip archive.
    ///
    /// Valid only from `Ready` with a non-empty file set. Packaging
    /// failures move to `Error` but preserve the files.
    pub fn export(&mut self) -> Result<Vec<u8>, ExportError> {
        if self.status != WorkbenchStatus::Ready || self.files.is_empty() {
            return Err(ExportError::NotReady);
        }

        self.status = WorkbenchStatus::Exporting;
        match export::archive(&self.files) {
            Ok(bytes) => {
                self.status = WorkbenchStatus::Ready;
                self.notice(NoticeKind::Success, "Exported archive".to_string());
                Ok(bytes)
            }
            Err(e) => {
                self.status = WorkbenchStatus::Error;
                self.notice(NoticeKind::Error, format!("Export failed: {e}"));
                Err(e)
            }
        }
    }

    /// Clear everything and return to `Idle`.
    pub fn reset(&mut self) {
        self.status = WorkbenchStatus::Idle;
        self.files.clear();
        self.uploaded_files.clear();
        self.selected_path = None;
        self.transcript.clear();
        self.notice(NoticeKind::Info, "reset".to_string());
    }

    fn apply_ready(&mut self, response: BuilderResponse) {
        let mut files = response.files;
        for upload in &self.uploaded_files {
            if !files.iter().any(|f| f.path == upload.path) {
                files.push(upload.clone());
            }
        }
        self.files = files;

        if let Some(selected) = &self.selected_path {
            if !self.files.iter().any(|f| &f.path == selected) {
                self.selected_path = None;
            }
        }
        if self.selected_path.is_none() {
            self.selected_path = self.files.first().map(|f| f.path.clone());
        }

        let summary = if response.message.is_empty() {
            format!("Generated {} files", self.files.len())
        } else {
            response.message
        };
        self.notice(NoticeKind::Success, summary);
        self.status = WorkbenchStatus::Ready;
    }

    fn apply_failure(&mut self, message: String) {
        // Files from a previous successful build are untouched; only the
        // status and transcript change.
        self.notice(NoticeKind::Error, format!("Error: {message}"));
        self.status = WorkbenchStatus::Error;
    }

    fn notice(&mut self, kind: NoticeKind, text: String) {
        self.transcript.push(Notice {
            kind,
            text,
            at: Utc::now(),
        });
    }
}
