use crate::calc::Subject;
use crate::sample;
use serde::Serialize;
use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadState {
    Idle,
    Processing,
    Success,
    Error,
    Cancelled,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadStatus {
    pub ticket: u64,
    pub status: UploadState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub subjects: Vec<Subject>,
}

struct UploadSlot {
    ticket: u64,
    state: UploadState,
    message: Option<String>,
    subjects: Vec<Subject>,
    cancel: Option<Sender<()>>,
}

impl UploadSlot {
    fn snapshot(&self) -> UploadStatus {
        UploadStatus {
            ticket: self.ticket,
            status: self.state,
            message: self.message.clone(),
            subjects: self.subjects.clone(),
        }
    }

    fn cancel_in_flight(&mut self) {
        if let Some(tx) = self.cancel.take() {
            // The worker may already be past its wait; its ticket check covers that.
            let _ = tx.send(());
        }
    }
}

/// Simulated mark sheet processing. One upload is live at a time: starting a
/// new one cancels the previous worker, and a worker only publishes its
/// subjects if its ticket is still current.
pub struct UploadSimulator {
    delay: Duration,
    slot: Arc<Mutex<UploadSlot>>,
}

fn lock(slot: &Mutex<UploadSlot>) -> MutexGuard<'_, UploadSlot> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Infers an image mime type from the file extension when the caller sent none.
pub fn guess_mime_type(file_name: &str) -> Option<&'static str> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())?
        .to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}

impl UploadSimulator {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            slot: Arc::new(Mutex::new(UploadSlot {
                ticket: 0,
                state: UploadState::Idle,
                message: None,
                subjects: Vec::new(),
                cancel: None,
            })),
        }
    }

    pub fn start(&self, file_name: &str, mime_type: Option<&str>) -> UploadStatus {
        let mime = mime_type
            .map(|m| m.to_string())
            .or_else(|| guess_mime_type(file_name).map(|m| m.to_string()))
            .unwrap_or_default();

        let mut slot = lock(&self.slot);
        slot.cancel_in_flight();
        slot.ticket += 1;
        slot.subjects.clear();
        let ticket = slot.ticket;

        if !mime.starts_with("image/") {
            tracing::warn!(ticket, file_name, mime = %mime, "upload rejected: not an image");
            slot.state = UploadState::Error;
            slot.message = Some("please upload a valid image file".to_string());
            return slot.snapshot();
        }

        let (tx, rx) = mpsc::channel::<()>();
        slot.state = UploadState::Processing;
        slot.message = None;
        slot.cancel = Some(tx);
        let status = slot.snapshot();
        drop(slot);

        tracing::info!(ticket, file_name, "upload processing");
        let shared = Arc::clone(&self.slot);
        let delay = self.delay;
        thread::spawn(move || {
            match rx.recv_timeout(delay) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                    tracing::debug!(ticket, "upload worker cancelled");
                    return;
                }
            }
            let subjects = sample::generate_sample_subjects(&mut rand::thread_rng());
            let mut slot = lock(&shared);
            if slot.ticket != ticket || slot.state != UploadState::Processing {
                tracing::debug!(ticket, current = slot.ticket, "discarding superseded upload");
                return;
            }
            slot.state = UploadState::Success;
            slot.subjects = subjects;
            slot.cancel = None;
            tracing::info!(ticket, "upload processed");
        });

        status
    }

    /// Current status; an older ticket than the current one reads as cancelled.
    pub fn status(&self, ticket: Option<u64>) -> UploadStatus {
        let slot = lock(&self.slot);
        match ticket {
            Some(t) if t < slot.ticket => UploadStatus {
                ticket: t,
                status: UploadState::Cancelled,
                message: None,
                subjects: Vec::new(),
            },
            _ => slot.snapshot(),
        }
    }

    pub fn cancel(&self) -> UploadStatus {
        let mut slot = lock(&self.slot);
        if slot.state == UploadState::Processing {
            slot.cancel_in_flight();
            slot.state = UploadState::Cancelled;
            tracing::info!(ticket = slot.ticket, "upload cancelled");
        }
        slot.snapshot()
    }
}
