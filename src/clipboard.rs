// Clipboard access and the copy confirmation label

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::error::ClipboardError;
use crate::events::AppEvent;

pub const COPY_LABEL: &str = "📋 Copy";
pub const COPIED_LABEL: &str = "✅ Copied!";
pub const RESTORE_DELAY: Duration = Duration::from_millis(2000);

#[cfg_attr(test, mockall::automock)]
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard. Opened on first use so a missing display only
/// shows up as a failed copy.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?,
        };

        let result = clipboard
            .set_text(text.to_owned())
            .map_err(|e| ClipboardError::Unavailable(e.to_string()));
        self.inner = Some(clipboard);
        result
    }
}

/// Label of the copy control plus the pending task that restores it.
///
/// Each confirmation bumps `token` and aborts the previous timer, so a
/// restore event that arrives late for an older confirmation is ignored.
#[derive(Debug)]
pub struct CopyFeedback {
    label: &'static str,
    pending: Option<JoinHandle<()>>,
    token: u64,
}

impl CopyFeedback {
    pub const fn new() -> Self {
        Self {
            label: COPY_LABEL,
            pending: None,
            token: 0,
        }
    }

    pub const fn label(&self) -> &'static str {
        self.label
    }

    #[allow(dead_code)]
    pub const fn token(&self) -> u64 {
        self.token
    }

    pub const fn is_confirming(&self) -> bool {
        self.pending.is_some()
    }

    /// Show the confirmation and schedule its removal after [`RESTORE_DELAY`].
    pub fn confirm(&mut self, event_tx: &UnboundedSender<AppEvent>) {
        self.cancel();
        self.token = self.token.wrapping_add(1);
        self.label = COPIED_LABEL;

        let token = self.token;
        let tx = event_tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(RESTORE_DELAY).await;
            let _ = tx.send(AppEvent::CopyLabelExpired(token));
        }));
    }

    pub fn expire(&mut self, token: u64) {
        if token != self.token {
            return;
        }
        self.pending = None;
        self.label = COPY_LABEL;
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Default for CopyFeedback {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CopyFeedback {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_feedback_starts_with_copy_label() {
        let feedback = CopyFeedback::new();
        assert_eq!(feedback.label(), COPY_LABEL);
        assert!(!feedback.is_confirming());
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirm_restores_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut feedback = CopyFeedback::new();
        let started = tokio::time::Instant::now();

        feedback.confirm(&tx);
        assert_eq!(feedback.label(), COPIED_LABEL);

        let Some(AppEvent::CopyLabelExpired(token)) = rx.recv().await else {
            panic!("expected a copy expiry event");
        };
        assert!(started.elapsed() >= RESTORE_DELAY);

        feedback.expire(token);
        assert_eq!(feedback.label(), COPY_LABEL);
        assert!(!feedback.is_confirming());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_confirm_cancels_first_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut feedback = CopyFeedback::new();

        feedback.confirm(&tx);
        tokio::time::sleep(Duration::from_millis(1500)).await;
        feedback.confirm(&tx);
        let second_token = feedback.token();

        let Some(AppEvent::CopyLabelExpired(token)) = rx.recv().await else {
            panic!("expected a copy expiry event");
        };
        assert_eq!(token, second_token);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_stale_expiry_is_ignored() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut feedback = CopyFeedback::new();

        feedback.confirm(&tx);
        let stale = feedback.token();
        feedback.confirm(&tx);

        feedback.expire(stale);
        assert_eq!(feedback.label(), COPIED_LABEL);

        feedback.expire(feedback.token());
        assert_eq!(feedback.label(), COPY_LABEL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_pending_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut feedback = CopyFeedback::new();
        feedback.confirm(&tx);
        drop(feedback);
        drop(tx);

        assert!(rx.recv().await.is_none());
    }
}
