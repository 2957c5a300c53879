//! Session-scoped flags with guaranteed release.
//!
//! Opening the OS file picker backgrounds the app. While a picker is open
//! the session must not be treated as idle and must not be reloaded, or
//! the document the user is choosing is lost. The flag is a lease counter
//! owned by the session root rather than a global, and every lease is
//! released on drop, including on early returns and unwinding.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared flags for one application session. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct SessionFlags {
    file_pickers: Arc<AtomicUsize>,
}

impl SessionFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a file picker as open until the returned lease is dropped.
    pub fn acquire_file_picker(&self) -> FilePickerLease {
        let previous = self.file_pickers.fetch_add(1, Ordering::SeqCst);
        tracing::debug!("File picker lease acquired ({} active)", previous + 1);
        FilePickerLease {
            counter: Arc::clone(&self.file_pickers),
        }
    }

    /// Whether any file picker lease is held.
    pub fn is_file_picker_active(&self) -> bool {
        self.file_pickers.load(Ordering::SeqCst) > 0
    }
}

/// RAII lease returned by [`SessionFlags::acquire_file_picker`].
#[derive(Debug)]
#[must_use = "the file picker flag is released as soon as the lease is dropped"]
pub struct FilePickerLease {
    counter: Arc<AtomicUsize>,
}

impl Drop for FilePickerLease {
    fn drop(&mut self) {
        let previous = self.counter.fetch_sub(1, Ordering::SeqCst);
        tracing::debug!("File picker lease released ({} active)", previous - 1);
    }
}
