//! # Navigator Port
//!
//! The host's underlying navigation primitive, behind a trait so the bridge
//! stays independent of any concrete router.

use parking_lot::Mutex;

/// The navigation primitive the bridge drives.
pub trait Navigator: Send + Sync {
    /// Navigate forward to `path`, creating a new history entry.
    fn navigate(&self, path: &str);

    /// Replace the current history entry with `path`.
    fn replace(&self, path: &str);

    /// Navigate to the previous history entry, if any.
    fn back(&self);

    /// The path currently shown.
    fn current_path(&self) -> String;
}

/// In-process history-stack navigator, the default primitive for a
/// standalone host.
pub struct HistoryNavigator {
    stack: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    /// Create a navigator positioned at the root path.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: Mutex::new(vec!["/".to_string()]),
        }
    }

    /// Depth of the history stack.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.lock().len()
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, path: &str) {
        self.stack.lock().push(path.to_string());
    }

    fn replace(&self, path: &str) {
        let mut stack = self.stack.lock();
        stack.pop();
        stack.push(path.to_string());
    }

    fn back(&self) {
        let mut stack = self.stack.lock();
        if stack.len() > 1 {
            stack.pop();
        }
    }

    fn current_path(&self) -> String {
        self.stack
            .lock()
            .last()
            .cloned()
            .unwrap_or_else(|| "/".to_string())
    }
}
