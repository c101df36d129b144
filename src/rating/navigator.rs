//! Cursor over the entries being rated.

use super::ImageEntry;

/// What happens when the cursor moves past the last entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPolicy {
    /// Wrap back to the first entry; the session never ends.
    Cyclic,
    /// Stay past the end; `current` returns `None` until the next `load`.
    Terminal,
}

/// Ordered entries plus the index of the one on screen.
#[derive(Debug, Clone)]
pub struct Navigator {
    entries: Vec<ImageEntry>,
    position: usize,
    policy: NavigationPolicy,
}

impl Navigator {
    pub fn new(policy: NavigationPolicy) -> Self {
        Self {
            entries: Vec::new(),
            position: 0,
            policy,
        }
    }

    /// Replace the held entries and rewind to the first one.
    ///
    /// An empty list is ignored so a cancelled picker keeps the current session.
    /// Returns whether the entries were replaced.
    pub fn load(&mut self, entries: Vec<ImageEntry>) -> bool {
        if entries.is_empty() {
            return false;
        }
        self.entries = entries;
        self.position = 0;
        true
    }

    pub fn current(&self) -> Option<&ImageEntry> {
        self.entries.get(self.position)
    }

    /// Move to the next entry according to the policy.
    ///
    /// Does nothing when no entries are loaded.
    pub fn advance(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        match self.policy {
            NavigationPolicy::Cyclic => {
                self.position = (self.position + 1) % self.entries.len();
            }
            NavigationPolicy::Terminal => {
                // Saturate at one past the end so repeated advances stay exhausted.
                self.position = (self.position + 1).min(self.entries.len());
            }
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True once a terminal navigator has walked past its last entry.
    pub fn is_exhausted(&self) -> bool {
        !self.entries.is_empty() && self.position >= self.entries.len()
    }
}
