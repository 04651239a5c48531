#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

use std::time::Duration;

/// How long a notice stays on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

/// Oldest notices are dropped beyond this many.
pub const MAX_NOTICES: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A transient notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

/// Notices currently on screen, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoticeState {
    next_id: u64,
    pub items: Vec<Notice>,
}

impl NoticeState {
    /// Add a notice and return its id.
    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notice {
            id,
            level,
            message: message.into(),
        });
        if self.items.len() > MAX_NOTICES {
            let excess = self.items.len() - MAX_NOTICES;
            self.items.drain(..excess);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|notice| notice.id != id);
    }
}
