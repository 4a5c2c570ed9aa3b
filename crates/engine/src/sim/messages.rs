use std::time::Duration;

pub const MESSAGE_LIFETIME: Duration = Duration::from_secs(3);

/// Short-lived HUD toasts. Every push restarts the lifetime; once the newest
/// message is older than `MESSAGE_LIFETIME` the whole log clears.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageLog {
    lines: Vec<String>,
    age: Duration,
}

impl MessageLog {
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
        self.age = Duration::ZERO;
    }

    pub fn age(&mut self, dt: Duration) {
        if self.lines.is_empty() {
            return;
        }
        self.age = self.age.saturating_add(dt);
        if self.age > MESSAGE_LIFETIME {
            self.lines.clear();
            self.age = Duration::ZERO;
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
