use serde::Serialize;

/// User-visible save indicator.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "camelCase")]
pub enum SaveStatus {
    #[default]
    Idle,
    Saving,
    Success,
    Error(String),
}

/// Drives `SaveStatus` transitions. `Success` falls back to `Idle` after
/// `reset_after` seconds; `Error` stays until the next save starts.
#[derive(Debug, Clone)]
pub struct SaveTracker {
    status: SaveStatus,
    reset_after: f64,
    succeeded_at: Option<f64>,
}

impl SaveTracker {
    pub fn new(reset_after: f64) -> Self {
        Self {
            status: SaveStatus::Idle,
            reset_after,
            succeeded_at: None,
        }
    }

    pub fn status(&self) -> &SaveStatus {
        &self.status
    }

    pub fn begin(&mut self) {
        self.status = SaveStatus::Saving;
        self.succeeded_at = None;
    }

    pub fn succeed(&mut self, now: f64) {
        self.status = SaveStatus::Success;
        self.succeeded_at = Some(now);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = SaveStatus::Error(message.into());
        self.succeeded_at = None;
    }

    /// Expire a `Success` whose delay has passed.
    pub fn tick(&mut self, now: f64) {
        if let Some(at) = self.succeeded_at {
            if now - at >= self.reset_after {
                self.status = SaveStatus::Idle;
                self.succeeded_at = None;
            }
        }
    }
}

impl Default for SaveTracker {
    fn default() -> Self {
        Self::new(2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_resets_after_delay() {
        let mut t = SaveTracker::new(2.0);
        t.begin();
        assert_eq!(t.status(), &SaveStatus::Saving);
        t.succeed(10.0);
        t.tick(11.9);
        assert_eq!(t.status(), &SaveStatus::Success);
        t.tick(12.0);
        assert_eq!(t.status(), &SaveStatus::Idle);
    }

    #[test]
    fn error_sticks_until_next_save() {
        let mut t = SaveTracker::default();
        t.begin();
        t.fail("disk full");
        t.tick(1e6);
        assert_eq!(t.status(), &SaveStatus::Error("disk full".into()));
        t.begin();
        assert_eq!(t.status(), &SaveStatus::Saving);
    }

    #[test]
    fn status_serializes_tagged() {
        let json = serde_json::to_string(&SaveStatus::Error("x".into())).unwrap();
        assert_eq!(json, r#"{"state":"error","message":"x"}"#);
        assert_eq!(serde_json::to_string(&SaveStatus::Idle).unwrap(), r#"{"state":"idle"}"#);
    }
}
