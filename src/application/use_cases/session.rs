use uuid::Uuid;

/// The three-state submission status a form moves through. Succeeded and
/// Failed are terminal per request; the next submission returns the session
/// to Generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationStatus {
    #[default]
    Idle,
    Generating,
    Succeeded,
    Failed,
}

/// Opaque identity of one dispatched generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationToken(Uuid);

/// Exactly one variant is populated once a generation attempt completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    Success(String),
    Failure(String),
}

/// Per-form session state. The two forms hold independent sessions and
/// share nothing.
///
/// An in-flight upstream call cannot be cancelled, so completions are
/// guarded by the token issued at dispatch: a response carrying anything but
/// the latest token is discarded, which keeps stale results from
/// resurrecting after a reset or a rapid resubmission.
#[derive(Debug, Default)]
pub struct GenerationSession {
    status: GenerationStatus,
    current: Option<GenerationToken>,
    last_result: Option<String>,
    last_error: Option<String>,
}

impl GenerationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> GenerationStatus {
        self.status
    }

    pub fn is_generating(&self) -> bool {
        self.status() == GenerationStatus::Generating
    }

    pub fn last_result(&self) -> Option<&str> {
        self.last_result.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Dispatches a new request. Returns `None` while a request is already
    /// in flight, which is how the form disables resubmission.
    pub fn begin(&mut self) -> Option<GenerationToken> {
        if self.is_generating() {
            return None;
        }
        let token = GenerationToken(Uuid::new_v4());
        self.status = GenerationStatus::Generating;
        self.current = Some(token);
        self.last_result = None;
        self.last_error = None;
        Some(token)
    }

    /// Applies an outcome only when `token` is the latest one issued;
    /// anything else is a stale response and is dropped. Returns whether the
    /// outcome was applied.
    pub fn complete(&mut self, token: GenerationToken, result: GenerationResult) -> bool {
        if self.current != Some(token) {
            return false;
        }
        self.current = None;
        match result {
            GenerationResult::Success(text) => {
                self.status = GenerationStatus::Succeeded;
                self.last_result = Some(text);
            }
            GenerationResult::Failure(message) => {
                self.status = GenerationStatus::Failed;
                self.last_error = Some(message);
            }
        }
        true
    }

    /// Clears displayed state. The in-flight network call, if any, is not
    /// cancelled; its eventual completion fails the token check instead.
    pub fn reset(&mut self) {
        self.status = GenerationStatus::Idle;
        self.current = None;
        self.last_result = None;
        self.last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle() {
        let session = GenerationSession::new();
        assert_eq!(session.status(), GenerationStatus::Idle);
        assert_eq!(session.last_result(), None);
    }

    #[test]
    fn test_begin_moves_to_generating_and_blocks_resubmission() {
        let mut session = GenerationSession::new();
        let token = session.begin();
        assert!(token.is_some());
        assert!(session.is_generating());
        assert!(session.begin().is_none());
    }

    #[test]
    fn test_success_outcome_applies() {
        let mut session = GenerationSession::new();
        let token = session.begin().unwrap();
        assert!(session.complete(token, GenerationResult::Success("# Result".to_string())));
        assert_eq!(session.status(), GenerationStatus::Succeeded);
        assert_eq!(session.last_result(), Some("# Result"));
        assert_eq!(session.last_error(), None);
    }

    #[test]
    fn test_failure_outcome_applies() {
        let mut session = GenerationSession::new();
        let token = session.begin().unwrap();
        assert!(session.complete(
            token,
            GenerationResult::Failure("AI generation failed.".to_string())
        ));
        assert_eq!(session.status(), GenerationStatus::Failed);
        assert_eq!(session.last_error(), Some("AI generation failed."));
    }

    #[test]
    fn test_resubmission_allowed_after_completion() {
        let mut session = GenerationSession::new();
        let token = session.begin().unwrap();
        session.complete(token, GenerationResult::Success("ok".to_string()));
        assert!(session.begin().is_some());
    }

    #[test]
    fn test_stale_response_after_reset_is_discarded() {
        let mut session = GenerationSession::new();
        let token = session.begin().unwrap();
        session.reset();
        assert!(!session.complete(token, GenerationResult::Success("stale".to_string())));
        assert_eq!(session.status(), GenerationStatus::Idle);
        assert_eq!(session.last_result(), None);
    }

    #[test]
    fn test_stale_response_after_resubmission_is_discarded() {
        let mut session = GenerationSession::new();
        let first = session.begin().unwrap();
        session.complete(first, GenerationResult::Failure("timeout".to_string()));
        let second = session.begin().unwrap();

        assert!(!session.complete(first, GenerationResult::Success("stale".to_string())));
        assert!(session.is_generating());
        assert!(session.complete(second, GenerationResult::Success("fresh".to_string())));
        assert_eq!(session.last_result(), Some("fresh"));
    }
}
