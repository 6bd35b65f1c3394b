/// Client-side state for one idea and its two analyses.
///
/// The session never performs I/O. Operations that need the network hand back a
/// [`PendingRequest`]; the caller sends it and feeds the outcome to
/// [`IdeaSession::complete`]. Each pending request carries the session epoch at the
/// time it was issued, so a response that arrives after a new submission or a reset
/// is recognised as stale and dropped.
use cofounder_common::api::{GenerateRequest, GenerationResult};
use cofounder_common::prompt::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    LoadingNormal,
    LoadingJudge,
    HasResults,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Please provide a startup idea.")]
    EmptyIdea,

    #[error("an analysis is already being generated")]
    Busy,
}

/// Identifies the request a response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    epoch: u64,
    mode: Mode,
}

impl Ticket {
    pub fn mode(&self) -> Mode {
        self.mode
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub ticket: Ticket,
    pub request: GenerateRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleAction {
    /// Judge view switched on from the cached result.
    Shown,
    /// Judge view switched off.
    Hidden,
    /// No judge result yet; send this request.
    Fetch(PendingRequest),
    /// Nothing to do: no normal result yet, or a judge request is already in flight.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

#[derive(Debug, Clone)]
pub struct IdeaSession {
    phase: Phase,
    idea: Option<String>,
    normal: Option<GenerationResult>,
    judge: Option<GenerationResult>,
    judge_view: bool,
    error: Option<String>,
    epoch: u64,
    /// Epoch of the cofounder request still on the wire, stale or not.
    normal_in_flight: Option<u64>,
    /// Epoch of the judge request still on the wire, stale or not.
    judge_in_flight: Option<u64>,
}

impl Default for IdeaSession {
    fn default() -> Self {
        Self::new()
    }
}

impl IdeaSession {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            idea: None,
            normal: None,
            judge: None,
            judge_view: false,
            error: None,
            epoch: 0,
            normal_in_flight: None,
            judge_in_flight: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn idea(&self) -> Option<&str> {
        self.idea.as_deref()
    }

    pub fn normal_result(&self) -> Option<&GenerationResult> {
        self.normal.as_ref()
    }

    pub fn judge_result(&self) -> Option<&GenerationResult> {
        self.judge.as_ref()
    }

    pub fn judge_view(&self) -> bool {
        self.judge_view
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The result the view should show right now.
    pub fn displayed(&self) -> Option<&GenerationResult> {
        if self.judge_view {
            self.judge.as_ref().or(self.normal.as_ref())
        } else {
            self.normal.as_ref()
        }
    }

    /// Start a fresh analysis for `idea`.
    ///
    /// Clears both results. A judge request still in flight becomes stale. Refused
    /// while any cofounder request is still on the wire, including one made stale by
    /// `reset`.
    pub fn submit(&mut self, idea: &str) -> Result<PendingRequest, SessionError> {
        let idea = idea.trim();
        if idea.is_empty() {
            return Err(SessionError::EmptyIdea);
        }
        if self.normal_in_flight.is_some() {
            return Err(SessionError::Busy);
        }

        self.epoch += 1;
        self.phase = Phase::LoadingNormal;
        self.idea = Some(idea.to_string());
        self.normal = None;
        self.judge = None;
        self.judge_view = false;
        self.error = None;
        self.normal_in_flight = Some(self.epoch);

        Ok(self.pending(Mode::Cofounder, idea))
    }

    /// Flip between the normal and the judge analysis.
    ///
    /// A fetch is only issued when no judge request is on the wire, so a stale one
    /// from a previous idea has to finish first.
    pub fn toggle_judge(&mut self) -> ToggleAction {
        if self.judge_view {
            self.judge_view = false;
            return ToggleAction::Hidden;
        }
        if self.judge.is_some() {
            self.judge_view = true;
            return ToggleAction::Shown;
        }
        if self.phase != Phase::HasResults
            || self.normal.is_none()
            || self.judge_in_flight.is_some()
        {
            return ToggleAction::Ignored;
        }
        let Some(idea) = self.idea.clone() else {
            return ToggleAction::Ignored;
        };

        self.phase = Phase::LoadingJudge;
        self.error = None;
        self.judge_in_flight = Some(self.epoch);
        ToggleAction::Fetch(self.pending(Mode::Judge, &idea))
    }

    /// Apply the outcome of a request issued by `submit` or `toggle_judge`.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<GenerationResult, String>,
    ) -> Completion {
        let in_flight = match ticket.mode {
            Mode::Cofounder => &mut self.normal_in_flight,
            Mode::Judge => &mut self.judge_in_flight,
        };
        if *in_flight == Some(ticket.epoch) {
            *in_flight = None;
        }

        let expected = match ticket.mode {
            Mode::Cofounder => Phase::LoadingNormal,
            Mode::Judge => Phase::LoadingJudge,
        };
        if ticket.epoch != self.epoch || self.phase != expected {
            return Completion::Stale;
        }

        match (ticket.mode, outcome) {
            (Mode::Cofounder, Ok(result)) => {
                self.normal = Some(result);
                self.judge_view = false;
                self.phase = Phase::HasResults;
            }
            (Mode::Cofounder, Err(message)) => {
                self.error = Some(message);
                self.phase = Phase::Error;
            }
            (Mode::Judge, Ok(result)) => {
                self.judge = Some(result);
                self.judge_view = true;
                self.phase = Phase::HasResults;
            }
            (Mode::Judge, Err(message)) => {
                // The normal result stays on screen.
                self.error = Some(message);
                self.judge_view = false;
                self.phase = Phase::HasResults;
            }
        }
        Completion::Applied
    }

    /// Forget everything and go back to `Idle`. In-flight responses become stale but
    /// still count as in flight until they complete.
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.phase = Phase::Idle;
        self.idea = None;
        self.normal = None;
        self.judge = None;
        self.judge_view = false;
        self.error = None;
    }

    fn pending(&self, mode: Mode, idea: &str) -> PendingRequest {
        PendingRequest {
            ticket: Ticket {
                epoch: self.epoch,
                mode,
            },
            request: GenerateRequest::new(idea, mode),
        }
    }
}

#[cfg(test)]
mod tests {
    use cofounder_common::api::Section;

    use super::*;

    fn result(mode: Mode, title: &str) -> GenerationResult {
        GenerationResult {
            raw: format!("## {title}\nbody"),
            sections: vec![Section {
                title: title.to_string(),
                content: "body".to_string(),
            }],
            mode,
        }
    }

    fn fetch(action: ToggleAction) -> PendingRequest {
        match action {
            ToggleAction::Fetch(pending) => pending,
            other => panic!("expected a judge fetch, got {other:?}"),
        }
    }

    fn with_normal_result(idea: &str) -> IdeaSession {
        let mut session = IdeaSession::new();
        let pending = session.submit(idea).unwrap();
        session.complete(pending.ticket, Ok(result(Mode::Cofounder, "Idea Clarity")));
        session
    }

    #[test]
    fn submit_moves_to_loading_and_records_trimmed_idea() {
        let mut session = IdeaSession::new();
        let pending = session.submit("  tutoring marketplace \n").unwrap();

        assert_eq!(session.phase(), Phase::LoadingNormal);
        assert_eq!(session.idea(), Some("tutoring marketplace"));
        assert_eq!(pending.request.idea, "tutoring marketplace");
        assert!(!pending.request.judge_mode);
        assert_eq!(pending.ticket.mode(), Mode::Cofounder);
    }

    #[test]
    fn blank_idea_is_refused() {
        let mut session = IdeaSession::new();
        assert_eq!(session.submit(" \t\n"), Err(SessionError::EmptyIdea));
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn second_submit_while_loading_is_refused() {
        let mut session = IdeaSession::new();
        session.submit("one").unwrap();
        assert_eq!(session.submit("two"), Err(SessionError::Busy));
        assert_eq!(session.idea(), Some("one"));
    }

    #[test]
    fn normal_success_and_failure() {
        let session = with_normal_result("idea");
        assert_eq!(session.phase(), Phase::HasResults);
        assert!(!session.judge_view());
        assert_eq!(session.displayed().unwrap().mode, Mode::Cofounder);

        let mut session = IdeaSession::new();
        let pending = session.submit("idea").unwrap();
        let applied = session.complete(pending.ticket, Err("Something went wrong".to_string()));
        assert_eq!(applied, Completion::Applied);
        assert_eq!(session.phase(), Phase::Error);
        assert_eq!(session.error(), Some("Something went wrong"));
        assert!(session.normal_result().is_none());
    }

    #[test]
    fn judge_toggle_fetches_with_recorded_idea_then_uses_cache() {
        let mut session = with_normal_result("idea");

        let pending = fetch(session.toggle_judge());
        assert_eq!(session.phase(), Phase::LoadingJudge);
        assert_eq!(pending.request, GenerateRequest::new("idea", Mode::Judge));
        assert_eq!(session.displayed().unwrap().mode, Mode::Cofounder);
        assert_eq!(session.toggle_judge(), ToggleAction::Ignored);

        session.complete(pending.ticket, Ok(result(Mode::Judge, "Impact & Vision")));
        assert_eq!(session.phase(), Phase::HasResults);
        assert!(session.judge_view());
        assert_eq!(session.displayed().unwrap().mode, Mode::Judge);

        assert_eq!(session.toggle_judge(), ToggleAction::Hidden);
        assert_eq!(session.displayed().unwrap().mode, Mode::Cofounder);
        assert_eq!(session.toggle_judge(), ToggleAction::Shown);
        assert_eq!(session.phase(), Phase::HasResults);
        assert_eq!(session.displayed().unwrap().mode, Mode::Judge);
    }

    #[test]
    fn judge_failure_keeps_normal_result() {
        let mut session = with_normal_result("idea");
        let normal = session.normal_result().cloned();

        let pending = fetch(session.toggle_judge());
        session.complete(pending.ticket, Err("Failed to generate judge pitch".to_string()));

        assert_eq!(session.phase(), Phase::HasResults);
        assert!(!session.judge_view());
        assert_eq!(session.error(), Some("Failed to generate judge pitch"));
        assert_eq!(session.normal_result().cloned(), normal);
        assert!(session.judge_result().is_none());

        // A later toggle tries again.
        assert!(matches!(session.toggle_judge(), ToggleAction::Fetch(_)));
    }

    #[test]
    fn toggle_without_results_is_ignored() {
        let mut session = IdeaSession::new();
        assert_eq!(session.toggle_judge(), ToggleAction::Ignored);
        session.submit("idea").unwrap();
        assert_eq!(session.toggle_judge(), ToggleAction::Ignored);
        assert_eq!(session.phase(), Phase::LoadingNormal);
    }

    #[test]
    fn new_submission_makes_pending_judge_response_stale() {
        let mut session = with_normal_result("first idea");
        let judge = fetch(session.toggle_judge());

        let normal = session.submit("second idea").unwrap();
        assert_eq!(
            session.complete(judge.ticket, Ok(result(Mode::Judge, "Old pitch"))),
            Completion::Stale
        );
        assert!(session.judge_result().is_none());
        assert!(!session.judge_view());
        assert_eq!(session.phase(), Phase::LoadingNormal);

        session.complete(normal.ticket, Ok(result(Mode::Cofounder, "New plan")));
        assert_eq!(session.idea(), Some("second idea"));
        assert_eq!(session.displayed().unwrap().sections[0].title, "New plan");
    }

    #[test]
    fn reset_clears_everything_and_drops_late_responses() {
        let mut session = with_normal_result("idea");
        let judge = fetch(session.toggle_judge());

        session.reset();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.idea().is_none());
        assert!(session.normal_result().is_none());
        assert!(session.error().is_none());

        assert_eq!(
            session.complete(judge.ticket, Ok(result(Mode::Judge, "late"))),
            Completion::Stale
        );
        assert!(session.judge_result().is_none());
    }

    #[test]
    fn stale_judge_request_blocks_a_second_judge_fetch() {
        let mut session = with_normal_result("first idea");
        let stale = fetch(session.toggle_judge());

        let normal = session.submit("second idea").unwrap();
        session.complete(normal.ticket, Ok(result(Mode::Cofounder, "New plan")));
        assert_eq!(session.phase(), Phase::HasResults);

        // The first judge request has not answered yet.
        assert_eq!(session.toggle_judge(), ToggleAction::Ignored);
        assert_eq!(session.phase(), Phase::HasResults);

        assert_eq!(
            session.complete(stale.ticket, Ok(result(Mode::Judge, "Old pitch"))),
            Completion::Stale
        );
        let pending = fetch(session.toggle_judge());
        assert_eq!(pending.request, GenerateRequest::new("second idea", Mode::Judge));
    }

    #[test]
    fn reset_while_loading_keeps_submit_busy_until_reply() {
        let mut session = IdeaSession::new();
        let first = session.submit("first idea").unwrap();
        session.reset();

        assert_eq!(session.submit("second idea"), Err(SessionError::Busy));
        assert_eq!(session.phase(), Phase::Idle);

        assert_eq!(
            session.complete(first.ticket, Err("Something went wrong".to_string())),
            Completion::Stale
        );
        assert!(session.error().is_none());
        assert!(session.submit("second idea").is_ok());
        assert_eq!(session.phase(), Phase::LoadingNormal);
    }
}
