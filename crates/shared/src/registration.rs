//! The schedule-registration state machine.
//!
//! This is the client-side source of truth for "what has this user asked to
//! attend". State is a map of [`RegistrationKey`] → [`RegistrationState`]
//! plus the set of schedules the user has touched. Anything that needs a
//! browser (navigation, timers, clearing the auth session) comes back to
//! the caller as an [`Effect`] instead of happening in here, and the
//! network is reached only through an injected [`RegistrationApi`], so the
//! whole machine runs under a plain test harness.
//!
//! Each operation has two surfaces. The composed async methods
//! ([`RegistrationMachine::register`], [`RegistrationMachine::request_spot`],
//! [`RegistrationMachine::refresh`]) run guard → network → settle in one
//! call. Callers that keep the machine in a reactive cell must not hold a
//! borrow across an await, so the same steps are exposed separately:
//! `guard_*` before the network call, `settle_*` after it.
//!
//! Conflict policy: optimistic updates are provisional. The reconcile fetch
//! is authoritative and fully replaces local state, and each fetch carries a
//! caller-allocated sequence number so a slow stale fetch cannot clobber a
//! newer one.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::{RegistrationRecord, RegistrationStatus};

/// Delay before the login/verify redirect a guard schedules.
pub const GUARD_REDIRECT_DELAY_MS: u64 = 1_500;
/// Delay before the login redirect after a session-expired (401) response.
pub const EXPIRED_REDIRECT_DELAY_MS: u64 = 2_000;
/// Delay before the reconcile fetch that follows a successful submission.
pub const RECONCILE_DELAY_MS: u64 = 1_000;
/// How long a notice stays on screen before auto-dismissing.
pub const NOTICE_TTL_MS: u64 = 5_000;

/// Message attached to a full-class spot request.
pub const FULL_CLASS_REQUEST_MESSAGE: &str =
    "User requesting to join a fully booked class";

/// Identifies one registration slot: a session within a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistrationKey {
    pub schedule_id: String,
    pub session_id: String,
}

impl RegistrationKey {
    pub fn new(schedule_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            schedule_id: schedule_id.into(),
            session_id: session_id.into(),
        }
    }
}

/// Cached status for one registration slot.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationState {
    pub status: RegistrationStatus,
    /// Legacy field kept for backend compatibility; not shown in the UI.
    pub payment_status: String,
    pub rejection_reason: String,
}

impl RegistrationState {
    /// The optimistic state written right after a submission.
    pub fn pending() -> Self {
        Self {
            status: RegistrationStatus::Pending,
            payment_status: "unpaid".to_string(),
            rejection_reason: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// A user-facing feedback message.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, text: text.into() }
    }
    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }
    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, text: text.into() }
    }
}

/// Where a guard wants to send the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthTarget {
    Login,
    Verify,
}

/// Side effects the caller must run after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Navigate after a delay.
    Redirect { target: AuthTarget, delay_ms: u64 },
    /// Clear the auth session (the token was rejected).
    Logout,
    /// Re-fetch the authoritative registration list after a delay.
    Reconcile { delay_ms: u64 },
}

/// The auth state a transition runs against, passed in explicitly so the
/// machine never reads ambient context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub logged_in: bool,
    pub verified: bool,
    pub token: Option<String>,
}

impl SessionSnapshot {
    /// Not logged in at all.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Logged in and email-verified, with a bearer token.
    pub fn verified(token: impl Into<String>) -> Self {
        Self {
            logged_in: true,
            verified: true,
            token: Some(token.into()),
        }
    }

    /// Logged in but the email is not verified yet.
    pub fn unverified(token: impl Into<String>) -> Self {
        Self {
            logged_in: true,
            verified: false,
            token: Some(token.into()),
        }
    }

    /// The token, but only for a logged-in, verified session.
    pub fn authorized_token(&self) -> Option<&str> {
        if self.logged_in && self.verified {
            self.token.as_deref()
        } else {
            None
        }
    }
}

/// The slice of the REST API the machine needs.
#[async_trait(?Send)]
pub trait RegistrationApi {
    async fn my_registrations(&self, token: &str)
        -> Result<Vec<RegistrationRecord>, ApiError>;

    async fn submit_registration(
        &self,
        token: &str,
        schedule_id: &str,
        session_id: &str,
    ) -> Result<(), ApiError>;

    async fn request_full_class(
        &self,
        token: &str,
        schedule_id: &str,
        session_id: &str,
        message: &str,
    ) -> Result<(), ApiError>;
}

/// Which operation a submission failure came from; picks the conflict text.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Submission {
    Register,
    FullClass,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationMachine {
    registered_schedules: BTreeSet<String>,
    statuses: HashMap<RegistrationKey, RegistrationState>,
    notice: Option<Notice>,
    /// Sequence number of the last applied reconcile fetch.
    fetch_seq: u64,
}

impl RegistrationMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, key: &RegistrationKey) -> Option<&RegistrationState> {
        self.statuses.get(key)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Schedule ids the user has at least one registration for.
    pub fn registered_schedule_ids(&self) -> &BTreeSet<String> {
        &self.registered_schedules
    }

    /// Session ids of the given schedule the user has registered for.
    pub fn registered_sessions(&self, schedule_id: &str) -> BTreeSet<String> {
        self.statuses
            .keys()
            .filter(|k| k.schedule_id == schedule_id)
            .map(|k| k.session_id.clone())
            .collect()
    }

    /// This schedule's slots keyed by session id, for the card UI.
    pub fn statuses_for(&self, schedule_id: &str) -> BTreeMap<String, RegistrationState> {
        self.statuses
            .iter()
            .filter(|(k, _)| k.schedule_id == schedule_id)
            .map(|(k, v)| (k.session_id.clone(), v.clone()))
            .collect()
    }

    // --- Register ---

    /// Register the user for one session of a schedule: guard, submit,
    /// settle. See the guard/settle pair for reactive callers.
    pub async fn register<A: RegistrationApi>(
        &mut self,
        api: &A,
        session: &SessionSnapshot,
        schedule_id: &str,
        session_id: Option<&str>,
    ) -> Vec<Effect> {
        let key = match self.guard_register(session, schedule_id, session_id) {
            Ok(key) => key,
            Err(effects) => return effects,
        };
        let token = session.token.clone().unwrap_or_default();
        let result = api
            .submit_registration(&token, &key.schedule_id, &key.session_id)
            .await;
        self.settle_register(key, result)
    }

    /// The pre-submission guard ladder. `Ok` hands back the key to submit;
    /// `Err` means the attempt was resolved locally (notice already set)
    /// and no network call may be made.
    pub fn guard_register(
        &mut self,
        session: &SessionSnapshot,
        schedule_id: &str,
        session_id: Option<&str>,
    ) -> Result<RegistrationKey, Vec<Effect>> {
        if !session.logged_in {
            self.notice = Some(Notice::info(
                "Please log in to register for this schedule.",
            ));
            return Err(vec![Effect::Redirect {
                target: AuthTarget::Login,
                delay_ms: GUARD_REDIRECT_DELAY_MS,
            }]);
        }

        if !session.verified {
            self.notice = Some(Notice::info(
                "Please verify your email to register for schedules.",
            ));
            return Err(vec![Effect::Redirect {
                target: AuthTarget::Verify,
                delay_ms: GUARD_REDIRECT_DELAY_MS,
            }]);
        }

        let session_id = match session_id {
            Some(id) if !id.is_empty() => id,
            _ => {
                self.notice =
                    Some(Notice::error("Please select a session date first."));
                return Err(Vec::new());
            }
        };

        if schedule_id.is_empty() {
            self.notice = Some(Notice::error(
                "Invalid registration request. Please try again.",
            ));
            return Err(Vec::new());
        }

        let key = RegistrationKey::new(schedule_id, session_id);

        // A live registration blocks resubmission; a rejected one may retry.
        if let Some(existing) = self.statuses.get(&key) {
            match existing.status {
                RegistrationStatus::Pending => {
                    self.notice = Some(Notice::info(
                        "Your registration is pending admin approval.",
                    ));
                    return Err(Vec::new());
                }
                RegistrationStatus::Approved => {
                    self.notice = Some(Notice::info(
                        "You're already confirmed for this session.",
                    ));
                    return Err(Vec::new());
                }
                RegistrationStatus::Rejected => {}
            }
        }

        Ok(key)
    }

    /// Apply a submission result for the slot `guard_register` approved.
    pub fn settle_register(
        &mut self,
        key: RegistrationKey,
        result: Result<(), ApiError>,
    ) -> Vec<Effect> {
        match result {
            Ok(()) => {
                self.note_pending(key);
                self.notice = Some(Notice::success(
                    "Registration submitted! Awaiting admin confirmation.",
                ));
                vec![Effect::Reconcile {
                    delay_ms: RECONCILE_DELAY_MS,
                }]
            }
            Err(err) => self.settle_failure(Submission::Register, key, &err),
        }
    }

    // --- Full-class spot request ---

    /// Ask for a spot in a fully booked session.
    pub async fn request_spot<A: RegistrationApi>(
        &mut self,
        api: &A,
        session: &SessionSnapshot,
        schedule_id: &str,
        session_id: &str,
    ) -> Vec<Effect> {
        let key = match self.guard_spot_request(session, schedule_id, session_id) {
            Ok(key) => key,
            Err(effects) => return effects,
        };
        let token = session.token.clone().unwrap_or_default();
        let result = api
            .request_full_class(
                &token,
                &key.schedule_id,
                &key.session_id,
                FULL_CLASS_REQUEST_MESSAGE,
            )
            .await;
        self.settle_spot_request(key, result)
    }

    pub fn guard_spot_request(
        &mut self,
        session: &SessionSnapshot,
        schedule_id: &str,
        session_id: &str,
    ) -> Result<RegistrationKey, Vec<Effect>> {
        if !session.logged_in {
            self.notice = Some(Notice::info("Please log in to request a spot."));
            return Err(vec![Effect::Redirect {
                target: AuthTarget::Login,
                delay_ms: GUARD_REDIRECT_DELAY_MS,
            }]);
        }

        if !session.verified {
            self.notice = Some(Notice::info(
                "Please verify your email to request a spot.",
            ));
            return Err(vec![Effect::Redirect {
                target: AuthTarget::Verify,
                delay_ms: GUARD_REDIRECT_DELAY_MS,
            }]);
        }

        Ok(RegistrationKey::new(schedule_id, session_id))
    }

    pub fn settle_spot_request(
        &mut self,
        key: RegistrationKey,
        result: Result<(), ApiError>,
    ) -> Vec<Effect> {
        match result {
            Ok(()) => {
                self.note_pending(key);
                self.notice = Some(Notice::success(
                    "Your request has been sent! You'll be notified if a spot opens up.",
                ));
                vec![Effect::Reconcile {
                    delay_ms: RECONCILE_DELAY_MS,
                }]
            }
            Err(err) => self.settle_failure(Submission::FullClass, key, &err),
        }
    }

    // --- Reconcile fetch ---

    /// Fetch the authoritative registration list and replace local state.
    ///
    /// No-op unless the session is logged in, verified, and carries a token.
    /// `seq` must be allocated monotonically by the caller; results from a
    /// fetch older than the last applied one are discarded.
    pub async fn refresh<A: RegistrationApi>(
        &mut self,
        api: &A,
        session: &SessionSnapshot,
        seq: u64,
    ) -> Vec<Effect> {
        let Some(token) = session.authorized_token().map(str::to_string) else {
            return Vec::new();
        };
        let result = api.my_registrations(&token).await;
        self.settle_refresh(seq, result)
    }

    /// Apply a reconcile fetch result tagged with its sequence number.
    pub fn settle_refresh(
        &mut self,
        seq: u64,
        result: Result<Vec<RegistrationRecord>, ApiError>,
    ) -> Vec<Effect> {
        match result {
            Ok(records) => {
                self.apply_records(seq, &records);
                Vec::new()
            }
            Err(err) => match err.status() {
                Some(401) => self.expire_session(),
                Some(403) => {
                    self.notice = Some(Notice::error(
                        "You don't have permission to perform this action.",
                    ));
                    Vec::new()
                }
                // A failed load must not block the page; the next refresh
                // or remount retries.
                _ => Vec::new(),
            },
        }
    }

    // --- Internals ---

    fn note_pending(&mut self, key: RegistrationKey) {
        self.registered_schedules.insert(key.schedule_id.clone());
        self.statuses.insert(key, RegistrationState::pending());
    }

    fn expire_session(&mut self) -> Vec<Effect> {
        self.notice = Some(Notice::error(
            "Your session has expired. Please log in again.",
        ));
        vec![
            Effect::Logout,
            Effect::Redirect {
                target: AuthTarget::Login,
                delay_ms: EXPIRED_REDIRECT_DELAY_MS,
            },
        ]
    }

    /// The submission error ladder. Order matters: auth errors come first
    /// for every failing call, then the branches of decreasing specificity.
    fn settle_failure(
        &mut self,
        op: Submission,
        key: RegistrationKey,
        err: &ApiError,
    ) -> Vec<Effect> {
        if err.status() == Some(401) {
            return self.expire_session();
        }

        if err.status() == Some(403) {
            self.notice = Some(Notice::error(
                "You don't have permission to perform this action.",
            ));
            return Vec::new();
        }

        if err.is_conflict() {
            // The server already has this registration: fold the conflict
            // into the pending state and reconcile immediately.
            self.note_pending(key);
            self.notice = Some(Notice::info(match op {
                Submission::Register => "You've already registered for this session.",
                Submission::FullClass => {
                    "You've already requested a spot for this session."
                }
            }));
            return vec![Effect::Reconcile { delay_ms: 0 }];
        }

        if err
            .server_message()
            .is_some_and(|m| m.to_lowercase().contains("already started"))
        {
            self.notice = Some(Notice::error(
                "This session has already started. Registration is closed.",
            ));
            return Vec::new();
        }

        if err.status() == Some(404) {
            self.notice = Some(Notice::error(
                "Schedule or session not found. It may have been removed.",
            ));
            return Vec::new();
        }

        if err.status() == Some(500) {
            self.notice = Some(Notice::error(
                "Server error. Please try again in a moment.",
            ));
            return vec![Effect::Reconcile {
                delay_ms: RECONCILE_DELAY_MS,
            }];
        }

        if matches!(err, ApiError::Network(_)) {
            self.notice = Some(Notice::error(
                "Network error. Please check your connection and try again.",
            ));
            return Vec::new();
        }

        let fallback = match op {
            Submission::Register => "Failed to register. Please try again.",
            Submission::FullClass => "Failed to send request. Please try again.",
        };
        let text = err
            .server_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string());
        self.notice = Some(Notice::error(text));
        Vec::new()
    }

    /// Replace local state with a fetched registration list, unless a newer
    /// fetch has already been applied.
    fn apply_records(&mut self, seq: u64, records: &[RegistrationRecord]) {
        if seq <= self.fetch_seq {
            return;
        }
        self.fetch_seq = seq;

        let mut schedules = BTreeSet::new();
        let mut statuses = HashMap::new();
        for rec in records {
            let (Some(schedule), Some(session_id)) = (&rec.schedule, &rec.session_id)
            else {
                continue;
            };
            schedules.insert(schedule.id.clone());
            statuses.insert(
                RegistrationKey::new(schedule.id.clone(), session_id.clone()),
                RegistrationState {
                    status: rec.status,
                    payment_status: rec
                        .payment_status
                        .clone()
                        .unwrap_or_else(|| "unpaid".to_string()),
                    rejection_reason: rec.rejection_reason.clone().unwrap_or_default(),
                },
            );
        }
        self.registered_schedules = schedules;
        self.statuses = statuses;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScheduleRef;
    use std::cell::RefCell;

    /// Records every call; responses are popped front-first.
    #[derive(Default)]
    struct MockApi {
        calls: RefCell<Vec<String>>,
        submit: RefCell<Vec<Result<(), ApiError>>>,
        full_class: RefCell<Vec<Result<(), ApiError>>>,
        fetches: RefCell<Vec<Result<Vec<RegistrationRecord>, ApiError>>>,
    }

    impl MockApi {
        fn submit_ok() -> Self {
            let api = Self::default();
            api.submit.borrow_mut().push(Ok(()));
            api
        }

        fn submit_err(err: ApiError) -> Self {
            let api = Self::default();
            api.submit.borrow_mut().push(Err(err));
            api
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl RegistrationApi for MockApi {
        async fn my_registrations(
            &self,
            token: &str,
        ) -> Result<Vec<RegistrationRecord>, ApiError> {
            self.calls.borrow_mut().push(format!("fetch:{token}"));
            let mut fetches = self.fetches.borrow_mut();
            if fetches.is_empty() {
                Ok(Vec::new())
            } else {
                fetches.remove(0)
            }
        }

        async fn submit_registration(
            &self,
            _token: &str,
            schedule_id: &str,
            session_id: &str,
        ) -> Result<(), ApiError> {
            self.calls
                .borrow_mut()
                .push(format!("register:{schedule_id}:{session_id}"));
            self.submit.borrow_mut().remove(0)
        }

        async fn request_full_class(
            &self,
            _token: &str,
            schedule_id: &str,
            session_id: &str,
            message: &str,
        ) -> Result<(), ApiError> {
            assert_eq!(message, FULL_CLASS_REQUEST_MESSAGE);
            self.calls
                .borrow_mut()
                .push(format!("full:{schedule_id}:{session_id}"));
            self.full_class.borrow_mut().remove(0)
        }
    }

    fn record(schedule: &str, session: &str, status: RegistrationStatus) -> RegistrationRecord {
        RegistrationRecord {
            schedule: Some(ScheduleRef { id: schedule.to_string() }),
            session_id: Some(session.to_string()),
            status,
            payment_status: Some("unpaid".to_string()),
            rejection_reason: None,
        }
    }

    fn http(status: u16, message: &str) -> ApiError {
        ApiError::Http {
            status,
            message: message.to_string(),
            data: None,
        }
    }

    #[tokio::test]
    async fn anonymous_register_redirects_to_login_without_network_call() {
        let api = MockApi::default();
        let mut m = RegistrationMachine::new();

        let fx = m
            .register(&api, &SessionSnapshot::anonymous(), "c1", Some("s1"))
            .await;

        assert!(api.calls().is_empty());
        let notice = m.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Info);
        assert_eq!(notice.text, "Please log in to register for this schedule.");
        assert_eq!(
            fx,
            vec![Effect::Redirect {
                target: AuthTarget::Login,
                delay_ms: 1_500
            }]
        );
    }

    #[tokio::test]
    async fn unverified_register_redirects_to_verify() {
        let api = MockApi::default();
        let mut m = RegistrationMachine::new();

        let fx = m
            .register(&api, &SessionSnapshot::unverified("t"), "c1", Some("s1"))
            .await;

        assert!(api.calls().is_empty());
        assert_eq!(
            fx,
            vec![Effect::Redirect {
                target: AuthTarget::Verify,
                delay_ms: 1_500
            }]
        );
    }

    #[tokio::test]
    async fn register_without_selection_is_a_local_error() {
        let api = MockApi::default();
        let mut m = RegistrationMachine::new();

        for missing in [None, Some("")] {
            let fx = m
                .register(&api, &SessionSnapshot::verified("t"), "c1", missing)
                .await;
            assert!(fx.is_empty());
            let notice = m.notice().unwrap();
            assert_eq!(notice.kind, NoticeKind::Error);
            assert_eq!(notice.text, "Please select a session date first.");
        }
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn register_with_blank_schedule_id_is_invalid() {
        let api = MockApi::default();
        let mut m = RegistrationMachine::new();

        let fx = m
            .register(&api, &SessionSnapshot::verified("t"), "", Some("s1"))
            .await;

        assert!(fx.is_empty());
        assert!(api.calls().is_empty());
        assert_eq!(
            m.notice().unwrap().text,
            "Invalid registration request. Please try again."
        );
    }

    #[tokio::test]
    async fn pending_and_approved_slots_block_resubmission() {
        for (status, text) in [
            (
                RegistrationStatus::Pending,
                "Your registration is pending admin approval.",
            ),
            (
                RegistrationStatus::Approved,
                "You're already confirmed for this session.",
            ),
        ] {
            let api = MockApi::default();
            let mut m = RegistrationMachine::new();
            m.apply_records(1, &[record("c1", "s1", status)]);

            let fx = m
                .register(&api, &SessionSnapshot::verified("t"), "c1", Some("s1"))
                .await;

            assert!(fx.is_empty());
            assert!(api.calls().is_empty());
            let notice = m.notice().unwrap();
            assert_eq!(notice.kind, NoticeKind::Info);
            assert_eq!(notice.text, text);
        }
    }

    #[tokio::test]
    async fn rejected_slot_allows_resubmission() {
        let api = MockApi::submit_ok();
        let mut m = RegistrationMachine::new();
        m.apply_records(1, &[record("c1", "s1", RegistrationStatus::Rejected)]);

        let fx = m
            .register(&api, &SessionSnapshot::verified("t"), "c1", Some("s1"))
            .await;

        assert_eq!(api.calls(), vec!["register:c1:s1"]);
        let state = m.status(&RegistrationKey::new("c1", "s1")).unwrap();
        assert_eq!(state.status, RegistrationStatus::Pending);
        assert_eq!(fx, vec![Effect::Reconcile { delay_ms: 1_000 }]);
    }

    #[tokio::test]
    async fn successful_register_is_optimistically_pending() {
        let api = MockApi::submit_ok();
        let mut m = RegistrationMachine::new();

        let fx = m
            .register(&api, &SessionSnapshot::verified("t"), "c1", Some("s1"))
            .await;

        let state = m.status(&RegistrationKey::new("c1", "s1")).unwrap();
        assert_eq!(state.status, RegistrationStatus::Pending);
        assert_eq!(state.payment_status, "unpaid");
        assert_eq!(state.rejection_reason, "");
        assert!(m.registered_schedule_ids().contains("c1"));
        assert_eq!(m.notice().unwrap().kind, NoticeKind::Success);
        assert_eq!(fx, vec![Effect::Reconcile { delay_ms: 1_000 }]);
    }

    #[test]
    fn guard_and_settle_compose_like_the_async_surface() {
        let mut m = RegistrationMachine::new();
        let session = SessionSnapshot::verified("t");

        let key = m.guard_register(&session, "c1", Some("s1")).unwrap();
        assert_eq!(key, RegistrationKey::new("c1", "s1"));
        let fx = m.settle_register(key.clone(), Ok(()));

        assert_eq!(m.status(&key).unwrap().status, RegistrationStatus::Pending);
        assert_eq!(fx, vec![Effect::Reconcile { delay_ms: 1_000 }]);

        // The freshly pending slot now blocks the next guard pass.
        let blocked = m.guard_register(&session, "c1", Some("s1"));
        assert_eq!(blocked, Err(Vec::new()));
    }

    #[tokio::test]
    async fn conflict_is_folded_into_pending_without_duplicates() {
        // First submission succeeds, second races a 409 from the server.
        let api = MockApi::default();
        api.submit.borrow_mut().push(Ok(()));
        api.submit
            .borrow_mut()
            .push(Err(http(409, "already registered")));
        let mut m = RegistrationMachine::new();
        let session = SessionSnapshot::verified("t");

        m.register(&api, &session, "c1", Some("s1")).await;
        // Clear the optimistic slot so the duplicate check lets the second
        // attempt through to the wire.
        m.statuses.remove(&RegistrationKey::new("c1", "s1"));
        let fx = m.register(&api, &session, "c1", Some("s1")).await;

        let state = m.status(&RegistrationKey::new("c1", "s1")).unwrap();
        assert_eq!(state.status, RegistrationStatus::Pending);
        assert_eq!(
            m.registered_schedule_ids().iter().collect::<Vec<_>>(),
            vec!["c1"]
        );
        assert_eq!(m.notice().unwrap().kind, NoticeKind::Info);
        assert_eq!(fx, vec![Effect::Reconcile { delay_ms: 0 }]);
    }

    #[tokio::test]
    async fn nested_status_code_conflict_counts() {
        let api = MockApi::submit_err(ApiError::from_response(
            400,
            r#"{"message":"duplicate registration","statusCode":409}"#,
        ));
        let mut m = RegistrationMachine::new();

        let fx = m
            .register(&api, &SessionSnapshot::verified("t"), "c1", Some("s1"))
            .await;

        assert_eq!(
            m.status(&RegistrationKey::new("c1", "s1")).unwrap().status,
            RegistrationStatus::Pending
        );
        assert_eq!(fx, vec![Effect::Reconcile { delay_ms: 0 }]);
    }

    #[tokio::test]
    async fn unauthorized_submission_expires_the_session() {
        let api = MockApi::submit_err(http(401, "token expired"));
        let mut m = RegistrationMachine::new();

        let fx = m
            .register(&api, &SessionSnapshot::verified("t"), "c1", Some("s1"))
            .await;

        let notice = m.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.text, "Your session has expired. Please log in again.");
        assert_eq!(
            fx,
            vec![
                Effect::Logout,
                Effect::Redirect {
                    target: AuthTarget::Login,
                    delay_ms: 2_000
                }
            ]
        );
        // No optimistic state on failure.
        assert!(m.status(&RegistrationKey::new("c1", "s1")).is_none());
    }

    #[tokio::test]
    async fn forbidden_submission_changes_nothing() {
        let api = MockApi::submit_err(http(403, "forbidden"));
        let mut m = RegistrationMachine::new();

        let fx = m
            .register(&api, &SessionSnapshot::verified("t"), "c1", Some("s1"))
            .await;

        assert!(fx.is_empty());
        assert!(m.status(&RegistrationKey::new("c1", "s1")).is_none());
        assert_eq!(
            m.notice().unwrap().text,
            "You don't have permission to perform this action."
        );
    }

    #[tokio::test]
    async fn already_started_message_closes_registration() {
        let api = MockApi::submit_err(http(400, "Session has Already Started"));
        let mut m = RegistrationMachine::new();

        m.register(&api, &SessionSnapshot::verified("t"), "c1", Some("s1"))
            .await;

        assert_eq!(
            m.notice().unwrap().text,
            "This session has already started. Registration is closed."
        );
    }

    #[tokio::test]
    async fn not_found_and_server_error_branches() {
        let api = MockApi::submit_err(http(404, "no such schedule"));
        let mut m = RegistrationMachine::new();
        let fx = m
            .register(&api, &SessionSnapshot::verified("t"), "c1", Some("s1"))
            .await;
        assert!(fx.is_empty());
        assert_eq!(
            m.notice().unwrap().text,
            "Schedule or session not found. It may have been removed."
        );

        let api = MockApi::submit_err(http(500, "boom"));
        let fx = m
            .register(&api, &SessionSnapshot::verified("t"), "c1", Some("s1"))
            .await;
        assert_eq!(
            m.notice().unwrap().text,
            "Server error. Please try again in a moment."
        );
        assert_eq!(fx, vec![Effect::Reconcile { delay_ms: 1_000 }]);
    }

    #[tokio::test]
    async fn transport_failure_reads_as_network_error() {
        let api = MockApi::submit_err(ApiError::Network("connection reset".into()));
        let mut m = RegistrationMachine::new();

        let fx = m
            .register(&api, &SessionSnapshot::verified("t"), "c1", Some("s1"))
            .await;

        assert!(fx.is_empty());
        assert_eq!(
            m.notice().unwrap().text,
            "Network error. Please check your connection and try again."
        );
    }

    #[tokio::test]
    async fn other_errors_surface_the_server_message() {
        let api = MockApi::submit_err(http(422, "Phone number looks wrong"));
        let mut m = RegistrationMachine::new();

        m.register(&api, &SessionSnapshot::verified("t"), "c1", Some("s1"))
            .await;

        assert_eq!(m.notice().unwrap().text, "Phone number looks wrong");
    }

    #[tokio::test]
    async fn refresh_is_a_noop_for_unverified_sessions() {
        let api = MockApi::default();
        let mut m = RegistrationMachine::new();

        m.refresh(&api, &SessionSnapshot::anonymous(), 1).await;
        m.refresh(&api, &SessionSnapshot::unverified("t"), 2).await;
        let no_token = SessionSnapshot {
            logged_in: true,
            verified: true,
            token: None,
        };
        m.refresh(&api, &no_token, 3).await;

        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn refresh_replaces_optimistic_state_wholesale() {
        let api = MockApi::default();
        api.fetches.borrow_mut().push(Ok(vec![record(
            "c2",
            "s9",
            RegistrationStatus::Approved,
        )]));
        let mut m = RegistrationMachine::new();
        // Optimistic leftovers the server never confirmed.
        m.note_pending(RegistrationKey::new("c1", "s1"));

        m.refresh(&api, &SessionSnapshot::verified("t"), 1).await;

        assert!(m.status(&RegistrationKey::new("c1", "s1")).is_none());
        assert_eq!(
            m.status(&RegistrationKey::new("c2", "s9")).unwrap().status,
            RegistrationStatus::Approved
        );
        assert_eq!(
            m.registered_schedule_ids().iter().collect::<Vec<_>>(),
            vec!["c2"]
        );
    }

    #[tokio::test]
    async fn refresh_skips_records_with_missing_references() {
        let api = MockApi::default();
        let broken = RegistrationRecord {
            schedule: None,
            session_id: Some("s1".into()),
            status: RegistrationStatus::Pending,
            payment_status: None,
            rejection_reason: None,
        };
        api.fetches
            .borrow_mut()
            .push(Ok(vec![broken, record("c1", "s2", RegistrationStatus::Pending)]));
        let mut m = RegistrationMachine::new();

        m.refresh(&api, &SessionSnapshot::verified("t"), 1).await;

        assert_eq!(m.registered_sessions("c1").len(), 1);
        assert!(m.status(&RegistrationKey::new("c1", "s2")).is_some());
    }

    #[tokio::test]
    async fn stale_refresh_results_are_discarded() {
        let api = MockApi::default();
        api.fetches.borrow_mut().push(Ok(vec![record(
            "new",
            "s1",
            RegistrationStatus::Pending,
        )]));
        api.fetches.borrow_mut().push(Ok(vec![record(
            "old",
            "s1",
            RegistrationStatus::Pending,
        )]));
        let mut m = RegistrationMachine::new();
        let session = SessionSnapshot::verified("t");

        // Fetch tagged 2 lands first; the one tagged 1 resolves late.
        m.refresh(&api, &session, 2).await;
        m.refresh(&api, &session, 1).await;

        assert!(m.registered_schedule_ids().contains("new"));
        assert!(!m.registered_schedule_ids().contains("old"));
    }

    #[tokio::test]
    async fn unauthorized_refresh_logs_out() {
        let api = MockApi::default();
        api.fetches.borrow_mut().push(Err(http(401, "expired")));
        let mut m = RegistrationMachine::new();

        let fx = m.refresh(&api, &SessionSnapshot::verified("t"), 1).await;

        assert_eq!(
            fx,
            vec![
                Effect::Logout,
                Effect::Redirect {
                    target: AuthTarget::Login,
                    delay_ms: 2_000
                }
            ]
        );
    }

    #[tokio::test]
    async fn failed_refresh_is_swallowed() {
        let api = MockApi::default();
        api.fetches
            .borrow_mut()
            .push(Err(ApiError::Network("offline".into())));
        let mut m = RegistrationMachine::new();
        m.note_pending(RegistrationKey::new("c1", "s1"));

        let fx = m.refresh(&api, &SessionSnapshot::verified("t"), 1).await;

        assert!(fx.is_empty());
        assert!(m.notice().is_none());
        assert!(m.status(&RegistrationKey::new("c1", "s1")).is_some());
    }

    #[tokio::test]
    async fn anonymous_spot_request_redirects_without_network_call() {
        let api = MockApi::default();
        let mut m = RegistrationMachine::new();

        let fx = m
            .request_spot(&api, &SessionSnapshot::anonymous(), "c1", "s1")
            .await;

        assert!(api.calls().is_empty());
        assert_eq!(m.notice().unwrap().text, "Please log in to request a spot.");
        assert_eq!(
            fx,
            vec![Effect::Redirect {
                target: AuthTarget::Login,
                delay_ms: 1_500
            }]
        );
    }

    #[tokio::test]
    async fn spot_request_success_and_conflict() {
        let api = MockApi::default();
        api.full_class.borrow_mut().push(Ok(()));
        let mut m = RegistrationMachine::new();
        let session = SessionSnapshot::verified("t");

        let fx = m.request_spot(&api, &session, "c1", "s1").await;
        assert_eq!(api.calls(), vec!["full:c1:s1"]);
        assert_eq!(
            m.status(&RegistrationKey::new("c1", "s1")).unwrap().status,
            RegistrationStatus::Pending
        );
        assert_eq!(fx, vec![Effect::Reconcile { delay_ms: 1_000 }]);

        let api = MockApi::default();
        api.full_class
            .borrow_mut()
            .push(Err(http(409, "already requested")));
        let fx = m.request_spot(&api, &session, "c1", "s2").await;
        assert_eq!(
            m.notice().unwrap().text,
            "You've already requested a spot for this session."
        );
        assert_eq!(fx, vec![Effect::Reconcile { delay_ms: 0 }]);
    }

    #[test]
    fn registered_sessions_are_scoped_per_schedule() {
        let mut m = RegistrationMachine::new();
        m.note_pending(RegistrationKey::new("c1", "s1"));
        m.note_pending(RegistrationKey::new("c1", "s2"));
        m.note_pending(RegistrationKey::new("c2", "s1"));

        let sessions = m.registered_sessions("c1");
        assert_eq!(sessions.len(), 2);
        assert!(sessions.contains("s1") && sessions.contains("s2"));
    }

    #[test]
    fn keys_with_colons_in_ids_do_not_collide() {
        let mut m = RegistrationMachine::new();
        m.note_pending(RegistrationKey::new("a:b", "c"));

        assert!(m.status(&RegistrationKey::new("a", "b:c")).is_none());
        assert!(m.status(&RegistrationKey::new("a:b", "c")).is_some());
    }
}
