//! Drives the registration state machine from the UI.
//!
//! The machine itself lives in `way-shared` and is pure; this hook owns it
//! in a signal, feeds it session snapshots and API results, and runs the
//! effects it returns: delayed redirects, logout, reconcile fetches, and
//! the 5-second notice expiry. Every timer and in-flight request is spawned
//! with `spawn`, so unmounting the owning component cancels them.

use dioxus::prelude::*;
use dioxus::prelude::dioxus_router::Navigator;

use way_shared::registration::{
    AuthTarget, Effect, Notice, RegistrationApi, RegistrationMachine, RegistrationState,
    NOTICE_TTL_MS,
};

use crate::auth_session::AuthContext;
use crate::hooks::time::sleep_ms;
use crate::routes::Route;
use crate::{log_error, log_info, log_warn};

/// Handle returned by [`use_registration`]; cheap to copy into closures.
#[derive(Clone, Copy)]
pub struct Registration {
    auth: AuthContext,
    nav: Navigator,
    machine: Signal<RegistrationMachine>,
    busy: Signal<bool>,
    /// Monotonic tag for reconcile fetches; stale results are discarded.
    fetch_seq: Signal<u64>,
    /// Monotonic tag for notice expiry timers; a replaced notice restarts
    /// the clock and orphans the old timer.
    notice_seq: Signal<u64>,
}

pub fn use_registration() -> Registration {
    let auth = use_context::<AuthContext>();
    let nav = use_navigator();
    let machine = use_signal(RegistrationMachine::new);
    let busy = use_signal(|| false);
    let fetch_seq = use_signal(|| 0u64);
    let notice_seq = use_signal(|| 0u64);

    let reg = Registration {
        auth,
        nav,
        machine,
        busy,
        fetch_seq,
        notice_seq,
    };

    // Load the user's registrations whenever the session transitions to
    // logged-in + verified, including on mount if it already is.
    use_effect(move || {
        if auth.is_logged_in() && auth.is_verified() {
            spawn(async move {
                reg.refresh_now().await;
            });
        }
    });

    reg
}

impl Registration {
    // --- Read side (reactive when called during render) ---

    pub fn busy(&self) -> bool {
        (self.busy)()
    }

    pub fn notice(&self) -> Option<Notice> {
        self.machine.read().notice().cloned()
    }

    /// Registration slots for one schedule, keyed by session id.
    pub fn schedule_statuses(
        &self,
        schedule_id: &str,
    ) -> std::collections::BTreeMap<String, RegistrationState> {
        self.machine.read().statuses_for(schedule_id)
    }

    // --- Actions ---

    /// Register for one session of a schedule.
    pub fn register(&self, schedule_id: String, session_id: Option<String>) {
        let this = *self;
        spawn(async move {
            this.submit_register(schedule_id, session_id).await;
        });
    }

    /// Request a spot in a fully booked session.
    pub fn request_spot(&self, schedule_id: String, session_id: String) {
        let this = *self;
        spawn(async move {
            this.submit_spot_request(schedule_id, session_id).await;
        });
    }

    // --- Drivers ---
    //
    // Guard and settle run synchronously against the signal; the network
    // await happens in between with no borrow held.

    async fn submit_register(mut self, schedule_id: String, session_id: Option<String>) {
        if *self.busy.peek() {
            return;
        }
        let session = self.auth.snapshot();
        let guard = self.machine.write().guard_register(
            &session,
            &schedule_id,
            session_id.as_deref(),
        );
        match guard {
            Err(effects) => {
                self.arm_notice_expiry();
                self.run_effects(effects);
            }
            Ok(key) => {
                log_info!(
                    "submitting registration for {} / {}",
                    key.schedule_id,
                    key.session_id
                );
                self.busy.set(true);
                let api = self.auth.client();
                let token = session.token.unwrap_or_default();
                let result = api
                    .submit_registration(&token, &key.schedule_id, &key.session_id)
                    .await;
                self.busy.set(false);
                let effects = self.machine.write().settle_register(key, result);
                self.arm_notice_expiry();
                self.run_effects(effects);
            }
        }
    }

    async fn submit_spot_request(mut self, schedule_id: String, session_id: String) {
        if *self.busy.peek() {
            return;
        }
        let session = self.auth.snapshot();
        let guard =
            self.machine
                .write()
                .guard_spot_request(&session, &schedule_id, &session_id);
        match guard {
            Err(effects) => {
                self.arm_notice_expiry();
                self.run_effects(effects);
            }
            Ok(key) => {
                self.busy.set(true);
                let api = self.auth.client();
                let token = session.token.unwrap_or_default();
                let result = api
                    .request_full_class(
                        &token,
                        &key.schedule_id,
                        &key.session_id,
                        way_shared::registration::FULL_CLASS_REQUEST_MESSAGE,
                    )
                    .await;
                self.busy.set(false);
                let effects = self.machine.write().settle_spot_request(key, result);
                self.arm_notice_expiry();
                self.run_effects(effects);
            }
        }
    }

    async fn refresh_now(mut self) {
        let session = self.auth.snapshot();
        let Some(token) = session.authorized_token().map(str::to_string) else {
            return;
        };

        let seq = *self.fetch_seq.peek() + 1;
        self.fetch_seq.set(seq);

        let api = self.auth.client();
        let result = api.my_registrations(&token).await;
        if let Err(err) = &result {
            log_error!("could not load registrations: {err}");
        }
        let effects = self.machine.write().settle_refresh(seq, result);
        self.arm_notice_expiry();
        self.run_effects(effects);
    }

    fn run_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            let mut this = *self;
            spawn(async move {
                match effect {
                    Effect::Logout => {
                        log_warn!("auth token rejected, clearing session");
                        this.auth.logout();
                    }
                    Effect::Redirect { target, delay_ms } => {
                        sleep_ms(delay_ms).await;
                        let route = match target {
                            AuthTarget::Login => Route::Login {},
                            AuthTarget::Verify => Route::Verify {},
                        };
                        this.nav.push(route);
                    }
                    Effect::Reconcile { delay_ms } => {
                        if delay_ms > 0 {
                            sleep_ms(delay_ms).await;
                        }
                        this.refresh_now().await;
                    }
                }
            });
        }
    }

    /// Start (or restart) the auto-dismiss clock for the current notice.
    fn arm_notice_expiry(&self) {
        let mut this = *self;
        if this.machine.peek().notice().is_none() {
            return;
        }
        let seq = *this.notice_seq.peek() + 1;
        this.notice_seq.set(seq);
        spawn(async move {
            sleep_ms(NOTICE_TTL_MS).await;
            // Only clear if no newer notice replaced this one meanwhile.
            if *this.notice_seq.peek() == seq {
                this.machine.write().clear_notice();
            }
        });
    }
}
