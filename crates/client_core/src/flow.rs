use shared::{
    domain::{NcoId, NcoUser},
    error::FlowError,
    protocol::SessionProbe,
};

use crate::gateway::GatewayError;

pub const SYSTEM_STEP_SUBTITLE: &str = "Enter the system password to continue.";
pub const USER_STEP_SUBTITLE: &str = "Select your name and enter your PIN.";

pub const SYSTEM_PASSWORD_REQUIRED: &str = "Please enter the system password";
pub const NCO_SELECTION_REQUIRED: &str = "Please select an NCO";
pub const PIN_REQUIRED: &str = "Please enter your PIN";
pub const SYSTEM_REJECTED_FALLBACK: &str = "Invalid system password";
pub const PIN_REJECTED_FALLBACK: &str = "Invalid PIN";
pub const ROSTER_LOAD_FAILED: &str = "Unable to load the NCO list";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStep {
    System,
    User,
}

/// How the login screen was reached. After an internal redirect a
/// fully-authenticated session must not bounce straight back to the
/// application root, or the two pages would redirect each other forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEntry {
    Direct,
    InternalRedirect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    SystemPassword,
    NcoSelect,
    Pin,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoginEvent {
    CheckRequested,
    CheckResolved(Result<SessionProbe, GatewayError>),
    SystemSubmitted { password: String },
    SystemResolved(Result<(), GatewayError>),
    RosterResolved(Result<Vec<NcoUser>, GatewayError>),
    UserSubmitted { user_id: Option<NcoId>, pin: String },
    UserResolved(Result<(), GatewayError>),
    LogoutRequested,
    NoticeDismissed,
}

/// Rendering instructions for the login view. The view owns the actual
/// controls; the flow only names them.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEffect {
    ShowStep(LoginStep),
    SetSubtitle(&'static str),
    ClearField(Field),
    Focus(Field),
    /// Focus deferred past the panel transition when entering the user step.
    DeferredFocus(Field),
    SetBusy(LoginStep, bool),
    ShowError(LoginStep, FlowError),
    ClearError(LoginStep),
    RenderRoster(Vec<NcoUser>),
    ShowSignedInNotice,
    HideSignedInNotice,
    NavigateHome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    CheckSession,
    SubmitSystemPassword(String),
    FetchRoster,
    SubmitUserPin { user_id: NcoId, pin: String },
    PostLogout,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoginEffect {
    Ui(ViewEffect),
    Call(BackendCommand),
}

/// Two-step login machine: system password first, then operator + PIN.
///
/// Pure state: every transition goes through [`LoginFlow::handle`], which
/// returns the rendering and backend work the caller must perform. Network
/// results come back in as `*Resolved` events.
pub struct LoginFlow {
    step: LoginStep,
    entry: PageEntry,
    busy: Option<LoginStep>,
    check_in_flight: bool,
    notice_visible: bool,
    navigated: bool,
}

impl LoginFlow {
    pub fn new(entry: PageEntry) -> Self {
        Self {
            step: LoginStep::System,
            entry,
            busy: None,
            check_in_flight: false,
            notice_visible: false,
            navigated: false,
        }
    }

    pub fn step(&self) -> LoginStep {
        self.step
    }

    /// True once the flow has asked the view to leave for the application
    /// root. Later events are ignored.
    pub fn navigated(&self) -> bool {
        self.navigated
    }

    pub fn handle(&mut self, event: LoginEvent) -> Vec<LoginEffect> {
        if self.navigated {
            return Vec::new();
        }
        match event {
            LoginEvent::CheckRequested => self.on_check_requested(),
            LoginEvent::CheckResolved(result) => self.on_check_resolved(result),
            LoginEvent::SystemSubmitted { password } => self.on_system_submitted(password),
            LoginEvent::SystemResolved(result) => self.on_system_resolved(result),
            LoginEvent::RosterResolved(result) => self.on_roster_resolved(result),
            LoginEvent::UserSubmitted { user_id, pin } => self.on_user_submitted(user_id, pin),
            LoginEvent::UserResolved(result) => self.on_user_resolved(result),
            LoginEvent::LogoutRequested => self.on_logout_requested(),
            LoginEvent::NoticeDismissed => self.on_notice_dismissed(),
        }
    }

    // Overlapping session checks are coalesced; only the first one while
    // idle issues the backend call.
    fn on_check_requested(&mut self) -> Vec<LoginEffect> {
        if self.check_in_flight {
            return Vec::new();
        }
        self.check_in_flight = true;
        vec![LoginEffect::Call(BackendCommand::CheckSession)]
    }

    fn on_check_resolved(
        &mut self,
        result: Result<SessionProbe, GatewayError>,
    ) -> Vec<LoginEffect> {
        self.check_in_flight = false;
        let probe = match result {
            Ok(probe) => probe,
            // A failed check is indistinguishable from a fresh session as
            // far as the operator is concerned.
            Err(_) => return self.enter_system_step(),
        };
        if probe.authenticated {
            return match self.entry {
                PageEntry::Direct => {
                    self.navigated = true;
                    vec![LoginEffect::Ui(ViewEffect::NavigateHome)]
                }
                PageEntry::InternalRedirect => {
                    self.notice_visible = true;
                    let mut effects = self.enter_system_step();
                    effects.push(LoginEffect::Ui(ViewEffect::ShowSignedInNotice));
                    effects
                }
            };
        }
        if probe.system_authenticated {
            return vec![LoginEffect::Call(BackendCommand::FetchRoster)];
        }
        self.enter_system_step()
    }

    fn on_system_submitted(&mut self, password: String) -> Vec<LoginEffect> {
        if self.step != LoginStep::System || self.busy.is_some() {
            return Vec::new();
        }
        if password.is_empty() {
            return vec![LoginEffect::Ui(ViewEffect::ShowError(
                LoginStep::System,
                FlowError::Validation(SYSTEM_PASSWORD_REQUIRED),
            ))];
        }
        self.busy = Some(LoginStep::System);
        vec![
            LoginEffect::Ui(ViewEffect::ClearError(LoginStep::System)),
            LoginEffect::Ui(ViewEffect::SetBusy(LoginStep::System, true)),
            LoginEffect::Call(BackendCommand::SubmitSystemPassword(password)),
        ]
    }

    fn on_system_resolved(&mut self, result: Result<(), GatewayError>) -> Vec<LoginEffect> {
        match result {
            // The submit control stays busy until the roster arrives; the
            // password gesture is not done until the user step can render.
            Ok(()) => vec![LoginEffect::Call(BackendCommand::FetchRoster)],
            Err(err) => {
                self.busy = None;
                vec![
                    LoginEffect::Ui(ViewEffect::SetBusy(LoginStep::System, false)),
                    LoginEffect::Ui(ViewEffect::ShowError(
                        LoginStep::System,
                        flow_error(err, SYSTEM_REJECTED_FALLBACK),
                    )),
                ]
            }
        }
    }

    fn on_roster_resolved(
        &mut self,
        result: Result<Vec<NcoUser>, GatewayError>,
    ) -> Vec<LoginEffect> {
        let mut effects = Vec::new();
        if self.busy.take().is_some() {
            effects.push(LoginEffect::Ui(ViewEffect::SetBusy(LoginStep::System, false)));
        }
        match result {
            Ok(users) => {
                effects.push(LoginEffect::Ui(ViewEffect::RenderRoster(users)));
                effects.extend(self.enter_user_step());
            }
            Err(err) => {
                effects.extend(self.enter_user_step());
                effects.push(LoginEffect::Ui(ViewEffect::ShowError(
                    LoginStep::User,
                    flow_error(err, ROSTER_LOAD_FAILED),
                )));
            }
        }
        effects
    }

    fn on_user_submitted(&mut self, user_id: Option<NcoId>, pin: String) -> Vec<LoginEffect> {
        if self.step != LoginStep::User || self.busy.is_some() {
            return Vec::new();
        }
        let Some(user_id) = user_id else {
            return vec![LoginEffect::Ui(ViewEffect::ShowError(
                LoginStep::User,
                FlowError::Validation(NCO_SELECTION_REQUIRED),
            ))];
        };
        if pin.is_empty() {
            return vec![LoginEffect::Ui(ViewEffect::ShowError(
                LoginStep::User,
                FlowError::Validation(PIN_REQUIRED),
            ))];
        }
        self.busy = Some(LoginStep::User);
        vec![
            LoginEffect::Ui(ViewEffect::ClearError(LoginStep::User)),
            LoginEffect::Ui(ViewEffect::SetBusy(LoginStep::User, true)),
            LoginEffect::Call(BackendCommand::SubmitUserPin { user_id, pin }),
        ]
    }

    fn on_user_resolved(&mut self, result: Result<(), GatewayError>) -> Vec<LoginEffect> {
        self.busy = None;
        let mut effects = vec![LoginEffect::Ui(ViewEffect::SetBusy(LoginStep::User, false))];
        match result {
            Ok(()) => {
                self.navigated = true;
                effects.push(LoginEffect::Ui(ViewEffect::NavigateHome));
            }
            Err(err) => effects.push(LoginEffect::Ui(ViewEffect::ShowError(
                LoginStep::User,
                flow_error(err, PIN_REJECTED_FALLBACK),
            ))),
        }
        effects
    }

    // Logout is best-effort: the machine returns to the system step no
    // matter what the backend says, and the driver discards the response.
    fn on_logout_requested(&mut self) -> Vec<LoginEffect> {
        if self.step != LoginStep::User {
            return Vec::new();
        }
        self.busy = None;
        let mut effects = vec![
            LoginEffect::Call(BackendCommand::PostLogout),
            LoginEffect::Ui(ViewEffect::ClearField(Field::NcoSelect)),
        ];
        effects.extend(self.enter_system_step());
        effects
    }

    fn on_notice_dismissed(&mut self) -> Vec<LoginEffect> {
        if !self.notice_visible {
            return Vec::new();
        }
        self.notice_visible = false;
        vec![LoginEffect::Ui(ViewEffect::HideSignedInNotice)]
    }

    fn enter_system_step(&mut self) -> Vec<LoginEffect> {
        self.step = LoginStep::System;
        vec![
            LoginEffect::Ui(ViewEffect::ShowStep(LoginStep::System)),
            LoginEffect::Ui(ViewEffect::SetSubtitle(SYSTEM_STEP_SUBTITLE)),
            LoginEffect::Ui(ViewEffect::ClearError(LoginStep::System)),
            LoginEffect::Ui(ViewEffect::ClearField(Field::SystemPassword)),
            LoginEffect::Ui(ViewEffect::ClearField(Field::Pin)),
            LoginEffect::Ui(ViewEffect::Focus(Field::SystemPassword)),
        ]
    }

    fn enter_user_step(&mut self) -> Vec<LoginEffect> {
        self.step = LoginStep::User;
        vec![
            LoginEffect::Ui(ViewEffect::ShowStep(LoginStep::User)),
            LoginEffect::Ui(ViewEffect::SetSubtitle(USER_STEP_SUBTITLE)),
            LoginEffect::Ui(ViewEffect::ClearError(LoginStep::User)),
            LoginEffect::Ui(ViewEffect::ClearField(Field::Pin)),
            LoginEffect::Ui(ViewEffect::DeferredFocus(Field::NcoSelect)),
        ]
    }
}

fn flow_error(err: GatewayError, rejection_fallback: &str) -> FlowError {
    match err {
        GatewayError::Rejected { message } => FlowError::rejected(message, rejection_fallback),
        GatewayError::Transport { .. } => FlowError::Transport,
    }
}

#[cfg(test)]
#[path = "tests/flow_tests.rs"]
mod tests;
