use std::{collections::VecDeque, sync::Arc};

use tracing::warn;

use crate::{
    flow::{BackendCommand, LoginEffect, LoginEvent, LoginFlow, LoginStep, PageEntry, ViewEffect},
    gateway::{AuthGateway, GatewayError},
};

/// Rendering sink for the login flow. Built once at startup; the flow never
/// reaches for controls by name.
pub trait LoginView: Send {
    fn apply(&mut self, effect: &ViewEffect);
}

/// Drives the pure [`LoginFlow`] against a real backend: executes the
/// backend commands it emits, feeds the results back in as events, and
/// forwards rendering effects to the view. Single task, one call in flight
/// at a time, no timeouts.
pub struct LoginController<V: LoginView> {
    flow: LoginFlow,
    gateway: Arc<dyn AuthGateway>,
    view: V,
}

impl<V: LoginView> LoginController<V> {
    pub fn new(entry: PageEntry, gateway: Arc<dyn AuthGateway>, view: V) -> Self {
        Self {
            flow: LoginFlow::new(entry),
            gateway,
            view,
        }
    }

    pub fn step(&self) -> LoginStep {
        self.flow.step()
    }

    pub fn finished(&self) -> bool {
        self.flow.navigated()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// The on-load transition: probe the session and render whichever step
    /// it calls for.
    pub async fn start(&mut self) {
        self.dispatch(LoginEvent::CheckRequested).await;
    }

    /// Runs one event and every follow-up it triggers until the flow goes
    /// quiet.
    pub async fn dispatch(&mut self, event: LoginEvent) {
        let mut pending = VecDeque::from([event]);
        while let Some(event) = pending.pop_front() {
            for effect in self.flow.handle(event) {
                match effect {
                    LoginEffect::Ui(effect) => self.view.apply(&effect),
                    LoginEffect::Call(command) => {
                        if let Some(follow_up) = self.execute(command).await {
                            pending.push_back(follow_up);
                        }
                    }
                }
            }
        }
    }

    async fn execute(&self, command: BackendCommand) -> Option<LoginEvent> {
        match command {
            BackendCommand::CheckSession => {
                let result = self.gateway.check_session().await;
                log_transport("session check", result.as_ref().err());
                Some(LoginEvent::CheckResolved(result))
            }
            BackendCommand::SubmitSystemPassword(password) => {
                let result = self.gateway.system_login(&password).await;
                log_transport("system login", result.as_ref().err());
                Some(LoginEvent::SystemResolved(result))
            }
            BackendCommand::FetchRoster => {
                let result = self.gateway.fetch_roster().await;
                log_transport("roster fetch", result.as_ref().err());
                Some(LoginEvent::RosterResolved(result))
            }
            BackendCommand::SubmitUserPin { user_id, pin } => {
                let result = self.gateway.user_login(user_id, &pin).await;
                log_transport("user login", result.as_ref().err());
                Some(LoginEvent::UserResolved(result))
            }
            BackendCommand::PostLogout => {
                if let Err(error) = self.gateway.logout().await {
                    warn!(error = %error, "logout request failed");
                }
                None
            }
        }
    }
}

fn log_transport(call: &str, err: Option<&GatewayError>) {
    if let Some(err @ GatewayError::Transport { .. }) = err {
        warn!(call, error = %err, "auth backend unreachable");
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
