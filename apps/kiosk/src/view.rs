use client_core::{LoginStep, LoginView, ViewEffect};
use shared::domain::{NcoId, NcoUser};

/// Renders login effects as terminal output and remembers the roster so the
/// input loop can map menu numbers back to ids.
#[derive(Default)]
pub struct TerminalView {
    roster: Vec<NcoUser>,
}

impl TerminalView {
    pub fn roster(&self) -> &[NcoUser] {
        &self.roster
    }
}

impl LoginView for TerminalView {
    fn apply(&mut self, effect: &ViewEffect) {
        match effect {
            ViewEffect::ShowStep(LoginStep::System) => println!("\n== System sign-in =="),
            ViewEffect::ShowStep(LoginStep::User) => println!("\n== NCO selection =="),
            ViewEffect::SetSubtitle(text) => println!("{text}"),
            ViewEffect::SetBusy(_, true) => println!("(contacting server)"),
            ViewEffect::ShowError(_, error) => println!("! {error}"),
            ViewEffect::RenderRoster(users) => {
                self.roster = users.clone();
                for (index, user) in users.iter().enumerate() {
                    println!("  {}. {}", index + 1, user.display_label());
                }
            }
            ViewEffect::ShowSignedInNotice => {
                println!("An operator session is already active.");
            }
            ViewEffect::NavigateHome => println!("Signed in. Opening the sign-out board."),
            ViewEffect::ClearField(_)
            | ViewEffect::Focus(_)
            | ViewEffect::DeferredFocus(_)
            | ViewEffect::SetBusy(_, false)
            | ViewEffect::ClearError(_)
            | ViewEffect::HideSignedInNotice => {}
        }
    }
}

/// Maps a 1-based menu entry to the roster id it labels.
pub fn parse_selection(input: &str, roster: &[NcoUser]) -> Option<NcoId> {
    let index: usize = input.trim().parse().ok()?;
    (1..=roster.len())
        .contains(&index)
        .then(|| roster[index - 1].id)
}
