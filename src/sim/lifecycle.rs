//! Lifecycle state machine
//!
//! Maps (state, command) to the transition the game must carry out. Anything
//! not listed is ignored.

use std::str::FromStr;

use thiserror::Error;

pub use super::state::Lifecycle;

/// Parameterless requests from the host UI or input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Restart,
    Pause,
    Resume,
    TogglePause,
    ReturnToMenu,
    ShowInstructions,
    HideInstructions,
}

/// Command name the host sent that we do not know
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown command: {0:?}")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    /// Accepts kebab-case names as sent by the page ("toggle-pause")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "start" => Command::Start,
            "restart" => Command::Restart,
            "pause" => Command::Pause,
            "resume" => Command::Resume,
            "toggle-pause" => Command::TogglePause,
            "menu" | "return-to-menu" => Command::ReturnToMenu,
            "show-instructions" => Command::ShowInstructions,
            "hide-instructions" => Command::HideInstructions,
            _ => return Err(UnknownCommand(s.to_owned())),
        })
    }
}

/// Work the game performs for an accepted command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Reset everything and enter Playing
    BeginRun,
    /// Playing -> Paused
    Suspend,
    /// Paused -> Playing
    Unsuspend,
    /// Release the run and return to Menu
    EndRun,
    /// Show or hide the instructions panel (Menu only)
    Instructions(bool),
}

impl Lifecycle {
    /// Transition for `command` in this state, `None` if it does not apply
    pub fn on_command(self, command: Command) -> Option<Transition> {
        use Command::*;
        use Lifecycle::*;

        match (self, command) {
            (Menu | GameOver, Start | Restart) => Some(Transition::BeginRun),
            (Paused, Restart) => Some(Transition::BeginRun),
            (Playing, Pause | TogglePause) => Some(Transition::Suspend),
            (Paused, Resume | TogglePause) => Some(Transition::Unsuspend),
            (Paused | GameOver, ReturnToMenu) => Some(Transition::EndRun),
            (Menu, ShowInstructions) => Some(Transition::Instructions(true)),
            (Menu, HideInstructions) => Some(Transition::Instructions(false)),
            _ => None,
        }
    }

    /// State after `transition` completes
    pub fn after(self, transition: Transition) -> Lifecycle {
        match transition {
            Transition::BeginRun | Transition::Unsuspend => Lifecycle::Playing,
            Transition::Suspend => Lifecycle::Paused,
            Transition::EndRun => Lifecycle::Menu,
            Transition::Instructions(_) => self,
        }
    }

    /// Only a running, unpaused game advances the simulation
    pub fn is_simulating(self) -> bool {
        self == Lifecycle::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_COMMANDS: [Command; 8] = [
        Command::Start,
        Command::Restart,
        Command::Pause,
        Command::Resume,
        Command::TogglePause,
        Command::ReturnToMenu,
        Command::ShowInstructions,
        Command::HideInstructions,
    ];

    #[test]
    fn menu_only_starts_or_toggles_instructions() {
        let accepted: Vec<_> = ALL_COMMANDS
            .iter()
            .filter_map(|&c| Lifecycle::Menu.on_command(c).map(|t| (c, t)))
            .collect();
        assert_eq!(
            accepted,
            vec![
                (Command::Start, Transition::BeginRun),
                (Command::Restart, Transition::BeginRun),
                (Command::ShowInstructions, Transition::Instructions(true)),
                (Command::HideInstructions, Transition::Instructions(false)),
            ]
        );
    }

    #[test]
    fn pause_round_trip() {
        let t = Lifecycle::Playing.on_command(Command::TogglePause).unwrap();
        let paused = Lifecycle::Playing.after(t);
        assert_eq!(paused, Lifecycle::Paused);
        assert!(!paused.is_simulating());

        let t = paused.on_command(Command::TogglePause).unwrap();
        assert_eq!(paused.after(t), Lifecycle::Playing);
        assert_eq!(paused.on_command(Command::Pause), None);
        assert_eq!(Lifecycle::Playing.on_command(Command::Resume), None);
    }

    #[test]
    fn playing_ignores_restart_and_menu() {
        assert_eq!(Lifecycle::Playing.on_command(Command::Restart), None);
        assert_eq!(Lifecycle::Playing.on_command(Command::Start), None);
        assert_eq!(Lifecycle::Playing.on_command(Command::ReturnToMenu), None);
    }

    #[test]
    fn game_over_restarts_or_leaves() {
        let t = Lifecycle::GameOver.on_command(Command::Restart).unwrap();
        assert_eq!(Lifecycle::GameOver.after(t), Lifecycle::Playing);
        let t = Lifecycle::GameOver.on_command(Command::ReturnToMenu).unwrap();
        assert_eq!(Lifecycle::GameOver.after(t), Lifecycle::Menu);
        assert_eq!(Lifecycle::GameOver.on_command(Command::TogglePause), None);
    }

    #[test]
    fn parses_host_command_names() {
        assert_eq!("toggle-pause".parse(), Ok(Command::TogglePause));
        assert_eq!("menu".parse(), Ok(Command::ReturnToMenu));
        assert_eq!(
            "jump".parse::<Command>(),
            Err(UnknownCommand("jump".to_owned()))
        );
    }

    #[test]
    fn only_playing_simulates() {
        assert!(Lifecycle::Playing.is_simulating());
        for state in [Lifecycle::Menu, Lifecycle::Paused, Lifecycle::GameOver] {
            assert!(!state.is_simulating());
        }
    }
}
