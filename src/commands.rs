//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use crate::debounce::{DebounceChannel, TimerToken};
use crate::messages::Msg;

/// Parts of the UI a command invalidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DamageArea {
    /// The document view (content, selection, decorations)
    Editor,
    /// The outline rows
    Outline,
    /// The "updated ..." label
    Timestamp,
    /// Sidebar fold state
    Sidebar,
}

/// Side effects requested by `update`
#[derive(Debug, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Request a full redraw
    Redraw,
    /// Request a partial redraw of specific areas
    RedrawAreas(Vec<DamageArea>),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
    /// Start a debounce timer
    /// After delay_ms, sends Msg::Timer(Fired { channel, token })
    StartTimer {
        channel: DebounceChannel,
        token: TimerToken,
        delay_ms: u64,
    },
    /// Send `msg` back to update after `delay_ms`
    Delay { delay_ms: u64, msg: Box<Msg> },
    /// Request runtime exit
    Quit,
}

impl Cmd {
    /// Combine commands, dropping no-ops
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut cmds: Vec<Cmd> = cmds
            .into_iter()
            .filter(|cmd| !matches!(cmd, Cmd::None))
            .collect();
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.remove(0),
            _ => Cmd::Batch(cmds),
        }
    }

    pub fn delay(delay_ms: u64, msg: Msg) -> Self {
        Cmd::Delay {
            delay_ms,
            msg: Box::new(msg),
        }
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::RedrawAreas(areas) => !areas.is_empty(),
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
            // Timers redraw once their message is handled
            Cmd::StartTimer { .. } => false,
            Cmd::Delay { .. } => false,
            Cmd::Quit => false,
        }
    }

    /// Areas invalidated by this command; `None` means everything
    pub fn damage(&self) -> Option<Vec<DamageArea>> {
        match self {
            Cmd::Redraw => None,
            Cmd::RedrawAreas(areas) => Some(areas.clone()),
            Cmd::Batch(cmds) => {
                let mut merged = Vec::new();
                for cmd in cmds {
                    for area in cmd.damage()? {
                        if !merged.contains(&area) {
                            merged.push(area);
                        }
                    }
                }
                Some(merged)
            }
            _ => Some(Vec::new()),
        }
    }
}

// Allow converting Option<Cmd> to Cmd
impl From<Option<Cmd>> for Cmd {
    fn from(opt: Option<Cmd>) -> Self {
        opt.unwrap_or(Cmd::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_drops_noops() {
        assert!(matches!(Cmd::batch(vec![Cmd::None, Cmd::None]), Cmd::None));
        assert!(matches!(Cmd::batch(vec![Cmd::None, Cmd::Redraw]), Cmd::Redraw));
        assert!(matches!(
            Cmd::batch(vec![Cmd::Redraw, Cmd::Quit]),
            Cmd::Batch(ref cmds) if cmds.len() == 2
        ));
    }

    #[test]
    fn test_damage_merges_areas() {
        let cmd = Cmd::Batch(vec![
            Cmd::RedrawAreas(vec![DamageArea::Editor]),
            Cmd::RedrawAreas(vec![DamageArea::Outline, DamageArea::Editor]),
            Cmd::Delay {
                delay_ms: 100,
                msg: Box::new(Msg::Ui(crate::messages::UiMsg::ToggleSidebar)),
            },
        ]);
        assert!(cmd.needs_redraw());
        assert_eq!(
            cmd.damage(),
            Some(vec![DamageArea::Editor, DamageArea::Outline])
        );
        assert_eq!(
            Cmd::Batch(vec![Cmd::Redraw, Cmd::RedrawAreas(vec![DamageArea::Editor])]).damage(),
            None
        );
    }
}
