//! Scripted editing sessions
//!
//! A script drives the real runtime, timers included, one directive per line:
//!
//! ```text
//! # comment
//! type Hello world
//! key Enter             # named key, modifiers as prefixes: ctrl+a
//! click intro           # click the outline row for heading id "intro"
//! background            # click below the content
//! toggle-sidebar
//! wait 3100             # keep handling messages for 3100 ms
//! ```
//!
//! `type` sends one KeyDown per character of the rest of the line, taken
//! literally; other directives allow a trailing ` # comment`.

use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Result};

use crate::input::{Key, KeyEvent, Modifiers};
use crate::messages::{EditorMsg, Msg, OutlineMsg, UiMsg};
use crate::runtime::Runtime;

/// How long the end of a script waits for pending timers
const SETTLE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    Type(String),
    Key(KeyEvent),
    Click { heading_id: String },
    Background,
    ToggleSidebar,
    Wait(Duration),
}

fn parse_key(spec: &str) -> Option<KeyEvent> {
    let mut parts: Vec<&str> = spec.split('+').collect();
    // "ctrl++" names the plus key
    let name = if spec.ends_with("++") {
        parts.truncate(parts.len().saturating_sub(2));
        "+"
    } else {
        parts.pop()?
    };

    let mut mods = Modifiers::NONE;
    for part in parts {
        mods = mods
            | match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => Modifiers::CTRL,
                "shift" => Modifiers::SHIFT,
                "alt" | "option" => Modifiers::ALT,
                "meta" | "cmd" | "super" => Modifiers::META,
                _ => return None,
            };
    }
    Some(KeyEvent::new(Key::from_name(name)?, mods))
}

/// Parse a script; errors carry the 1-based line number
pub fn parse_script(source: &str) -> Result<Vec<ScriptStep>> {
    let mut steps = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim_start();
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let (directive, rest) = match line.split_once(' ') {
            Some((directive, rest)) => (directive, rest),
            None => (line.trim_end(), ""),
        };
        // Typed text is taken literally, `#` included
        let rest = match rest.find(" #") {
            Some(comment) if directive != "type" => &rest[..comment],
            _ => rest,
        };
        let arg = rest.trim();

        let step = match directive {
            // Keep trailing spaces typed on purpose, drop only the newline
            "type" => ScriptStep::Type(rest.to_string()),
            "key" => ScriptStep::Key(
                parse_key(arg).ok_or_else(|| anyhow!("line {}: unknown key '{}'", line_no, arg))?,
            ),
            "click" if arg.is_empty() => bail!("line {}: click needs a heading id", line_no),
            "click" => ScriptStep::Click {
                heading_id: arg.to_string(),
            },
            "background" => ScriptStep::Background,
            "toggle-sidebar" => ScriptStep::ToggleSidebar,
            "wait" => {
                let ms: u64 = arg
                    .parse()
                    .map_err(|_| anyhow!("line {}: invalid wait '{}'", line_no, arg))?;
                ScriptStep::Wait(Duration::from_millis(ms))
            }
            other => bail!("line {}: unknown directive '{}'", line_no, other),
        };
        steps.push(step);
    }
    Ok(steps)
}

/// Feed `steps` into the runtime, then wait for every pending timer
pub fn run_script(runtime: &mut Runtime, steps: &[ScriptStep]) -> Result<()> {
    for step in steps {
        tracing::debug!(?step, "replay");
        match step {
            ScriptStep::Type(text) => {
                for ch in text.chars() {
                    runtime.dispatch(Msg::Editor(EditorMsg::KeyDown(KeyEvent::char(ch))));
                }
            }
            ScriptStep::Key(event) => runtime.dispatch(Msg::Editor(EditorMsg::KeyDown(*event))),
            ScriptStep::Click { heading_id } => {
                runtime.dispatch(Msg::Outline(OutlineMsg::RowClicked {
                    heading_id: heading_id.clone(),
                }))
            }
            ScriptStep::Background => runtime.dispatch(Msg::Editor(EditorMsg::BackgroundClicked)),
            ScriptStep::ToggleSidebar => runtime.dispatch(Msg::Ui(UiMsg::ToggleSidebar)),
            ScriptStep::Wait(duration) => {
                let until = Instant::now() + *duration;
                while Instant::now() < until {
                    runtime.process_async_messages();
                    let left = until.saturating_duration_since(Instant::now());
                    std::thread::sleep(Duration::from_millis(5).min(left));
                }
                runtime.process_async_messages();
            }
        }
        runtime.process_async_messages();
        if runtime.should_quit() {
            return Ok(());
        }
    }
    runtime.run_until_idle(SETTLE_TIMEOUT)
}
