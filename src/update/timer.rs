//! Debounce timer handlers

use crate::commands::{Cmd, DamageArea};
use crate::debounce::DebounceChannel;
use crate::messages::TimerMsg;
use crate::model::{now_epoch_secs, AppModel};

pub fn update_timer(model: &mut AppModel, msg: TimerMsg) -> Option<Cmd> {
    match msg {
        TimerMsg::Fired { channel, token } => {
            // Superseded by a later schedule on the same channel
            if !model.debouncer.fire(channel, token) {
                return None;
            }

            match channel {
                DebounceChannel::OutlineRebuild => {
                    if model.rebuild_outline() {
                        Some(Cmd::RedrawAreas(vec![DamageArea::Outline]))
                    } else {
                        None
                    }
                }
                DebounceChannel::DocumentTimestamp => {
                    model.last_updated.document_updated(now_epoch_secs());
                    Some(Cmd::RedrawAreas(vec![DamageArea::Timestamp]))
                }
            }
        }
    }
}
