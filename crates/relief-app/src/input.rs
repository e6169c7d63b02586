//! Input events forwarded by the windowing layer, and where they come from.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::mpsc;

use relief_core::error::{ReliefError, ReliefResult};
use serde::{Deserialize, Serialize};

/// Pointer and window events the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Pointer moved by `(dx, dy)` pixels with the rotate button held.
    Drag { dx: f32, dy: f32 },
    /// Wheel offset; positive `y_offset` zooms in.
    Scroll { x_offset: f32, y_offset: f32 },
    /// Framebuffer resized.
    Resize { width: f32, height: f32 },
}

/// Commands consumed by the viewer loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerCommand {
    Input(InputEvent),
    /// Stop after the current batch.
    Shutdown,
}

/// Something that yields commands between frames.
pub trait EventSource {
    /// Commands to apply before rendering frame `frame`.
    fn poll(&mut self, frame: u64) -> Vec<ViewerCommand>;
}

/// Commands pushed through an `mpsc` channel, e.g. from window callbacks.
pub struct ChannelSource {
    rx: mpsc::Receiver<ViewerCommand>,
}

/// Create a connected sender / source pair.
pub fn channel() -> (mpsc::Sender<ViewerCommand>, ChannelSource) {
    let (tx, rx) = mpsc::channel();
    (tx, ChannelSource { rx })
}

impl EventSource for ChannelSource {
    fn poll(&mut self, _frame: u64) -> Vec<ViewerCommand> {
        let mut commands = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(cmd) => commands.push(cmd),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    commands.push(ViewerCommand::Shutdown);
                    break;
                }
            }
        }
        commands
    }
}

/// One recorded event and the frame before which it fires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptedEvent {
    pub frame: u64,
    pub event: InputEvent,
}

/// Replays recorded events at their frames.
#[derive(Debug, Clone, Default)]
pub struct ScriptSource {
    pending: VecDeque<ScriptedEvent>,
}

impl ScriptSource {
    pub fn new(mut events: Vec<ScriptedEvent>) -> Self {
        events.sort_by_key(|e| e.frame);
        Self {
            pending: events.into(),
        }
    }

    /// Parse a JSON array of `{ "frame": n, "event": { "type": ... } }` records.
    pub fn from_json_str(json: &str) -> ReliefResult<Self> {
        let events: Vec<ScriptedEvent> = serde_json::from_str(json).map_err(ReliefError::config)?;
        Ok(Self::new(events))
    }

    pub fn load(path: &Path) -> ReliefResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let source = Self::from_json_str(&text)?;
        log::info!("Loaded {} scripted event(s) from {}", source.remaining(), path.display());
        Ok(source)
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl EventSource for ScriptSource {
    fn poll(&mut self, frame: u64) -> Vec<ViewerCommand> {
        let mut commands = Vec::new();
        while self.pending.front().is_some_and(|e| e.frame <= frame) {
            if let Some(e) = self.pending.pop_front() {
                commands.push(ViewerCommand::Input(e.event));
            }
        }
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_drains_in_order() {
        let (tx, mut source) = channel();
        tx.send(ViewerCommand::Input(InputEvent::Drag { dx: 1.0, dy: 2.0 }))
            .unwrap();
        tx.send(ViewerCommand::Input(InputEvent::Scroll {
            x_offset: 0.0,
            y_offset: 1.0,
        }))
        .unwrap();

        let commands = source.poll(0);
        assert_eq!(commands.len(), 2);
        assert!(matches!(
            commands[0],
            ViewerCommand::Input(InputEvent::Drag { .. })
        ));
        assert!(source.poll(1).is_empty());
    }

    #[test]
    fn test_channel_disconnect_shuts_down() {
        let (tx, mut source) = channel();
        tx.send(ViewerCommand::Input(InputEvent::Resize {
            width: 800.0,
            height: 600.0,
        }))
        .unwrap();
        drop(tx);

        let commands = source.poll(0);
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[1], ViewerCommand::Shutdown);
    }

    #[test]
    fn test_script_fires_at_frame() {
        let json = r#"[
            { "frame": 5, "event": { "type": "scroll", "x_offset": 0.0, "y_offset": 1.0 } },
            { "frame": 0, "event": { "type": "drag", "dx": 10.0, "dy": -4.0 } },
            { "frame": 5, "event": { "type": "resize", "width": 640.0, "height": 480.0 } }
        ]"#;
        let mut source = ScriptSource::from_json_str(json).unwrap();
        assert_eq!(source.remaining(), 3);

        assert_eq!(
            source.poll(0),
            vec![ViewerCommand::Input(InputEvent::Drag { dx: 10.0, dy: -4.0 })]
        );
        assert!(source.poll(4).is_empty());
        assert_eq!(source.poll(5).len(), 2);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_script_late_poll_catches_up() {
        let mut source = ScriptSource::new(vec![
            ScriptedEvent {
                frame: 1,
                event: InputEvent::Drag { dx: 1.0, dy: 0.0 },
            },
            ScriptedEvent {
                frame: 2,
                event: InputEvent::Drag { dx: 2.0, dy: 0.0 },
            },
        ]);
        assert_eq!(source.poll(10).len(), 2);
    }

    #[test]
    fn test_script_rejects_unknown_event() {
        let json = r#"[ { "frame": 0, "event": { "type": "teleport" } } ]"#;
        assert!(matches!(
            ScriptSource::from_json_str(json),
            Err(ReliefError::Config(_))
        ));
    }
}
