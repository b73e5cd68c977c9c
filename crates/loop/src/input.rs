use bitflags::bitflags;
use glam::Vec2;

use crate::event::{FrameEvent, Key};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Buttons: u16 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        const JUMP = 1 << 4;
        const SPRINT = 1 << 5;
    }
}

/// Held-button state folded from key events. Event sources that never
/// report key releases leave a button held until its opposite is pressed.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    held: Buttons,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held(&self) -> Buttons {
        self.held
    }

    pub fn is_held(&self, buttons: Buttons) -> bool {
        self.held.contains(buttons)
    }

    pub fn apply(&mut self, event: &FrameEvent) {
        match *event {
            FrameEvent::KeyDown(key) => {
                if let Some(button) = binding(key) {
                    self.held.insert(button);
                }
            }
            FrameEvent::KeyUp(key) => {
                if let Some(button) = binding(key) {
                    self.held.remove(button);
                }
            }
            _ => {}
        }
    }

    /// Opposite keys cancel instead of fighting. X is right-positive,
    /// Y is up-positive.
    pub fn move_axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.held.contains(Buttons::LEFT) && !self.held.contains(Buttons::RIGHT) {
            axis.x = -1.0;
        } else if self.held.contains(Buttons::RIGHT) && !self.held.contains(Buttons::LEFT) {
            axis.x = 1.0;
        }
        if self.held.contains(Buttons::UP) && !self.held.contains(Buttons::DOWN) {
            axis.y = 1.0;
        } else if self.held.contains(Buttons::DOWN) && !self.held.contains(Buttons::UP) {
            axis.y = -1.0;
        }
        axis
    }

    pub fn clear(&mut self) {
        self.held = Buttons::empty();
    }
}

fn binding(key: Key) -> Option<Buttons> {
    match key {
        Key::Up | Key::Char('w') | Key::Char('W') => Some(Buttons::UP),
        Key::Down | Key::Char('s') | Key::Char('S') => Some(Buttons::DOWN),
        Key::Left | Key::Char('a') | Key::Char('A') => Some(Buttons::LEFT),
        Key::Right | Key::Char('d') | Key::Char('D') => Some(Buttons::RIGHT),
        Key::Space => Some(Buttons::JUMP),
        Key::Shift => Some(Buttons::SPRINT),
        Key::Char(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_key_down_and_up() {
        let mut input = InputState::new();

        input.apply(&FrameEvent::KeyDown(Key::Left));
        input.apply(&FrameEvent::KeyDown(Key::Space));
        assert!(input.is_held(Buttons::LEFT | Buttons::JUMP));

        input.apply(&FrameEvent::KeyUp(Key::Left));
        assert!(!input.is_held(Buttons::LEFT));
        assert!(input.is_held(Buttons::JUMP));
    }

    #[test]
    fn wasd_aliases_arrows() {
        let mut input = InputState::new();
        input.apply(&FrameEvent::KeyDown(Key::Char('w')));
        input.apply(&FrameEvent::KeyDown(Key::Char('d')));
        assert_eq!(input.move_axis(), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut input = InputState::new();
        input.apply(&FrameEvent::KeyDown(Key::Left));
        input.apply(&FrameEvent::KeyDown(Key::Right));
        assert_eq!(input.move_axis().x, 0.0);

        input.apply(&FrameEvent::KeyUp(Key::Right));
        assert_eq!(input.move_axis().x, -1.0);
    }

    #[test]
    fn non_key_events_ignored() {
        let mut input = InputState::new();
        input.apply(&FrameEvent::Resize {
            width: 100,
            height: 100,
        });
        input.apply(&FrameEvent::Quit);
        assert_eq!(input.held(), Buttons::empty());
    }

    #[test]
    fn unbound_char_ignored() {
        let mut input = InputState::new();
        input.apply(&FrameEvent::KeyDown(Key::Char('x')));
        assert_eq!(input.held(), Buttons::empty());
    }
}
