use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton as CtMouseButton,
    MouseEvent, MouseEventKind,
};

use cadence::{EventSource, FrameEvent, Key, MouseButton};

/// Drains crossterm's queue without blocking. Key releases arrive only on
/// terminals that accept the keyboard enhancement flags the guard pushes.
pub struct TerminalEvents;

impl TerminalEvents {
    pub fn new() -> Self {
        Self
    }
}

impl EventSource for TerminalEvents {
    fn poll_event(&mut self) -> Option<FrameEvent> {
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                _ => return None,
            }
            let event = event::read().ok()?;
            if let Some(translated) = translate(event) {
                return Some(translated);
            }
        }
    }
}

fn translate(event: Event) -> Option<FrameEvent> {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Mouse(mouse) => translate_mouse(mouse),
        Event::Resize(width, height) => Some(FrameEvent::Resize {
            width: width as u32,
            height: height as u32,
        }),
        _ => None,
    }
}

fn translate_key(key: KeyEvent) -> Option<FrameEvent> {
    let down = match key.kind {
        KeyEventKind::Press => true,
        KeyEventKind::Release => false,
        KeyEventKind::Repeat => return None,
    };

    if down {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                return Some(FrameEvent::Quit);
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(FrameEvent::Quit);
            }
            _ => {}
        }
    }

    let mapped = match key.code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Char(c) => Key::Char(c),
        _ => return None,
    };

    Some(if down {
        FrameEvent::KeyDown(mapped)
    } else {
        FrameEvent::KeyUp(mapped)
    })
}

fn translate_mouse(mouse: MouseEvent) -> Option<FrameEvent> {
    let x = mouse.column as f32;
    let y = mouse.row as f32;
    match mouse.kind {
        MouseEventKind::Down(button) => Some(FrameEvent::MouseDown {
            button: translate_button(button)?,
            x,
            y,
        }),
        MouseEventKind::Up(button) => Some(FrameEvent::MouseUp {
            button: translate_button(button)?,
            x,
            y,
        }),
        MouseEventKind::Moved => Some(FrameEvent::MouseMotion {
            x,
            y,
            dx: 0.0,
            dy: 0.0,
        }),
        _ => None,
    }
}

fn translate_button(button: CtMouseButton) -> Option<MouseButton> {
    match button {
        CtMouseButton::Left => Some(MouseButton::Left),
        CtMouseButton::Right => Some(MouseButton::Right),
        CtMouseButton::Middle => Some(MouseButton::Middle),
    }
}

/// An event source with nothing to say. Headless runs pair it with a
/// deadline or run until the process is killed, like a dedicated server.
pub struct NullEvents;

impl EventSource for NullEvents {
    fn poll_event(&mut self) -> Option<FrameEvent> {
        None
    }
}

/// Injects a single `Quit` once the wall-clock deadline passes.
pub struct DeadlineEvents<E> {
    inner: E,
    deadline: Option<Instant>,
    fired: bool,
}

impl<E: EventSource> DeadlineEvents<E> {
    pub fn new(inner: E, run_for: Option<Duration>) -> Self {
        Self {
            inner,
            deadline: run_for.map(|d| Instant::now() + d),
            fired: false,
        }
    }
}

impl<E: EventSource> EventSource for DeadlineEvents<E> {
    fn poll_event(&mut self) -> Option<FrameEvent> {
        if !self.fired {
            if let Some(deadline) = self.deadline {
                if Instant::now() >= deadline {
                    self.fired = true;
                    return Some(FrameEvent::Quit);
                }
            }
        }
        self.inner.poll_event()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_source_is_silent() {
        let mut events = NullEvents;
        assert_eq!(events.poll_event(), None);
    }

    #[test]
    fn deadline_fires_quit_once() {
        let mut events = DeadlineEvents::new(NullEvents, Some(Duration::ZERO));
        assert_eq!(events.poll_event(), Some(FrameEvent::Quit));
        assert_eq!(events.poll_event(), None);
    }

    #[test]
    fn no_deadline_passes_through() {
        let mut events = DeadlineEvents::new(NullEvents, None);
        assert_eq!(events.poll_event(), None);
    }
}
