#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    Shift,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    MouseDown { button: MouseButton, x: f32, y: f32 },
    MouseUp { button: MouseButton, x: f32, y: f32 },
    MouseMotion { x: f32, y: f32, dx: f32, dy: f32 },
    Resize { width: u32, height: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Quit,
    Key,
    Mouse,
    Window,
}

impl FrameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Quit => EventKind::Quit,
            Self::KeyDown(_) | Self::KeyUp(_) => EventKind::Key,
            Self::MouseDown { .. } | Self::MouseUp { .. } | Self::MouseMotion { .. } => {
                EventKind::Mouse
            }
            Self::Resize { .. } => EventKind::Window,
        }
    }

    pub fn is_quit(&self) -> bool {
        matches!(self, Self::Quit)
    }
}

pub trait EventSink {
    fn on_quit(&mut self) {}
    fn on_key_down(&mut self, _key: Key) {}
    fn on_key_up(&mut self, _key: Key) {}
    fn on_mouse_down(&mut self, _button: MouseButton, _x: f32, _y: f32) {}
    fn on_mouse_up(&mut self, _button: MouseButton, _x: f32, _y: f32) {}
    fn on_mouse_motion(&mut self, _x: f32, _y: f32, _dx: f32, _dy: f32) {}
    fn on_resize(&mut self, _width: u32, _height: u32) {}
}

/// Adding a `FrameEvent` variant fails to compile until it is routed here.
pub fn dispatch<S: EventSink>(event: &FrameEvent, sink: &mut S) {
    match *event {
        FrameEvent::Quit => sink.on_quit(),
        FrameEvent::KeyDown(key) => sink.on_key_down(key),
        FrameEvent::KeyUp(key) => sink.on_key_up(key),
        FrameEvent::MouseDown { button, x, y } => sink.on_mouse_down(button, x, y),
        FrameEvent::MouseUp { button, x, y } => sink.on_mouse_up(button, x, y),
        FrameEvent::MouseMotion { x, y, dx, dy } => sink.on_mouse_motion(x, y, dx, dy),
        FrameEvent::Resize { width, height } => sink.on_resize(width, height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingSink {
        quits: u32,
        keys: u32,
        mouse: u32,
        resizes: u32,
    }

    impl EventSink for CountingSink {
        fn on_quit(&mut self) {
            self.quits += 1;
        }

        fn on_key_down(&mut self, _key: Key) {
            self.keys += 1;
        }

        fn on_key_up(&mut self, _key: Key) {
            self.keys += 1;
        }

        fn on_mouse_down(&mut self, _button: MouseButton, _x: f32, _y: f32) {
            self.mouse += 1;
        }

        fn on_resize(&mut self, _width: u32, _height: u32) {
            self.resizes += 1;
        }
    }

    #[test]
    fn dispatch_routes_by_variant() {
        let mut sink = CountingSink::default();

        dispatch(&FrameEvent::Quit, &mut sink);
        dispatch(&FrameEvent::KeyDown(Key::Space), &mut sink);
        dispatch(&FrameEvent::KeyUp(Key::Space), &mut sink);
        dispatch(
            &FrameEvent::MouseDown {
                button: MouseButton::Left,
                x: 10.0,
                y: 20.0,
            },
            &mut sink,
        );
        dispatch(
            &FrameEvent::Resize {
                width: 800,
                height: 600,
            },
            &mut sink,
        );

        assert_eq!(sink.quits, 1);
        assert_eq!(sink.keys, 2);
        assert_eq!(sink.mouse, 1);
        assert_eq!(sink.resizes, 1);
    }

    #[test]
    fn kinds_partition_variants() {
        assert_eq!(FrameEvent::Quit.kind(), EventKind::Quit);
        assert_eq!(FrameEvent::KeyDown(Key::Up).kind(), EventKind::Key);
        assert_eq!(
            FrameEvent::MouseMotion {
                x: 0.0,
                y: 0.0,
                dx: 1.0,
                dy: 0.0
            }
            .kind(),
            EventKind::Mouse
        );
        assert_eq!(
            FrameEvent::Resize {
                width: 1,
                height: 1
            }
            .kind(),
            EventKind::Window
        );
        assert!(FrameEvent::Quit.is_quit());
        assert!(!FrameEvent::KeyDown(Key::Up).is_quit());
    }
}
