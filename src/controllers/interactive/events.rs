//! The event alphabet the windowing collaborator feeds into the loop.

/// Logical key identities the loop reacts to. The windowing glue maps
/// platform key codes onto these; unrecognised keys never reach the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
}

/// One discrete platform event, pumped once per fixed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    Scroll(f32),
    Resize { width: u32, height: u32 },
}
