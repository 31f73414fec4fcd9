//! Input adapters
//!
//! Both adapters are plain state machines fed by the host's event
//! listeners; each produces the common [`InputState`] the loop pulls
//! once per tick.

pub mod desktop;
pub mod touch;

pub use desktop::{CanvasRect, KeyboardMouse};
pub use touch::VirtualJoystick;

use crate::sim::InputState;

/// Zero-argument source of the current input, called once per tick
pub type InputProvider = Box<dyn FnMut() -> InputState>;

/// Narrowest viewport (CSS px) that still gets keyboard/mouse controls
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

/// Whether a viewport should get touch controls
pub fn prefers_touch(viewport_width: f64, has_touch: bool) -> bool {
    viewport_width < MOBILE_BREAKPOINT_PX || has_touch
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_touch() {
        assert!(prefers_touch(500.0, false));
        assert!(prefers_touch(1920.0, true));
        assert!(!prefers_touch(1920.0, false));
    }
}
