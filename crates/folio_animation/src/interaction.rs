//! Pointer-driven press/hover animation
//!
//! A button scales up slightly on hover and dips on press. The scale follows
//! a spring so quick hover/press sequences blend into each other.

use crate::motion::{AnimatedValue, MotionPreference};
use crate::spring::SpringConfig;

/// Target scales per pointer state
pub mod scale {
    pub const IDLE: f64 = 1.0;
    pub const HOVERED: f64 = 1.05;
    pub const PRESSED: f64 = 0.95;
}

/// Pointer input relevant to a pressable element
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    Enter,
    Leave,
    Down,
    Up,
}

/// Hover and press flags
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerState {
    pub hovered: bool,
    pub pressed: bool,
}

impl PointerState {
    /// Apply an event. Leaving also releases a press.
    pub fn on(self, event: PointerEvent) -> Self {
        match event {
            PointerEvent::Enter => Self {
                hovered: true,
                ..self
            },
            PointerEvent::Leave => Self {
                hovered: false,
                pressed: false,
            },
            PointerEvent::Down => Self {
                pressed: true,
                ..self
            },
            PointerEvent::Up => Self {
                pressed: false,
                ..self
            },
        }
    }

    /// Press wins over hover
    pub fn target_scale(self) -> f64 {
        if self.pressed {
            scale::PRESSED
        } else if self.hovered {
            scale::HOVERED
        } else {
            scale::IDLE
        }
    }
}

/// Scale animation state for a pressable element
#[derive(Clone, Debug)]
pub struct PressAnimation {
    pointer: PointerState,
    scale: AnimatedValue,
}

impl PressAnimation {
    pub fn new(preference: MotionPreference) -> Self {
        Self::with_config(SpringConfig::button(), preference)
    }

    pub fn with_config(config: SpringConfig, preference: MotionPreference) -> Self {
        Self {
            pointer: PointerState::default(),
            scale: AnimatedValue::new(config, scale::IDLE, preference),
        }
    }

    /// Feed a pointer event; retargets the scale spring
    pub fn handle(&mut self, event: PointerEvent) {
        self.pointer = self.pointer.on(event);
        self.scale.set_target(self.pointer.target_scale());
    }

    pub fn set_preference(&mut self, preference: MotionPreference) {
        self.scale.set_preference(preference);
    }

    /// Update animations (call each frame)
    pub fn update(&mut self, dt: f64) -> bool {
        self.scale.step(dt)
    }

    /// Scale to render this frame
    pub fn scale(&self) -> f64 {
        self.scale.displayed()
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }
}

impl Default for PressAnimation {
    fn default() -> Self {
        Self::new(MotionPreference::NoPreference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(anim: &mut PressAnimation) {
        for _ in 0..600 {
            if !anim.update(1.0 / 60.0) {
                return;
            }
        }
        panic!("press animation did not settle");
    }

    #[test]
    fn test_pointer_transitions() {
        let state = PointerState::default()
            .on(PointerEvent::Enter)
            .on(PointerEvent::Down);
        assert_eq!(state.target_scale(), scale::PRESSED);

        let released = state.on(PointerEvent::Up);
        assert_eq!(released.target_scale(), scale::HOVERED);

        let left = state.on(PointerEvent::Leave);
        assert_eq!(left, PointerState::default());
    }

    #[test]
    fn test_hover_then_press_settles_on_each_target() {
        let mut anim = PressAnimation::default();
        anim.handle(PointerEvent::Enter);
        settle(&mut anim);
        assert_eq!(anim.scale(), scale::HOVERED);

        anim.handle(PointerEvent::Down);
        settle(&mut anim);
        assert_eq!(anim.scale(), scale::PRESSED);
    }

    #[test]
    fn test_reduced_motion_jumps_to_scale() {
        let mut anim = PressAnimation::new(MotionPreference::Reduce);
        anim.handle(PointerEvent::Enter);
        assert_eq!(anim.scale(), scale::HOVERED);
        assert!(!anim.update(1.0 / 60.0));
    }
}
