//! Folio Animation System
//!
//! Spring physics and frame scheduling for UI motion.
//!
//! # Features
//!
//! - **Spring Physics**: semi-implicit Euler springs with stiffness, damping, mass
//! - **Multi-Channel Springs**: named channels that settle independently
//! - **Scheduler**: a frame loop that stops itself once everything settles
//! - **Reduced Motion**: bypass animation entirely when the user asks for it
//! - **Scroll Reveal**: viewport intersection tracking with staggered fade/slide
//! - **Interruptible**: retargeting keeps velocity, so motion never snaps
//!
//! # Example
//!
//! ```rust
//! use folio_animation::{advance_spring, SpringConfig, SpringState};
//!
//! let config = SpringConfig::new(400.0, 25.0, 0.5).unwrap();
//! let mut state = SpringState::at_rest(0.0);
//! loop {
//!     let step = advance_spring(state, 100.0, 1.0 / 60.0, &config);
//!     state = step.state;
//!     if step.settled {
//!         break;
//!     }
//! }
//! assert_eq!(state.value, 100.0);
//! ```

pub mod error;
pub mod interaction;
pub mod motion;
pub mod reveal;
pub mod scheduler;
pub mod spring;
pub mod springs;
pub mod timing;

pub use error::{AnimationError, Result};
pub use interaction::{PointerEvent, PointerState, PressAnimation};
pub use motion::{AnimatedValue, MotionPreference};
pub use reveal::{
    intersection_ratio, IntersectionOptions, Rect, RevealDirection, RevealObserver, RevealStyle,
    RevealTransition,
};
pub use scheduler::{AnimationScheduler, FrameClock, FrameLimits, SpringGroupId, SpringId};
pub use spring::{advance_spring, Spring, SpringConfig, SpringState, SpringStep};
pub use springs::{advance_spring_many, SpringGroup, SpringStates, SpringTargets, SpringsStep};
pub use timing::TimingFunction;
