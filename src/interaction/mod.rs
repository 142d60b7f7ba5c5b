//! Target detection, examination state machine, and object transitions

pub mod animator;
pub mod controller;
pub mod detector;
pub mod input;
pub mod session;

pub use animator::TransitionAnimator;
pub use controller::InteractionController;
pub use detector::{detect, probe_origin, Detection};
pub use input::FrameInput;
pub use session::{InteractionEvent, InteractionState, Session, SessionTimer};
