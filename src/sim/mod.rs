//! Session simulation
//!
//! All gameplay logic lives here. No rendering, audio or DOM:
//! - Time comes in through `Clock` / frame deltas
//! - Randomness comes in through `RandomSource`
//! - Collaborator side effects are returned as decisions, not performed

pub mod antagonist;
pub mod clock;
pub mod hiding;
pub mod movement;
pub mod random;
pub mod scheduler;
pub mod state;
pub mod timers;
pub mod view;

pub use antagonist::AntagonistState;
pub use clock::{Clock, FrameTimer, ManualClock, SystemClock};
pub use hiding::{HidingSpot, HidingSpotRegistry};
pub use movement::{HeldKeys, HouseBounds, MoveKey, MovementIntegrator};
pub use random::{FixedDice, RandomSource, SequenceDice, seeded};
pub use scheduler::{ScareDecision, ScareScheduler};
pub use state::{EndReason, PlayerState, SessionPhase, SessionState};
pub use timers::{Timer, TimerKind, TimerQueue};
pub use view::ViewController;
