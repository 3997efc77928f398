pub mod clock;
pub mod driver;
pub mod easing;
pub mod entrance;

pub use clock::AnimationClock;
pub use driver::{AnimationDriver, AnimationTuning};
pub use entrance::{EntranceSequencer, EntranceStyle, EntranceTask, TaskPhase};
