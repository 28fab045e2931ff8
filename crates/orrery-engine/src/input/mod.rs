pub mod queue;

pub use queue::{InputEvent, InputQueue, PointerGesture, PointerTracker};
