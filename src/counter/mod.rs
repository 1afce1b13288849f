pub mod choreography;
pub mod digit;
pub mod state;

pub use choreography::{RenderReport, render_pass};
pub use digit::Digit;
pub use state::{CounterState, Decomposition, Direction};
