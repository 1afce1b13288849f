pub mod scene;

pub use scene::{setup_counter, spawn_counter_entities};
