pub mod controls;
pub mod emitters;
pub mod labels;
pub mod physics;
pub mod plugin;
pub mod scene;
pub mod setup;
pub mod utils;
