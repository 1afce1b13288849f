//! Pooled glyph emitters and the particles they release.
//!
//! - **Pool** (`pool.rs`): one slot per digit position, role and glyph
//! - **Bursts** (`burst.rs`): deferred switch-off of bursting slots
//! - **Templates** (`template.rs`): emitter archetypes and colour ramps
//! - **Particles** (`particles.rs`): spawning, integration and glyph textures

pub mod burst;
pub mod particles;
pub mod pool;
pub mod template;

pub use burst::{BurstScheduler, ResetPolicy};
pub use particles::{GlyphTextures, emit_particles, prune_missing_glyphs, update_particles};
pub use pool::{DigitPosition, EmitterPool, EmitterRole, SlotKey};
pub use template::{ColorSequence, EmitterTemplate, TemplateLibrary};
