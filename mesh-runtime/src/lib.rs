//! Runtime side of procedural meshes
//!
//! - [`modifiers`]: sine and ripple vertex displacement
//! - [`recalculate`]: bounds and smooth normals after displacement
//! - [`MeshGenerator`]: per-update rebuild, modifier chain, collider sync
//! - [`MeshStats`]: debug counters with metric prefixes

pub mod modifiers;
pub mod recalculate;

mod collider;
mod generator;
mod stats;


pub use collider::{Collider, ColliderKind};
pub use generator::{AppliedModifier, GeneratorSettings, MeshGenerator, MeshObserver, MeshType};
pub use modifiers::{MeshModifier, ModifierSettings, RippleModifier, SineModifier, WaveProfile};
pub use stats::{Metric, MeshStats, auto_convert, convert, format_metric};
