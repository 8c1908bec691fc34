/*!
 * Process Module
 * Process descriptions, validation and the registry a simulation runs over
 */

pub mod registry;
pub mod types;
mod validation;

// Re-export for convenience
pub use registry::{ProcessRegistry, DEFAULT_BURST};
pub use types::{palette_color, Process, ProcessSpec, ProcessUpdate, QueueClass, PALETTE};
