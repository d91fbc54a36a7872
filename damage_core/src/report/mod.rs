//! Report events - the engine's only observable output

mod event;
mod render;

pub use event::{Adjustment, DestructionCause, ReportEvent};
pub use render::{render, render_log};
