//! The operator algebra: bindings groups and the scan/join/union/project
//! tree that [`crate::planner::Planner`] builds and [`crate::query`] drives.

mod bindings;
mod operator;

pub use self::bindings::{complete_pattern, BindingsGroup};
pub use self::operator::{ArcGraph, BindingsReceiver, BindingsSender, Operator, StreamItem, BUFFER_SIZE, PAGE_SIZE};
