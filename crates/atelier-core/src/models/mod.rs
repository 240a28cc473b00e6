//! Domain models.

mod work;

pub use work::{FieldPatch, NewWork, Work, WorkPatch, WorkResponse};
