mod descriptor;
mod event;
mod generic;
mod type_ref;

pub use descriptor::*;
pub use event::*;
pub use generic::*;
pub use type_ref::*;
