//! Schema to type declaration emitters.

mod flow;

pub use flow::FlowEmitter;

use crate::error::Result;
use crate::schema::Schema;

/// Renders one finished schema as the body of a type declaration file.
///
/// The output is post-processed by [`crate::declaration`]: references to
/// other generated types are found by scanning the text for the type suffix,
/// so an emitter must spell referenced types by their full type name.
pub trait TypeEmitter {
    fn emit(&self, type_name: &str, schema: &Schema) -> Result<String>;
}
