//! Generates Flow DTO type declarations from the `definitions` of an OpenAPI
//! (Swagger 2) document.
//!
//! Definitions are renamed to `<Name>Dto[Read|Write]`, rewritten for read or
//! write mode, emitted as Flow types and written one file per type.

pub mod config;
pub mod declaration;
pub mod emitter;
pub mod error;
pub mod loader;
pub mod naming;
pub mod pipeline;
pub mod schema;
pub mod transform;
pub mod writer;

pub use config::{Config, Mode, SpecSource};
pub use declaration::Declaration;
pub use emitter::{FlowEmitter, TypeEmitter};
pub use error::{DtoGenError, Result};
pub use pipeline::Pipeline;
pub use schema::Schema;
