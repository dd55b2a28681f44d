//! The generator run: load, rename, transform, emit, resolve, write.

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::config::Config;
use crate::declaration::Declaration;
use crate::emitter::{FlowEmitter, TypeEmitter};
use crate::error::Result;
use crate::loader;
use crate::naming::{self, NameRegistry};
use crate::schema::Schema;
use crate::transform;
use crate::writer;

pub struct Pipeline<E = FlowEmitter> {
    config: Config,
    emitter: E,
}

impl Pipeline<FlowEmitter> {
    pub fn new(config: Config) -> Self {
        Pipeline::with_emitter(config, FlowEmitter::default())
    }
}

impl<E: TypeEmitter> Pipeline<E> {
    pub fn with_emitter(config: Config, emitter: E) -> Self {
        Pipeline { config, emitter }
    }

    /// Runs every stage and writes the result (or prints it on a dry run).
    pub async fn run(&self) -> Result<Vec<Declaration>> {
        let text = loader::load_spec_text(&self.config.source).await?;
        let declarations = self.generate(&text)?;

        if self.config.dry_run {
            for declaration in &declarations {
                println!("// {}\n{}", declaration.file_name, declaration);
            }
        } else {
            writer::write_declarations(&self.config.dest, &declarations).await?;
        }
        Ok(declarations)
    }

    /// Everything between raw spec text and finished declarations.
    pub fn generate(&self, text: &str) -> Result<Vec<Declaration>> {
        let definitions = loader::decode_definitions(text)?;
        let definitions = self.prepare(&definitions)?;
        self.declarations(&definitions)
    }

    /// Renames definitions to type names and applies the mode transform.
    pub fn prepare(
        &self,
        definitions: &IndexMap<String, Schema>,
    ) -> Result<IndexMap<String, Schema>> {
        let renamed = naming::rename_definitions(definitions, &self.config.type_suffix())?;
        info!(
            "Transforming {} definitions for {} mode",
            renamed.len(),
            self.config.mode
        );
        Ok(transform::transform_definitions(&renamed, self.config.mode))
    }

    /// Emits one declaration per prepared definition, in document order.
    pub fn declarations(&self, definitions: &IndexMap<String, Schema>) -> Result<Vec<Declaration>> {
        let suffix = self.config.type_suffix();

        let mut registry = NameRegistry::new();
        for type_name in definitions.keys() {
            registry.register(type_name);
        }

        definitions
            .iter()
            .map(|(type_name, schema)| {
                debug!("Emitting {}", type_name);
                let body = self.emitter.emit(type_name, schema)?;
                Ok(Declaration::assemble(
                    type_name,
                    &body,
                    &suffix,
                    self.config.mode,
                    &registry,
                ))
            })
            .collect()
    }
}
