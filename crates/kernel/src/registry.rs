use anyhow::Context;
use std::sync::Arc;

use crate::module::{InitCtx, Module};

/// Draft of the JSON Schema dialect used for the merged schema document
const SCHEMA_DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";

/// Module registry for managing module lifecycle in registration order
pub struct ModuleRegistry {
    modules: Vec<Arc<dyn Module>>,
}

impl ModuleRegistry {
    /// Create a new module registry
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Register a module with the registry
    pub fn register(&mut self, module: Arc<dyn Module>) {
        self.modules.push(module);
    }

    /// Get all registered modules
    pub fn modules(&self) -> &[Arc<dyn Module>] {
        &self.modules
    }

    /// Get a module by name
    pub fn get_module(&self, name: &str) -> Option<&Arc<dyn Module>> {
        self.modules.iter().find(|module| module.name() == name)
    }

    /// Get the number of registered modules
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Initialize modules in registration order
    pub async fn init_modules(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!("initializing {} modules", self.modules.len());

        for module in &self.modules {
            tracing::info!(module = module.name(), "initializing module");

            module
                .init(ctx)
                .await
                .with_context(|| format!("failed to initialize module '{}'", module.name()))?;
        }

        Ok(())
    }

    /// Start modules in registration order
    pub async fn start_modules(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!("starting {} modules", self.modules.len());

        for module in &self.modules {
            tracing::info!(module = module.name(), "starting module");

            module
                .start(ctx)
                .await
                .with_context(|| format!("failed to start module '{}'", module.name()))?;
        }

        Ok(())
    }

    /// Stop modules in reverse registration order
    pub async fn stop_modules(&self) -> anyhow::Result<()> {
        tracing::info!("stopping {} modules", self.modules.len());

        for module in self.modules.iter().rev() {
            tracing::info!(module = module.name(), "stopping module");

            module
                .stop()
                .await
                .with_context(|| format!("failed to stop module '{}'", module.name()))?;
        }

        Ok(())
    }

    /// Merge the schema fragments of all modules into a single document.
    ///
    /// Every fragment contributes entries under `$defs`. A later module that
    /// redefines an existing entry replaces it.
    pub fn collect_schema(&self) -> serde_json::Value {
        let mut schema = serde_json::json!({
            "$schema": SCHEMA_DIALECT,
            "title": "Library catalog",
            "$defs": {}
        });

        for module in &self.modules {
            let Some(fragment) = module.schema() else {
                continue;
            };

            if let Some(defs) = fragment.get("$defs").and_then(|defs| defs.as_object()) {
                for (name, def) in defs {
                    tracing::debug!(module = module.name(), definition = %name, "merging schema");
                    schema["$defs"][name] = def.clone();
                }
            }
        }

        schema
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
