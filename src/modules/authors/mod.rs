pub mod models;
pub mod repository;
pub mod validation;

use async_trait::async_trait;
use library_kernel::{InitCtx, Module};
use serde_json::json;

use repository::AuthorRepositoryArc;

/// Authors module: owns the author table
pub struct AuthorsModule {
    repository: AuthorRepositoryArc,
}

impl AuthorsModule {
    pub fn new(repository: AuthorRepositoryArc) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl Module for AuthorsModule {
    fn name(&self) -> &'static str {
        "authors"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            locale = ?ctx.settings.library.locale,
            "authors module initialized"
        );
        Ok(())
    }

    fn schema(&self) -> Option<serde_json::Value> {
        Some(json!({
            "$defs": {
                "Author": {
                    "type": "object",
                    "properties": {
                        "id": {
                            "type": "integer",
                            "description": "Unique identifier generated by the store"
                        },
                        "name": {
                            "type": "string",
                            "minLength": 1,
                            "pattern": "\\S",
                            "description": "Full name of the author"
                        },
                        "birth_date": {
                            "type": "string",
                            "format": "date",
                            "description": "Date of birth"
                        },
                        "nationality": {
                            "type": ["string", "null"],
                            "description": "Nationality of the author"
                        }
                    },
                    "required": ["id", "name", "birth_date"]
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let records = self.repository.count().await?;
        tracing::info!(module = self.name(), records, "authors module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "authors module stopped");
        Ok(())
    }
}

/// Create a new instance of the authors module
pub fn create_module(repository: AuthorRepositoryArc) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(AuthorsModule::new(repository))
}
