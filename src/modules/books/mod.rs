pub mod models;
pub mod repository;
pub mod validation;

use async_trait::async_trait;
use library_kernel::{settings::DeletePolicy, InitCtx, Module};
use serde_json::json;

use repository::BookRepositoryArc;

/// Books module: owns the book table and its reference to authors
pub struct BooksModule {
    repository: BookRepositoryArc,
    delete_policy: DeletePolicy,
}

impl BooksModule {
    pub fn new(repository: BookRepositoryArc, delete_policy: DeletePolicy) -> Self {
        Self {
            repository,
            delete_policy,
        }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            on_author_delete = self.delete_policy.as_str(),
            "books module initialized"
        );
        Ok(())
    }

    fn schema(&self) -> Option<serde_json::Value> {
        Some(json!({
            "$defs": {
                "Book": {
                    "type": "object",
                    "properties": {
                        "id": {
                            "type": "integer",
                            "description": "Unique identifier generated by the store"
                        },
                        "title": {
                            "type": "string",
                            "minLength": 1,
                            "pattern": "\\S",
                            "description": "Title of the book"
                        },
                        "published_date": {
                            "type": "string",
                            "format": "date",
                            "description": "Publication date"
                        },
                        "genre": {
                            "type": ["string", "null"],
                            "description": "Genre of the book"
                        },
                        "author_id": {
                            "type": "integer",
                            "description": "Identifier of the book's author",
                            "x-foreign-key": {
                                "references": "#/$defs/Author",
                                "field": "id",
                                "on_delete": self.delete_policy.as_str()
                            }
                        }
                    },
                    "required": ["id", "title", "published_date", "author_id"]
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let records = self.repository.count().await?;
        tracing::info!(module = self.name(), records, "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(
    repository: BookRepositoryArc,
    delete_policy: DeletePolicy,
) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new(repository, delete_policy))
}
