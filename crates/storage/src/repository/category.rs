use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::category::CreateCategoryRequest;
use crate::error::{Result, StorageError};
use crate::models::Category;

/// Repository for Category database operations
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories
    pub async fn list(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT category_id, id, name
            FROM categories
            ORDER BY name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    /// Find category by its public ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT category_id, id, name
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| StorageError::NotFound(format!("Categoria não encontrada no id: {id}")))?;

        Ok(category)
    }

    /// Create a new category
    pub async fn create(&self, req: &CreateCategoryRequest) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (id, name)
            VALUES ($1, $2)
            RETURNING category_id, id, name
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&req.name)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            StorageError::from(e).on_unique_violation(|| {
                format!("Já existe uma categoria cadastrada com o nome: {}", req.name)
            })
        })?;

        Ok(category)
    }
}
