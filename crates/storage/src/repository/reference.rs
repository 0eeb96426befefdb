use sqlx::{FromRow, PgConnection, postgres::PgRow};

use crate::error::{Result, StorageError};
use crate::models::{Category, TrainingCenter};

/// An entity athletes point at by name, resolved to an internal key on write
pub trait NamedReference: for<'r> FromRow<'r, PgRow> + Send + Unpin {
    /// `SELECT ... FROM ...` prefix; the lookup appends `WHERE name = $1`
    const SELECT: &'static str;

    fn key(&self) -> i32;

    fn not_found(name: &str) -> StorageError;
}

impl NamedReference for Category {
    const SELECT: &'static str = "SELECT category_id, id, name FROM categories";

    fn key(&self) -> i32 {
        self.category_id
    }

    fn not_found(name: &str) -> StorageError {
        StorageError::ReferenceNotFound(format!("A categoria {name} não foi encontrada."))
    }
}

impl NamedReference for TrainingCenter {
    const SELECT: &'static str =
        "SELECT training_center_id, id, name, address, owner FROM training_centers";

    fn key(&self) -> i32 {
        self.training_center_id
    }

    fn not_found(name: &str) -> StorageError {
        StorageError::ReferenceNotFound(format!(
            "O centro de treinamento {name} não foi encontrado."
        ))
    }
}

/// Find a reference row by its unique name
pub async fn find_by_name<R: NamedReference>(
    conn: &mut PgConnection,
    name: &str,
) -> Result<Option<R>> {
    let sql = format!("{} WHERE name = $1", R::SELECT);

    let row = sqlx::query_as::<_, R>(&sql)
        .bind(name)
        .fetch_optional(conn)
        .await?;

    Ok(row)
}

/// Resolve a reference by name or fail with `StorageError::ReferenceNotFound`
pub async fn require_by_name<R: NamedReference>(conn: &mut PgConnection, name: &str) -> Result<R> {
    find_by_name::<R>(conn, name)
        .await?
        .ok_or_else(|| R::not_found(name))
}
