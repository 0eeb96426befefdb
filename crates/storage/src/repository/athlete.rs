use chrono::Utc;
use sqlx::{PgConnection, PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::athlete::{AthleteFilter, CreateAthleteRequest, UpdateAthleteRequest};
use crate::dto::common::LimitOffsetParams;
use crate::error::{Result, StorageError};
use crate::models::{Athlete, AthleteRecord, Category, TrainingCenter};
use crate::repository::reference::{NamedReference, require_by_name};

const RECORD_SELECT: &str = r#"
    SELECT a.id, a.created_at, a.name, a.cpf, a.age, a.weight, a.height, a.sex,
           c.name AS category_name,
           t.name AS training_center_name
    FROM athletes a
    INNER JOIN categories c ON c.category_id = a.category_id
    INNER JOIN training_centers t ON t.training_center_id = a.training_center_id
"#;

fn not_found(id: Uuid) -> StorageError {
    StorageError::NotFound(format!("Atleta não encontrado no id: {id}"))
}

fn duplicate_cpf(cpf: &str) -> String {
    format!("Já existe um atleta cadastrado com o cpf: {cpf}")
}

pub struct AthleteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AthleteRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Count all athletes
    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM athletes")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// One page of athletes plus the total number of athletes
    pub async fn list_paginated(
        &self,
        params: &LimitOffsetParams,
    ) -> Result<(Vec<AthleteRecord>, i64)> {
        let total_items = self.count().await?;

        if total_items == 0 {
            return Ok((Vec::new(), 0));
        }

        let mut query = QueryBuilder::new(RECORD_SELECT);
        query.push(" ORDER BY a.created_at, a.id LIMIT ");
        query.push_bind(params.limit);
        query.push(" OFFSET ");
        query.push_bind(params.offset);

        let athletes = query
            .build_query_as::<AthleteRecord>()
            .fetch_all(self.pool)
            .await?;

        Ok((athletes, total_items))
    }

    /// List athletes matching every filter that is set
    pub async fn search(&self, filter: &AthleteFilter) -> Result<Vec<AthleteRecord>> {
        let mut query = QueryBuilder::new(RECORD_SELECT);
        query.push(" WHERE 1=1");

        if let Some(name) = filter.name() {
            query.push(" AND a.name = ");
            query.push_bind(name);
        }

        if let Some(cpf) = filter.cpf() {
            query.push(" AND a.cpf = ");
            query.push_bind(cpf);
        }

        query.push(" ORDER BY a.created_at, a.id");

        let athletes = query
            .build_query_as::<AthleteRecord>()
            .fetch_all(self.pool)
            .await?;

        Ok(athletes)
    }

    /// Create a new athlete after resolving its category and training center.
    ///
    /// Runs in a single transaction; any early return rolls it back.
    pub async fn create(&self, req: &CreateAthleteRequest) -> Result<AthleteRecord> {
        let mut tx = self.pool.begin().await?;

        let category = require_by_name::<Category>(&mut tx, &req.category.name).await?;
        let training_center =
            require_by_name::<TrainingCenter>(&mut tx, &req.training_center.name).await?;

        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO athletes (id, created_at, name, cpf, age, weight, height, sex,
                                  category_id, training_center_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(id)
        .bind(Utc::now().naive_utc())
        .bind(&req.name)
        .bind(&req.cpf)
        .bind(req.age)
        .bind(req.weight)
        .bind(req.height)
        .bind(&req.sex)
        .bind(category.key())
        .bind(training_center.key())
        .execute(&mut *tx)
        .await
        .map_err(|e| StorageError::from(e).on_unique_violation(|| duplicate_cpf(&req.cpf)))?;

        let athlete = fetch_record(&mut tx, id)
            .await?
            .ok_or_else(|| not_found(id))?;

        tx.commit().await?;

        Ok(athlete)
    }

    /// Apply a partial update to an existing athlete.
    ///
    /// The row is locked for the duration of the transaction. References
    /// supplied in the update are resolved the same way as on create.
    pub async fn update(&self, id: Uuid, req: &UpdateAthleteRequest) -> Result<AthleteRecord> {
        let mut tx = self.pool.begin().await?;

        let mut athlete = sqlx::query_as::<_, Athlete>(
            r#"
            SELECT id, created_at, name, cpf, age, weight, height, sex,
                   category_id, training_center_id
            FROM athletes
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| not_found(id))?;

        req.apply_to(&mut athlete);

        if let Some(category) = &req.category {
            athlete.category_id = require_by_name::<Category>(&mut tx, &category.name)
                .await?
                .key();
        }

        if let Some(training_center) = &req.training_center {
            athlete.training_center_id =
                require_by_name::<TrainingCenter>(&mut tx, &training_center.name)
                    .await?
                    .key();
        }

        sqlx::query(
            r#"
            UPDATE athletes
            SET name = $2,
                cpf = $3,
                age = $4,
                weight = $5,
                height = $6,
                sex = $7,
                category_id = $8,
                training_center_id = $9
            WHERE id = $1
            "#,
        )
        .bind(athlete.id)
        .bind(&athlete.name)
        .bind(&athlete.cpf)
        .bind(athlete.age)
        .bind(athlete.weight)
        .bind(athlete.height)
        .bind(&athlete.sex)
        .bind(athlete.category_id)
        .bind(athlete.training_center_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| StorageError::from(e).on_unique_violation(|| duplicate_cpf(&athlete.cpf)))?;

        let updated = fetch_record(&mut tx, id)
            .await?
            .ok_or_else(|| not_found(id))?;

        tx.commit().await?;

        Ok(updated)
    }

    /// Delete an athlete by ID
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM athletes WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }
}

async fn fetch_record(conn: &mut PgConnection, id: Uuid) -> Result<Option<AthleteRecord>> {
    let mut query = QueryBuilder::new(RECORD_SELECT);
    query.push(" WHERE a.id = ");
    query.push_bind(id);

    let athlete = query
        .build_query_as::<AthleteRecord>()
        .fetch_optional(conn)
        .await?;

    Ok(athlete)
}
