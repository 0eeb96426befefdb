use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Row of the `athletes` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Athlete {
    pub id: Uuid,
    pub created_at: NaiveDateTime,
    pub name: String,
    pub cpf: String,
    pub age: i32,
    pub weight: Decimal,
    pub height: Decimal,
    pub sex: String,
    pub category_id: i32,
    pub training_center_id: i32,
}

/// Athlete joined with the names of its category and training center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AthleteRecord {
    pub id: Uuid,
    pub created_at: NaiveDateTime,
    pub name: String,
    pub cpf: String,
    pub age: i32,
    pub weight: Decimal,
    pub height: Decimal,
    pub sex: String,
    pub category_name: String,
    pub training_center_name: String,
}
