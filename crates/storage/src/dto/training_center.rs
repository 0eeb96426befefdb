use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::TrainingCenter;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrainingCenterResponse {
    pub id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "endereco")]
    pub address: String,
    #[serde(rename = "proprietario")]
    pub owner: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTrainingCenterRequest {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, max = 20, message = "Name must be between 1 and 20 characters"))]
    pub name: String,

    #[serde(rename = "endereco")]
    #[validate(length(min = 1, max = 60, message = "Address must be between 1 and 60 characters"))]
    pub address: String,

    #[serde(rename = "proprietario")]
    #[validate(length(min = 1, max = 30, message = "Owner must be between 1 and 30 characters"))]
    pub owner: String,
}

impl From<TrainingCenter> for TrainingCenterResponse {
    fn from(center: TrainingCenter) -> Self {
        Self {
            id: center.id,
            name: center.name,
            address: center.address,
            owner: center.owner,
        }
    }
}
