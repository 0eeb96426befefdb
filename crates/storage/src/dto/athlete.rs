use chrono::{NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Athlete, AthleteRecord};

/// Reference to a category or training center by its unique name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReferenceName {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, max = 50, message = "Name must be between 1 and 50 characters"))]
    pub name: String,
}

impl ReferenceName {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Full athlete representation returned by create, patch and the paginated list
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AthleteResponse {
    pub id: Uuid,
    pub created_at: NaiveDateTime,
    #[serde(rename = "nome")]
    pub name: String,
    pub cpf: String,
    #[serde(rename = "idade")]
    pub age: i32,
    #[serde(rename = "peso")]
    pub weight: Decimal,
    #[serde(rename = "altura")]
    pub height: Decimal,
    #[serde(rename = "sexo")]
    pub sex: String,
    #[serde(rename = "categoria")]
    pub category: ReferenceName,
    #[serde(rename = "centro_treinamento")]
    pub training_center: ReferenceName,
}

/// Lightweight projection returned by the filtered list
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AthleteSummary {
    pub id: String,
    /// ISO-8601 timestamp
    pub created_at: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "centro_treinamento")]
    pub training_center: String,
    #[serde(rename = "categoria")]
    pub category: String,
}

/// Request payload for creating a new athlete
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAthleteRequest {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, max = 50, message = "Name must be between 1 and 50 characters"))]
    pub name: String,

    #[validate(custom(function = "validate_cpf"))]
    pub cpf: String,

    #[serde(rename = "idade")]
    #[validate(range(min = 1, max = 120, message = "Age must be between 1 and 120"))]
    pub age: i32,

    #[serde(rename = "peso")]
    #[validate(custom(function = "validate_positive"))]
    pub weight: Decimal,

    #[serde(rename = "altura")]
    #[validate(custom(function = "validate_positive"))]
    pub height: Decimal,

    #[serde(rename = "sexo")]
    #[validate(custom(function = "validate_sex"))]
    pub sex: String,

    #[serde(rename = "categoria")]
    #[validate(nested)]
    pub category: ReferenceName,

    #[serde(rename = "centro_treinamento")]
    #[validate(nested)]
    pub training_center: ReferenceName,
}

/// Partial update. Absent fields are left untouched; `id` and `created_at`
/// are not part of the payload and are rejected if sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateAthleteRequest {
    #[serde(rename = "nome", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_cpf"))]
    pub cpf: Option<String>,

    #[serde(rename = "idade", skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 120))]
    pub age: Option<i32>,

    #[serde(rename = "peso", skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_positive"))]
    pub weight: Option<Decimal>,

    #[serde(rename = "altura", skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_positive"))]
    pub height: Option<Decimal>,

    #[serde(rename = "sexo", skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_sex"))]
    pub sex: Option<String>,

    #[serde(rename = "categoria", skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub category: Option<ReferenceName>,

    #[serde(rename = "centro_treinamento", skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub training_center: Option<ReferenceName>,
}

impl UpdateAthleteRequest {
    /// Copy every supplied scalar field onto `athlete`.
    ///
    /// Category and training center are resolved by the repository, since
    /// they need a lookup before their keys are known.
    pub fn apply_to(&self, athlete: &mut Athlete) {
        if let Some(name) = &self.name {
            athlete.name.clone_from(name);
        }
        if let Some(cpf) = &self.cpf {
            athlete.cpf.clone_from(cpf);
        }
        if let Some(age) = self.age {
            athlete.age = age;
        }
        if let Some(weight) = self.weight {
            athlete.weight = weight;
        }
        if let Some(height) = self.height {
            athlete.height = height;
        }
        if let Some(sex) = &self.sex {
            athlete.sex.clone_from(sex);
        }
    }
}

/// Query filters for the unpaginated list. Empty values count as absent.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AthleteFilter {
    /// Filter by athlete name (exact match)
    #[serde(rename = "nome")]
    pub name: Option<String>,
    /// Filter by athlete CPF (exact match)
    pub cpf: Option<String>,
}

impl AthleteFilter {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|s| !s.is_empty())
    }

    pub fn cpf(&self) -> Option<&str> {
        self.cpf.as_deref().filter(|s| !s.is_empty())
    }
}

// Validation helpers
fn validate_cpf(cpf: &str) -> Result<(), validator::ValidationError> {
    let digits_only = cpf.len() == 11 && cpf.chars().all(|c| c.is_ascii_digit());

    let formatted = cpf.len() == 14
        && cpf.char_indices().all(|(i, c)| match i {
            3 | 7 => c == '.',
            11 => c == '-',
            _ => c.is_ascii_digit(),
        });

    if digits_only || formatted {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("invalid_cpf");
        err.message = Some("CPF must have 11 digits, optionally as ddd.ddd.ddd-dd".into());
        Err(err)
    }
}

fn validate_sex(sex: &str) -> Result<(), validator::ValidationError> {
    const VALID_SEXES: &[&str] = &["M", "F"];

    if VALID_SEXES.contains(&sex) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_sex"))
    }
}

fn validate_positive(value: &Decimal) -> Result<(), validator::ValidationError> {
    if value.is_sign_positive() && !value.is_zero() {
        Ok(())
    } else {
        Err(validator::ValidationError::new("must_be_positive"))
    }
}

impl From<AthleteRecord> for AthleteResponse {
    fn from(record: AthleteRecord) -> Self {
        Self {
            id: record.id,
            created_at: record.created_at,
            name: record.name,
            cpf: record.cpf,
            age: record.age,
            weight: record.weight,
            height: record.height,
            sex: record.sex,
            category: ReferenceName::new(record.category_name),
            training_center: ReferenceName::new(record.training_center_name),
        }
    }
}

/// `YYYY-MM-DDTHH:MM:SS`, followed by exactly six fractional digits when the
/// microseconds are non-zero.
fn iso_timestamp(ts: &NaiveDateTime) -> String {
    if ts.nanosecond() / 1_000 == 0 {
        ts.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        ts.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

impl From<AthleteRecord> for AthleteSummary {
    fn from(record: AthleteRecord) -> Self {
        Self {
            id: record.id.to_string(),
            created_at: iso_timestamp(&record.created_at),
            name: record.name,
            training_center: record.training_center_name,
            category: record.category_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn sample_request() -> CreateAthleteRequest {
        serde_json::from_value(json!({
            "nome": "Joao",
            "cpf": "111.111.111-11",
            "idade": 25,
            "peso": 75.5,
            "altura": 1.70,
            "sexo": "M",
            "categoria": { "nome": "CrossFit" },
            "centro_treinamento": { "nome": "CT Alpha" }
        }))
        .unwrap()
    }

    fn sample_athlete() -> Athlete {
        Athlete {
            id: Uuid::new_v4(),
            created_at: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_micro_opt(12, 30, 0, 250_000)
                .unwrap(),
            name: "Joao".to_string(),
            cpf: "11111111111".to_string(),
            age: 25,
            weight: Decimal::new(755, 1),
            height: Decimal::new(170, 2),
            sex: "M".to_string(),
            category_id: 1,
            training_center_id: 2,
        }
    }

    #[test]
    fn valid_create_request_passes() {
        let req = sample_request();
        assert!(req.validate().is_ok());
        assert_eq!(req.category.name, "CrossFit");
        assert_eq!(req.training_center.name, "CT Alpha");
    }

    #[test]
    fn cpf_accepts_plain_and_formatted_forms() {
        assert!(validate_cpf("12345678901").is_ok());
        assert!(validate_cpf("123.456.789-01").is_ok());
        assert!(validate_cpf("123.456.789.01").is_err());
        assert!(validate_cpf("1234567890").is_err());
        assert!(validate_cpf("abcdefghijk").is_err());
        assert!(validate_cpf("").is_err());
    }

    #[test]
    fn rejects_invalid_profile_fields() {
        let mut req = sample_request();
        req.sex = "X".to_string();
        req.weight = Decimal::ZERO;
        req.age = 0;

        let errors = req.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 3);
    }

    #[test]
    fn rejects_empty_reference_name() {
        let mut req = sample_request();
        req.category = ReferenceName::new("");

        assert!(req.validate().is_err());
    }

    #[test]
    fn update_distinguishes_absent_from_empty() {
        let absent: UpdateAthleteRequest = serde_json::from_value(json!({})).unwrap();
        assert!(absent.name.is_none());
        assert!(absent.validate().is_ok());

        let empty: UpdateAthleteRequest = serde_json::from_value(json!({ "nome": "" })).unwrap();
        assert_eq!(empty.name.as_deref(), Some(""));
        assert!(empty.validate().is_err());
    }

    #[test]
    fn update_rejects_immutable_fields() {
        let with_id = serde_json::from_value::<UpdateAthleteRequest>(json!({
            "id": "0b6f5f0e-1111-4222-8333-444455556666",
            "nome": "Maria"
        }));
        assert!(with_id.is_err());

        let with_created_at = serde_json::from_value::<UpdateAthleteRequest>(json!({
            "created_at": "2024-01-01T00:00:00"
        }));
        assert!(with_created_at.is_err());
    }

    #[test]
    fn apply_changes_only_supplied_fields() {
        let original = sample_athlete();
        let mut athlete = original.clone();

        let changes = UpdateAthleteRequest {
            age: Some(31),
            ..Default::default()
        };
        changes.apply_to(&mut athlete);

        assert_eq!(athlete.age, 31);
        assert_eq!(athlete.id, original.id);
        assert_eq!(athlete.created_at, original.created_at);
        assert_eq!(athlete.name, original.name);
        assert_eq!(athlete.cpf, original.cpf);
        assert_eq!(athlete.weight, original.weight);
        assert_eq!(athlete.height, original.height);
        assert_eq!(athlete.sex, original.sex);
        assert_eq!(athlete.category_id, original.category_id);
        assert_eq!(athlete.training_center_id, original.training_center_id);
    }

    #[test]
    fn filter_treats_empty_values_as_absent() {
        let filter = AthleteFilter {
            name: Some(String::new()),
            cpf: Some("11111111111".to_string()),
        };

        assert_eq!(filter.name(), None);
        assert_eq!(filter.cpf(), Some("11111111111"));
    }

    #[test]
    fn summary_uses_string_id_and_iso_timestamp() {
        let athlete = sample_athlete();
        let record = AthleteRecord {
            id: athlete.id,
            created_at: athlete.created_at,
            name: athlete.name,
            cpf: athlete.cpf,
            age: athlete.age,
            weight: athlete.weight,
            height: athlete.height,
            sex: athlete.sex,
            category_name: "CrossFit".to_string(),
            training_center_name: "CT Alpha".to_string(),
        };

        let summary = AthleteSummary::from(record);
        assert_eq!(summary.id, athlete.id.to_string());
        assert_eq!(summary.created_at, "2024-03-01T12:30:00.250000");
        assert_eq!(summary.category, "CrossFit");
        assert_eq!(summary.training_center, "CT Alpha");

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["nome"], "Joao");
        assert_eq!(value["centro_treinamento"], "CT Alpha");
        assert_eq!(value["categoria"], "CrossFit");
    }

    #[test]
    fn iso_timestamp_has_stable_fraction() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let whole = day.and_hms_opt(8, 0, 5).unwrap();
        assert_eq!(iso_timestamp(&whole), "2024-03-01T08:00:05");

        let micros = day.and_hms_micro_opt(8, 0, 5, 7).unwrap();
        assert_eq!(iso_timestamp(&micros), "2024-03-01T08:00:05.000007");

        let millis = day.and_hms_milli_opt(8, 0, 5, 120).unwrap();
        assert_eq!(iso_timestamp(&millis), "2024-03-01T08:00:05.120000");
    }
}
