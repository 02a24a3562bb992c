use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

/// Minimum number of answer choices a question must offer.
pub const MIN_CHOICES: usize = 3;
/// Bounds and default for the number of questions returned by a listing.
pub const MIN_COUNT: usize = 1;
pub const MAX_COUNT: usize = 50;
pub const DEFAULT_COUNT: usize = 10;

/// A trivia question as stored in the backing file.
///
/// The serialized field names are the on-disk contract; `id` is written as
/// its hyphenated string form.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
    pub id: Uuid,
    pub question_text: String,
    pub choices: Vec<String>,
    pub answer: String,
    pub category: String,
}

/// Create input: everything but the id, which is assigned on creation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewQuestion {
    pub question_text: String,
    pub choices: Vec<String>,
    pub answer: String,
    pub category: String,
}

impl Question {
    pub fn from_new(input: NewQuestion) -> Self {
        Self {
            id: Uuid::new_v4(),
            question_text: input.question_text,
            choices: input.choices,
            answer: input.answer,
            category: input.category,
        }
    }

    /// Case-insensitive category comparison used by listing filters.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }
}

/// Shape constraints checked on create input before it reaches the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldRule {
    NonEmpty,
    MinItems(usize),
}

pub const CREATE_RULES: &[(&str, FieldRule)] = &[
    ("question_text", FieldRule::NonEmpty),
    ("choices", FieldRule::MinItems(MIN_CHOICES)),
    ("answer", FieldRule::NonEmpty),
    ("category", FieldRule::NonEmpty),
];

enum FieldValue<'a> {
    Text(&'a str),
    List(&'a [String]),
}

impl NewQuestion {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "question_text" => Some(FieldValue::Text(&self.question_text)),
            "choices" => Some(FieldValue::List(&self.choices)),
            "answer" => Some(FieldValue::Text(&self.answer)),
            "category" => Some(FieldValue::Text(&self.category)),
            _ => None,
        }
    }

    /// Apply [`CREATE_RULES`] in order and report the first violation.
    ///
    /// Membership of `answer` in `choices` is not a shape rule; the service
    /// checks it.
    pub fn validate_shape(&self) -> Result<(), ModelError> {
        for &(name, rule) in CREATE_RULES {
            let Some(value) = self.field(name) else { continue };
            match (rule, value) {
                (FieldRule::NonEmpty, FieldValue::Text(s)) if s.trim().is_empty() => {
                    return Err(ModelError::validation(name, "must not be empty"));
                }
                (FieldRule::MinItems(min), FieldValue::List(items)) if items.len() < min => {
                    return Err(ModelError::validation(
                        name,
                        format!("needs at least {min} items, got {}", items.len()),
                    ));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Check a requested listing size against `MIN_COUNT..=MAX_COUNT`.
pub fn validate_count(count: usize) -> Result<usize, ModelError> {
    if (MIN_COUNT..=MAX_COUNT).contains(&count) {
        Ok(count)
    } else {
        Err(ModelError::validation(
            "count",
            format!("must be between {MIN_COUNT} and {MAX_COUNT}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewQuestion {
        NewQuestion {
            question_text: "Ibu kota Indonesia?".into(),
            choices: vec!["Jakarta".into(), "Bandung".into(), "Surabaya".into()],
            answer: "Jakarta".into(),
            category: "Geografi".into(),
        }
    }

    #[test]
    fn valid_input_passes() {
        assert_eq!(sample().validate_shape(), Ok(()));
    }

    #[test]
    fn too_few_choices_rejected() {
        let mut q = sample();
        q.choices.pop();
        let err = q.validate_shape().unwrap_err();
        assert!(matches!(err, ModelError::Validation { field: "choices", .. }));
    }

    #[test]
    fn empty_choices_report_the_item_minimum() {
        let mut q = sample();
        q.choices.clear();
        let err = q.validate_shape().unwrap_err();
        assert_eq!(
            err,
            ModelError::validation("choices", format!("needs at least {MIN_CHOICES} items, got 0"))
        );
    }

    #[test]
    fn blank_text_fields_rejected_in_table_order() {
        let mut q = sample();
        q.category = "   ".into();
        q.answer = String::new();
        let err = q.validate_shape().unwrap_err();
        assert!(matches!(err, ModelError::Validation { field: "answer", .. }));
    }

    #[test]
    fn answer_membership_is_not_a_shape_rule() {
        let mut q = sample();
        q.answer = "Medan".into();
        assert!(q.validate_shape().is_ok());
    }

    #[test]
    fn count_bounds() {
        assert!(validate_count(0).is_err());
        assert_eq!(validate_count(1), Ok(1));
        assert_eq!(validate_count(50), Ok(50));
        assert!(validate_count(51).is_err());
    }

    #[test]
    fn category_match_ignores_case() {
        let q = Question::from_new(sample());
        assert!(q.in_category("geografi"));
        assert!(q.in_category("GEOGRAFI"));
        assert!(!q.in_category("Sains"));
    }

    #[test]
    fn serialized_record_uses_string_id_and_contract_fields() {
        let q = Question::from_new(sample());
        let v = serde_json::to_value(&q).unwrap();
        assert_eq!(v["id"], serde_json::Value::String(q.id.to_string()));
        for field in ["question_text", "choices", "answer", "category"] {
            assert!(v.get(field).is_some(), "missing {field}");
        }
        let back: Question = serde_json::from_value(v).unwrap();
        assert_eq!(back, q);
    }
}
