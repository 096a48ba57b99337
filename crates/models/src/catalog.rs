use crate::validation::{
    CATEGORY_NAME_MAX, NAME_MAX, SCHEDULE_MAX, URL_MAX, ValidationError, optional_max_len,
    required_max_len,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fields written when creating or renaming a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryData {
    pub name: String,
}

impl CategoryData {
    pub fn validate(&self) -> Result<(), ValidationError> {
        required_max_len("name", &self.name, CATEGORY_NAME_MAX)
    }
}

/// Fields written when creating or updating a course
///
/// The cover image is handled separately since it lives in image storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseData {
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
}

impl CourseData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            start_date: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        required_max_len("name", &self.name, NAME_MAX)
    }
}

/// Fields written when creating or updating a commission (course section)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionData {
    pub name: String,
    /// Free-form meeting times, e.g. "Mon/Wed 18:00-21:00"
    pub schedule: Option<String>,
    pub meeting_link: Option<String>,
}

impl CommissionData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schedule: None,
            meeting_link: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        required_max_len("name", &self.name, NAME_MAX)?;
        optional_max_len("schedule", self.schedule.as_deref(), SCHEDULE_MAX)?;
        optional_max_len("meeting_link", self.meeting_link.as_deref(), URL_MAX)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_category_name_limit() {
        let category = CategoryData {
            name: "x".repeat(CATEGORY_NAME_MAX),
        };
        assert!(category.validate().is_ok());

        let category = CategoryData {
            name: "x".repeat(CATEGORY_NAME_MAX + 1),
        };
        assert_eq!(category.validate().unwrap_err().field(), "name");
    }

    #[test]
    fn test_commission_validate() {
        let mut commission = CommissionData::new("Comisión 1");
        assert!(commission.validate().is_ok());

        commission.meeting_link = Some(format!("https://meet.example.com/{}", "a".repeat(90)));
        assert_eq!(commission.validate().unwrap_err().field(), "meeting_link");
    }
}
