use crate::validation::{
    CODE_MAX, EMAIL_MAX, LAST_NAME_MAX, NAME_MAX, ValidationError, optional_max_len,
    required_max_len,
};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Identity shared by students and teachers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    /// National identity document number
    pub national_id: i32,
}

impl Person {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        national_id: i32,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: None,
            national_id,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        required_max_len("first_name", &self.first_name, NAME_MAX)?;
        required_max_len("last_name", &self.last_name, LAST_NAME_MAX)?;
        optional_max_len("email", self.email.as_deref(), EMAIL_MAX)
    }
}

impl Display for Person {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} - {}", self.national_id, self.first_name)
    }
}

/// Fields written when creating or updating a student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentData {
    pub person: Person,
    pub enrollment_number: String,
}

impl StudentData {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.person.validate()?;
        required_max_len("enrollment_number", &self.enrollment_number, CODE_MAX)
    }
}

/// Fields written when creating or updating a teacher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherData {
    pub person: Person,
    pub employee_id: String,
}

impl TeacherData {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.person.validate()?;
        required_max_len("employee_id", &self.employee_id, CODE_MAX)
    }
}
