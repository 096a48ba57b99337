use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use strum::{AsRefStr, EnumIter, EnumProperty, EnumString, IntoEnumIterator};

#[cfg(feature = "database")]
use sea_orm::Value;

/// Where a student stands within a commission
///
/// Stored as a three-letter code.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    AsRefStr,
    EnumProperty,
)]
pub enum EnrollmentStatus {
    /// Signed up, classes not started
    #[default]
    #[strum(serialize = "INS", props(label = "Inscripto"))]
    Enrolled,
    #[strum(serialize = "CUR", props(label = "Cursando"))]
    InProgress,
    #[strum(serialize = "EGR", props(label = "Egresado"))]
    Graduated,
}

impl EnrollmentStatus {
    pub fn code(&self) -> &str {
        self.as_ref()
    }

    pub fn label(&self) -> &'static str {
        self.get_str("label").unwrap_or_default()
    }

    pub fn all() -> Vec<EnrollmentStatus> {
        EnrollmentStatus::iter().collect()
    }
}

impl Display for EnrollmentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.label())
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::ValueType for EnrollmentStatus {
    fn try_from(v: Value) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
        match v {
            Value::String(Some(s)) => s.parse().map_err(|_| sea_orm::sea_query::ValueTypeErr),
            _ => Err(sea_orm::sea_query::ValueTypeErr),
        }
    }

    fn type_name() -> String {
        "EnrollmentStatus".to_string()
    }

    fn array_type() -> sea_orm::sea_query::ArrayType {
        sea_orm::sea_query::ArrayType::String
    }

    fn column_type() -> sea_orm::sea_query::ColumnType {
        sea_orm::sea_query::ColumnType::String(sea_orm::sea_query::StringLen::N(3))
    }
}

#[cfg(feature = "database")]
impl From<EnrollmentStatus> for Value {
    fn from(status: EnrollmentStatus) -> Self {
        Value::String(Some(Box::new(status.code().to_string())))
    }
}

#[cfg(feature = "database")]
impl sea_orm::TryGetable for EnrollmentStatus {
    fn try_get_by<I: sea_orm::ColIdx>(
        res: &sea_orm::QueryResult,
        index: I,
    ) -> Result<Self, sea_orm::TryGetError> {
        let val: String = res.try_get_by(index)?;

        val.parse().map_err(|_| {
            sea_orm::TryGetError::DbErr(sea_orm::DbErr::Type(format!(
                "Unknown enrollment status code: {val}"
            )))
        })
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::Nullable for EnrollmentStatus {
    fn null() -> Value {
        Value::String(None)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_default_is_enrolled() {
        assert_eq!(EnrollmentStatus::default(), EnrollmentStatus::Enrolled);
    }

    #[test]
    fn test_codes() {
        assert_eq!(EnrollmentStatus::Enrolled.code(), "INS");
        assert_eq!(EnrollmentStatus::InProgress.code(), "CUR");
        assert_eq!(EnrollmentStatus::Graduated.code(), "EGR");

        assert_eq!(
            EnrollmentStatus::from_str("CUR").unwrap(),
            EnrollmentStatus::InProgress
        );
        assert!(EnrollmentStatus::from_str("XYZ").is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(EnrollmentStatus::Enrolled.to_string(), "Inscripto");
        assert_eq!(EnrollmentStatus::InProgress.label(), "Cursando");
        assert_eq!(EnrollmentStatus::Graduated.label(), "Egresado");
    }

    #[test]
    fn test_all() {
        assert_eq!(
            EnrollmentStatus::all(),
            vec![
                EnrollmentStatus::Enrolled,
                EnrollmentStatus::InProgress,
                EnrollmentStatus::Graduated
            ]
        );
    }
}
