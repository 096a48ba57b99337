use models::person::{Person, StudentData};
use sea_orm::{ActiveValue::Set, entity::prelude::*};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    // Person columns
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub national_id: i32,
    pub enrollment_number: String,
    /// Cleared by a soft delete
    pub active: bool,
}

impl Model {
    pub fn person(&self) -> Person {
        Person {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            national_id: self.national_id,
        }
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{} - {} {}",
            self.enrollment_number, self.first_name, self.last_name
        )
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::enrollment::Entity")]
    Enrollments,
    #[sea_orm(has_many = "super::project::Entity")]
    Projects,
}

impl Related<super::enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

// Many-to-many relationship with commissions
impl Related<super::commission::Entity> for Entity {
    fn to() -> RelationDef {
        super::enrollment::Relation::Commission.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::enrollment::Relation::Student.def().rev())
    }
}

impl ActiveModel {
    /// Writes every editable column from `data`
    pub fn apply(&mut self, data: StudentData) {
        let StudentData {
            person,
            enrollment_number,
        } = data;

        self.first_name = Set(person.first_name);
        self.last_name = Set(person.last_name);
        self.email = Set(person.email);
        self.national_id = Set(person.national_id);
        self.enrollment_number = Set(enrollment_number);
    }
}

impl ActiveModelBehavior for ActiveModel {}
