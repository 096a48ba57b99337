use models::person::{Person, TeacherData};
use sea_orm::{ActiveValue::Set, entity::prelude::*};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub national_id: i32,
    pub employee_id: String,
    /// Inactive teachers are hidden from the default view
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
            self.employee_id, self.first_name, self.last_name
        )
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModel {
    pub fn apply(&mut self, data: TeacherData) {
        let TeacherData {
            person: Person {
                first_name,
                last_name,
                email,
                national_id,
            },
            employee_id,
        } = data;

        self.first_name = Set(first_name);
        self.last_name = Set(last_name);
        self.email = Set(email);
        self.national_id = Set(national_id);
        self.employee_id = Set(employee_id);
    }
}

impl ActiveModelBehavior for ActiveModel {}
