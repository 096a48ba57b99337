use crate::{
    entities::{commission, project, student},
    error::{ModelError, Result},
    storage::{ImageStorage, remove_image},
};
use log::info;
use models::person::StudentData;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};
use uuid::Uuid;

/// Filtered views over the students table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StudentView {
    /// Every student, soft-deleted ones included
    #[default]
    All,
    Active,
}

impl StudentView {
    pub fn select(self) -> Select<student::Entity> {
        let query = student::Entity::find();
        match self {
            Self::All => query,
            Self::Active => query.filter(student::Column::Active.eq(true)),
        }
    }
}

pub struct StudentService;

impl StudentService {
    const ENTITY: &'static str = "student";

    pub async fn create(db: &DatabaseConnection, data: StudentData) -> Result<student::Model> {
        data.validate()?;

        let mut student = student::ActiveModel {
            id: Set(Uuid::new_v4()),
            active: Set(true),
            ..Default::default()
        };
        student.apply(data);

        let student = student.insert(db).await?;
        info!("Created student {student}");
        Ok(student)
    }

    /// Looks a student up through the default view
    pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<student::Model> {
        StudentView::default()
            .select()
            .filter(student::Column::Id.eq(id))
            .one(db)
            .await?
            .ok_or_else(|| ModelError::not_found(Self::ENTITY, id))
    }

    pub async fn list(db: &DatabaseConnection, view: StudentView) -> Result<Vec<student::Model>> {
        Ok(view
            .select()
            .order_by_asc(student::Column::LastName)
            .order_by_asc(student::Column::FirstName)
            .all(db)
            .await?)
    }

    pub async fn count(db: &DatabaseConnection, view: StudentView) -> Result<u64> {
        Ok(view.select().count(db).await?)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        data: StudentData,
    ) -> Result<student::Model> {
        data.validate()?;

        let mut student: student::ActiveModel = Self::get(db, id).await?.into();
        student.apply(data);

        Ok(student.update(db).await?)
    }

    /// Marks the student inactive without touching anything else
    pub async fn soft_delete(db: &DatabaseConnection, id: Uuid) -> Result<student::Model> {
        Self::set_active(db, id, false).await
    }

    pub async fn restore(db: &DatabaseConnection, id: Uuid) -> Result<student::Model> {
        Self::set_active(db, id, true).await
    }

    async fn set_active(db: &DatabaseConnection, id: Uuid, active: bool) -> Result<student::Model> {
        let mut student: student::ActiveModel = Self::get(db, id).await?.into();
        student.active = Set(active);

        let student = student.update(db).await?;
        info!("Student {student} active={active}");
        Ok(student)
    }

    /// Removes the student and, through the cascade, their projects and enrollments
    ///
    /// Project cover images are deleted from storage before the rows go.
    pub async fn delete(
        db: &DatabaseConnection,
        storage: &dyn ImageStorage,
        id: Uuid,
    ) -> Result<()> {
        let student = Self::get(db, id).await?;

        let covers: Vec<Option<String>> = student
            .find_related(project::Entity)
            .select_only()
            .column(project::Column::CoverImage)
            .into_tuple()
            .all(db)
            .await?;

        for cover in covers.iter().flatten() {
            remove_image(storage, Some(cover.as_str())).await?;
        }

        student.delete(db).await?;
        info!("Deleted student {id}");
        Ok(())
    }

    /// Commissions the student is enrolled in, whatever the enrollment status
    pub async fn commissions(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<Vec<commission::Model>> {
        let student = Self::get(db, id).await?;

        Ok(student
            .find_related(commission::Entity)
            .order_by_asc(commission::Column::Name)
            .all(db)
            .await?)
    }
}
