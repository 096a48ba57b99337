use crate::{
    entities::teacher,
    error::{ModelError, Result},
};
use log::info;
use models::person::TeacherData;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Select,
};
use uuid::Uuid;

/// Filtered views over the teachers table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TeacherView {
    /// Only teachers that have not been soft-deleted
    #[default]
    Active,
    All,
}

impl TeacherView {
    pub fn select(self) -> Select<teacher::Entity> {
        let query = teacher::Entity::find();
        match self {
            Self::Active => query.filter(teacher::Column::Active.eq(true)),
            Self::All => query,
        }
    }
}

pub struct TeacherService;

impl TeacherService {
    const ENTITY: &'static str = "teacher";

    pub async fn create(db: &DatabaseConnection, data: TeacherData) -> Result<teacher::Model> {
        data.validate()?;

        let mut teacher = teacher::ActiveModel {
            id: Set(Uuid::new_v4()),
            active: Set(true),
            ..Default::default()
        };
        teacher.apply(data);

        let teacher = teacher.insert(db).await?;
        info!("Created teacher {teacher}");
        Ok(teacher)
    }

    /// Looks a teacher up through the default view, so inactive ones are not found
    pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<teacher::Model> {
        Self::find_in(db, TeacherView::default(), id).await
    }

    async fn find_in(
        db: &DatabaseConnection,
        view: TeacherView,
        id: Uuid,
    ) -> Result<teacher::Model> {
        view.select()
            .filter(teacher::Column::Id.eq(id))
            .one(db)
            .await?
            .ok_or_else(|| ModelError::not_found(Self::ENTITY, id))
    }

    pub async fn list(db: &DatabaseConnection, view: TeacherView) -> Result<Vec<teacher::Model>> {
        Ok(view
            .select()
            .order_by_asc(teacher::Column::LastName)
            .order_by_asc(teacher::Column::FirstName)
            .all(db)
            .await?)
    }

    pub async fn count(db: &DatabaseConnection, view: TeacherView) -> Result<u64> {
        Ok(view.select().count(db).await?)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        data: TeacherData,
    ) -> Result<teacher::Model> {
        data.validate()?;

        let mut teacher: teacher::ActiveModel = Self::get(db, id).await?.into();
        teacher.apply(data);

        Ok(teacher.update(db).await?)
    }

    pub async fn soft_delete(db: &DatabaseConnection, id: Uuid) -> Result<teacher::Model> {
        let mut teacher: teacher::ActiveModel = Self::get(db, id).await?.into();
        teacher.active = Set(false);

        let teacher = teacher.update(db).await?;
        info!("Deactivated teacher {teacher}");
        Ok(teacher)
    }

    /// Reactivates a teacher; has to look past the default view to find them
    pub async fn restore(db: &DatabaseConnection, id: Uuid) -> Result<teacher::Model> {
        let mut teacher: teacher::ActiveModel =
            Self::find_in(db, TeacherView::All, id).await?.into();
        teacher.active = Set(true);

        let teacher = teacher.update(db).await?;
        info!("Restored teacher {teacher}");
        Ok(teacher)
    }

    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<()> {
        Self::find_in(db, TeacherView::All, id)
            .await?
            .delete(db)
            .await?;

        info!("Deleted teacher {id}");
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::{setup_db, teacher_data};

    #[tokio::test]
    async fn test_default_view_excludes_inactive() {
        let db = setup_db().await;
        let marta = TeacherService::create(&db, teacher_data("Marta", "D-01"))
            .await
            .unwrap();
        let pablo = TeacherService::create(&db, teacher_data("Pablo", "D-02"))
            .await
            .unwrap();

        TeacherService::soft_delete(&db, marta.id).await.unwrap();

        let active = TeacherService::list(&db, TeacherView::default())
            .await
            .unwrap();
        assert_eq!(active, vec![pablo]);
        assert_eq!(TeacherService::count(&db, TeacherView::All).await.unwrap(), 2);

        assert!(matches!(
            TeacherService::get(&db, marta.id).await,
            Err(ModelError::NotFound { entity: "teacher", .. })
        ));
    }

    #[tokio::test]
    async fn test_restore() {
        let db = setup_db().await;
        let marta = TeacherService::create(&db, teacher_data("Marta", "D-01"))
            .await
            .unwrap();

        TeacherService::soft_delete(&db, marta.id).await.unwrap();
        let restored = TeacherService::restore(&db, marta.id).await.unwrap();

        assert_eq!(restored, marta);
        assert_eq!(TeacherService::get(&db, marta.id).await.unwrap(), marta);
        assert_eq!(restored.to_string(), "D-01 - Marta García");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = setup_db().await;
        let marta = TeacherService::create(&db, teacher_data("Marta", "D-01"))
            .await
            .unwrap();

        let updated = TeacherService::update(&db, marta.id, teacher_data("Marta", "D-99"))
            .await
            .unwrap();
        assert_eq!(updated.employee_id, "D-99");

        TeacherService::soft_delete(&db, marta.id).await.unwrap();
        TeacherService::delete(&db, marta.id).await.unwrap();
        assert_eq!(TeacherService::count(&db, TeacherView::All).await.unwrap(), 0);
    }
}
