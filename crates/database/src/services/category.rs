use crate::{
    entities::{category, course},
    error::{ModelError, Result},
    storage::{ImageStorage, remove_image},
};
use log::info;
use models::catalog::CategoryData;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

pub struct CategoryService;

impl CategoryService {
    const ENTITY: &'static str = "category";

    pub async fn create(db: &DatabaseConnection, data: CategoryData) -> Result<category::Model> {
        data.validate()?;

        let category = category::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(data.name),
            active: Set(true),
        }
        .insert(db)
        .await?;

        info!("Created category {}", category.name);
        Ok(category)
    }

    pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<category::Model> {
        category::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ModelError::not_found(Self::ENTITY, id))
    }

    /// All categories; pass `active_only` to hide soft-deleted ones
    pub async fn list(db: &DatabaseConnection, active_only: bool) -> Result<Vec<category::Model>> {
        let mut query = category::Entity::find();
        if active_only {
            query = query.filter(category::Column::Active.eq(true));
        }

        Ok(query.order_by_asc(category::Column::Name).all(db).await?)
    }

    pub async fn count(db: &DatabaseConnection) -> Result<u64> {
        Ok(category::Entity::find().count(db).await?)
    }

    pub async fn rename(
        db: &DatabaseConnection,
        id: Uuid,
        data: CategoryData,
    ) -> Result<category::Model> {
        data.validate()?;

        let mut category: category::ActiveModel = Self::get(db, id).await?.into();
        category.name = Set(data.name);

        Ok(category.update(db).await?)
    }

    /// Marks the category inactive. Its courses are left as they are.
    pub async fn soft_delete(db: &DatabaseConnection, id: Uuid) -> Result<category::Model> {
        Self::set_active(db, id, false).await
    }

    pub async fn restore(db: &DatabaseConnection, id: Uuid) -> Result<category::Model> {
        Self::set_active(db, id, true).await
    }

    async fn set_active(
        db: &DatabaseConnection,
        id: Uuid,
        active: bool,
    ) -> Result<category::Model> {
        let mut category: category::ActiveModel = Self::get(db, id).await?.into();
        category.active = Set(active);

        let category = category.update(db).await?;
        info!("Category {} active={active}", category.name);
        Ok(category)
    }

    /// Hard-deletes the category together with its courses, their commissions
    /// and enrollments
    ///
    /// Course cover images are removed from storage first.
    pub async fn delete(
        db: &DatabaseConnection,
        storage: &dyn ImageStorage,
        id: Uuid,
    ) -> Result<()> {
        let category = Self::get(db, id).await?;

        let covers: Vec<Option<String>> = category
            .find_related(course::Entity)
            .select_only()
            .column(course::Column::CoverImage)
            .into_tuple()
            .all(db)
            .await?;

        for cover in covers.iter().flatten() {
            remove_image(storage, Some(cover.as_str())).await?;
        }

        category.delete(db).await?;
        info!("Deleted category {id}");
        Ok(())
    }
}
