use crate::{
    entities::{category, course},
    error::{ModelError, Result},
    storage::{ImageStorage, ImageUpload, discard_image, remove_image, store_image},
};
use log::info;
use models::catalog::CourseData;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

pub struct CourseService;

impl CourseService {
    const ENTITY: &'static str = "course";

    /// Storage directory for course cover images
    pub const COVER_DIR: &'static str = "imagenes";

    pub async fn create(
        db: &DatabaseConnection,
        storage: &dyn ImageStorage,
        category_id: Uuid,
        data: CourseData,
        cover: Option<ImageUpload>,
    ) -> Result<course::Model> {
        data.validate()?;

        let cover_image = store_image(storage, Self::COVER_DIR, cover.as_ref()).await?;

        let course = course::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(data.name),
            description: Set(data.description),
            start_date: Set(data.start_date),
            cover_image: Set(cover_image.clone()),
            category_id: Set(category_id),
        };

        match course.insert(db).await {
            Ok(course) => {
                info!("Created course {}", course.name);
                Ok(course)
            }
            Err(e) => {
                discard_image(storage, cover_image.as_deref()).await;
                Err(e.into())
            }
        }
    }

    pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<course::Model> {
        course::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ModelError::not_found(Self::ENTITY, id))
    }

    pub async fn list(db: &DatabaseConnection) -> Result<Vec<course::Model>> {
        Ok(course::Entity::find()
            .order_by_asc(course::Column::Name)
            .all(db)
            .await?)
    }

    pub async fn count(db: &DatabaseConnection) -> Result<u64> {
        Ok(course::Entity::find().count(db).await?)
    }

    pub async fn by_category(
        db: &DatabaseConnection,
        category_id: Uuid,
    ) -> Result<Vec<course::Model>> {
        Ok(course::Entity::find()
            .filter(course::Column::CategoryId.eq(category_id))
            .order_by_asc(course::Column::Name)
            .all(db)
            .await?)
    }

    /// The course along with the category it belongs to
    pub async fn get_with_category(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<(course::Model, category::Model)> {
        let course = Self::get(db, id).await?;
        let category = course
            .find_related(category::Entity)
            .one(db)
            .await?
            .ok_or_else(|| ModelError::not_found("category", course.category_id))?;

        Ok((course, category))
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        data: CourseData,
    ) -> Result<course::Model> {
        data.validate()?;

        let mut course: course::ActiveModel = Self::get(db, id).await?.into();
        course.name = Set(data.name);
        course.description = Set(data.description);
        course.start_date = Set(data.start_date);

        Ok(course.update(db).await?)
    }

    /// Stores a new cover image and deletes the one it replaces
    pub async fn set_cover_image(
        db: &DatabaseConnection,
        storage: &dyn ImageStorage,
        id: Uuid,
        upload: ImageUpload,
    ) -> Result<course::Model> {
        let current = Self::get(db, id).await?;
        let previous = current.cover_image.clone();

        let name = storage
            .save(Self::COVER_DIR, &upload.file_name, &upload.bytes)
            .await?;

        let mut course: course::ActiveModel = current.into();
        course.cover_image = Set(Some(name.clone()));
        let course = match course.update(db).await {
            Ok(course) => course,
            Err(e) => {
                discard_image(storage, Some(name.as_str())).await;
                return Err(e.into());
            }
        };

        remove_image(storage, previous.as_deref()).await?;
        Ok(course)
    }

    /// Deletes the cover image, then the course and everything cascading from it
    pub async fn delete(
        db: &DatabaseConnection,
        storage: &dyn ImageStorage,
        id: Uuid,
    ) -> Result<()> {
        let course = Self::get(db, id).await?;

        remove_image(storage, course.cover_image.as_deref()).await?;
        course.delete(db).await?;

        info!("Deleted course {id}");
        Ok(())
    }
}
