use crate::{
    entities::project,
    error::{ModelError, Result},
    storage::{ImageStorage, ImageUpload, discard_image, remove_image, store_image},
};
use log::info;
use models::project::ProjectData;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

pub struct ProjectService;

impl ProjectService {
    const ENTITY: &'static str = "project";

    /// Storage directory for project cover images
    pub const COVER_DIR: &'static str = "imagenes/proyecto";

    /// Creates a project for a student; the slug is derived from year and name
    pub async fn create(
        db: &DatabaseConnection,
        storage: &dyn ImageStorage,
        student_id: Uuid,
        data: ProjectData,
        cover: Option<ImageUpload>,
    ) -> Result<project::Model> {
        data.validate()?;

        let cover_image = store_image(storage, Self::COVER_DIR, cover.as_ref()).await?;

        let project = project::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(data.name),
            year: Set(data.year),
            description: Set(data.description),
            url: Set(data.url),
            cover_image: Set(cover_image.clone()),
            student_id: Set(student_id),
            ..Default::default()
        };

        match project.insert(db).await {
            Ok(project) => {
                info!("Created project {}", project.slug);
                Ok(project)
            }
            Err(e) => {
                discard_image(storage, cover_image.as_deref()).await;
                Err(e.into())
            }
        }
    }

    pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<project::Model> {
        project::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ModelError::not_found(Self::ENTITY, id))
    }

    pub async fn find_by_slug(
        db: &DatabaseConnection,
        slug: &str,
    ) -> Result<Option<project::Model>> {
        Ok(project::Entity::find()
            .filter(project::Column::Slug.eq(slug))
            .one(db)
            .await?)
    }

    /// Newest projects first
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<project::Model>> {
        Ok(project::Entity::find()
            .order_by_desc(project::Column::Year)
            .order_by_asc(project::Column::Name)
            .all(db)
            .await?)
    }

    pub async fn count(db: &DatabaseConnection) -> Result<u64> {
        Ok(project::Entity::find().count(db).await?)
    }

    pub async fn by_student(
        db: &DatabaseConnection,
        student_id: Uuid,
    ) -> Result<Vec<project::Model>> {
        Ok(project::Entity::find()
            .filter(project::Column::StudentId.eq(student_id))
            .order_by_desc(project::Column::Year)
            .order_by_asc(project::Column::Name)
            .all(db)
            .await?)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        data: ProjectData,
    ) -> Result<project::Model> {
        data.validate()?;

        let mut project: project::ActiveModel = Self::get(db, id).await?.into();
        project.name = Set(data.name);
        project.year = Set(data.year);
        project.description = Set(data.description);
        project.url = Set(data.url);

        let project = project.update(db).await?;
        info!("Updated project {}", project.slug);
        Ok(project)
    }

    /// Stores a new cover image and deletes the one it replaces
    pub async fn set_cover_image(
        db: &DatabaseConnection,
        storage: &dyn ImageStorage,
        id: Uuid,
        upload: ImageUpload,
    ) -> Result<project::Model> {
        let current = Self::get(db, id).await?;
        let previous = current.cover_image.clone();

        let name = storage
            .save(Self::COVER_DIR, &upload.file_name, &upload.bytes)
            .await?;

        let mut project: project::ActiveModel = current.into();
        project.cover_image = Set(Some(name.clone()));
        let project = match project.update(db).await {
            Ok(project) => project,
            Err(e) => {
                discard_image(storage, Some(name.as_str())).await;
                return Err(e.into());
            }
        };

        remove_image(storage, previous.as_deref()).await?;
        Ok(project)
    }

    /// Deletes the cover image, then the project
    pub async fn delete(
        db: &DatabaseConnection,
        storage: &dyn ImageStorage,
        id: Uuid,
    ) -> Result<()> {
        let project = Self::get(db, id).await?;

        remove_image(storage, project.cover_image.as_deref()).await?;
        project.delete(db).await?;

        info!("Deleted project {id}");
        Ok(())
    }
}
