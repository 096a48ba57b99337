use crate::{
    entities::language,
    error::{ModelError, Result},
    storage::{ImageStorage, ImageUpload, discard_image, remove_image},
};
use log::info;
use models::validation::{NAME_MAX, required_max_len};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryOrder,
};
use uuid::Uuid;

pub struct LanguageService;

impl LanguageService {
    const ENTITY: &'static str = "language";

    /// Storage directory for language logos
    pub const LOGO_DIR: &'static str = "logos";

    /// Creates a language; unlike cover images the logo is mandatory
    pub async fn create(
        db: &DatabaseConnection,
        storage: &dyn ImageStorage,
        name: &str,
        logo: ImageUpload,
    ) -> Result<language::Model> {
        required_max_len("name", name, NAME_MAX)?;

        let logo = storage
            .save(Self::LOGO_DIR, &logo.file_name, &logo.bytes)
            .await?;

        let language = language::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            logo: Set(logo.clone()),
        };

        match language.insert(db).await {
            Ok(language) => {
                info!("Created language {}", language.name);
                Ok(language)
            }
            Err(e) => {
                discard_image(storage, Some(logo.as_str())).await;
                Err(e.into())
            }
        }
    }

    pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<language::Model> {
        language::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ModelError::not_found(Self::ENTITY, id))
    }

    pub async fn list(db: &DatabaseConnection) -> Result<Vec<language::Model>> {
        Ok(language::Entity::find()
            .order_by_asc(language::Column::Name)
            .all(db)
            .await?)
    }

    pub async fn count(db: &DatabaseConnection) -> Result<u64> {
        Ok(language::Entity::find().count(db).await?)
    }

    pub async fn rename(db: &DatabaseConnection, id: Uuid, name: &str) -> Result<language::Model> {
        required_max_len("name", name, NAME_MAX)?;

        let mut language: language::ActiveModel = Self::get(db, id).await?.into();
        language.name = Set(name.to_string());

        Ok(language.update(db).await?)
    }

    /// Stores a new logo and deletes the one it replaces
    pub async fn set_logo(
        db: &DatabaseConnection,
        storage: &dyn ImageStorage,
        id: Uuid,
        upload: ImageUpload,
    ) -> Result<language::Model> {
        let current = Self::get(db, id).await?;
        let previous = current.logo.clone();

        let name = storage
            .save(Self::LOGO_DIR, &upload.file_name, &upload.bytes)
            .await?;

        let mut language: language::ActiveModel = current.into();
        language.logo = Set(name.clone());
        let language = match language.update(db).await {
            Ok(language) => language,
            Err(e) => {
                discard_image(storage, Some(name.as_str())).await;
                return Err(e.into());
            }
        };

        remove_image(storage, Some(previous.as_str())).await?;
        Ok(language)
    }

    /// Deletes the logo file, then the language
    pub async fn delete(
        db: &DatabaseConnection,
        storage: &dyn ImageStorage,
        id: Uuid,
    ) -> Result<()> {
        let language = Self::get(db, id).await?;

        remove_image(storage, Some(language.logo.as_str())).await?;
        language.delete(db).await?;

        info!("Deleted language {id}");
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::{setup_db, temp_storage};

    fn logo(name: &str) -> ImageUpload {
        ImageUpload::new(name, b"<svg/>".to_vec())
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let db = setup_db().await;
        let (_dir, storage) = temp_storage();

        let rust = LanguageService::create(&db, &storage, "Rust", logo("rust.svg"))
            .await
            .unwrap();
        let go = LanguageService::create(&db, &storage, "Go", logo("go.svg"))
            .await
            .unwrap();

        assert_eq!(rust.logo, "logos/rust.svg");
        assert!(storage.exists(&rust.logo).await.unwrap());
        assert_eq!(LanguageService::list(&db).await.unwrap(), vec![go, rust]);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let db = setup_db().await;
        let (_dir, storage) = temp_storage();

        let err = LanguageService::create(&db, &storage, "  ", logo("rust.svg"))
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::Validation(_)));
        // Nothing is written for rejected input
        assert!(!storage.exists("logos/rust.svg").await.unwrap());
    }

    #[tokio::test]
    async fn test_set_logo_and_rename() {
        let db = setup_db().await;
        let (_dir, storage) = temp_storage();
        let language = LanguageService::create(&db, &storage, "Rust", logo("rust.svg"))
            .await
            .unwrap();

        let updated = LanguageService::set_logo(&db, &storage, language.id, logo("ferris.png"))
            .await
            .unwrap();
        assert_eq!(updated.logo, "logos/ferris.png");
        assert!(!storage.exists("logos/rust.svg").await.unwrap());

        let renamed = LanguageService::rename(&db, language.id, "Rust 2024")
            .await
            .unwrap();
        assert_eq!(renamed.name, "Rust 2024");
        assert_eq!(renamed.logo, updated.logo);
    }

    #[tokio::test]
    async fn test_delete_removes_logo() {
        let db = setup_db().await;
        let (_dir, storage) = temp_storage();
        let language = LanguageService::create(&db, &storage, "Rust", logo("rust.svg"))
            .await
            .unwrap();

        LanguageService::delete(&db, &storage, language.id)
            .await
            .unwrap();

        assert!(!storage.exists(&language.logo).await.unwrap());
        assert_eq!(LanguageService::count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_with_missing_logo() {
        let db = setup_db().await;
        let (_dir, storage) = temp_storage();
        let language = LanguageService::create(&db, &storage, "Rust", logo("rust.svg"))
            .await
            .unwrap();
        storage.delete(&language.logo).await.unwrap();

        LanguageService::delete(&db, &storage, language.id)
            .await
            .unwrap();
        assert!(matches!(
            LanguageService::get(&db, language.id).await,
            Err(ModelError::NotFound { .. })
        ));
    }
}
