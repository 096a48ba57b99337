use crate::{
    entities::{category, commission, course},
    services::{category::CategoryService, commission::CommissionService, course::CourseService},
    storage::{FileSystemStorage, ImageUpload},
};
use migration::{Migrator, MigratorTrait};
use models::{
    catalog::{CategoryData, CommissionData, CourseData},
    person::{Person, StudentData, TeacherData},
    project::ProjectData,
};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tempfile::TempDir;
use uuid::Uuid;

/// Fresh in-memory database with every migration applied
///
/// A single connection keeps every query on the same in-memory database.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

/// Storage rooted in a temporary directory, removed when the guard drops
pub fn temp_storage() -> (TempDir, FileSystemStorage) {
    let dir = TempDir::new().unwrap();
    let storage = FileSystemStorage::new(dir.path());
    (dir, storage)
}

pub fn student_data(first_name: &str, enrollment_number: &str) -> StudentData {
    StudentData {
        person: Person::new(first_name, "García", 30_123_456),
        enrollment_number: enrollment_number.to_string(),
    }
}

pub fn teacher_data(first_name: &str, employee_id: &str) -> TeacherData {
    TeacherData {
        person: Person::new(first_name, "García", 20_987_654),
        employee_id: employee_id.to_string(),
    }
}

pub fn project_data(name: &str, year: i32) -> ProjectData {
    ProjectData {
        name: name.to_string(),
        year,
        description: None,
        url: "https://example.com/proyecto".to_string(),
    }
}

pub async fn new_category(db: &DatabaseConnection) -> category::Model {
    let data = CategoryData {
        name: "Programación".to_string(),
    };
    CategoryService::create(db, data).await.unwrap()
}

/// A course with a stored cover image
pub async fn new_course(
    db: &DatabaseConnection,
    storage: &FileSystemStorage,
    category_id: Uuid,
) -> course::Model {
    CourseService::create(
        db,
        storage,
        category_id,
        CourseData::new("Python"),
        Some(ImageUpload::new("python.png", b"png".to_vec())),
    )
    .await
    .unwrap()
}

pub async fn new_commission(db: &DatabaseConnection, course_id: Uuid) -> commission::Model {
    CommissionService::create(db, course_id, CommissionData::new("Comisión 1"))
        .await
        .unwrap()
}
