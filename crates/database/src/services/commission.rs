use crate::{
    entities::{commission, course, enrollment, student},
    error::{ModelError, Result},
    services::enrollment::EnrollmentService,
};
use log::info;
use models::{catalog::CommissionData, enrollment_status::EnrollmentStatus};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

pub struct CommissionService;

impl CommissionService {
    const ENTITY: &'static str = "commission";

    pub async fn create(
        db: &DatabaseConnection,
        course_id: Uuid,
        data: CommissionData,
    ) -> Result<commission::Model> {
        data.validate()?;

        let commission = commission::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(data.name),
            schedule: Set(data.schedule),
            meeting_link: Set(data.meeting_link),
            course_id: Set(course_id),
        }
        .insert(db)
        .await?;

        info!("Created commission {}", commission.name);
        Ok(commission)
    }

    pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<commission::Model> {
        commission::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ModelError::not_found(Self::ENTITY, id))
    }

    /// "{course} - {commission}" label for a commission
    pub async fn label(db: &DatabaseConnection, id: Uuid) -> Result<String> {
        let (commission, course) = commission::Entity::find_by_id(id)
            .find_also_related(course::Entity)
            .one(db)
            .await?
            .ok_or_else(|| ModelError::not_found(Self::ENTITY, id))?;

        let course = course.ok_or_else(|| ModelError::not_found("course", commission.course_id))?;
        Ok(commission.label(&course))
    }

    pub async fn list(db: &DatabaseConnection) -> Result<Vec<commission::Model>> {
        Ok(commission::Entity::find()
            .order_by_asc(commission::Column::Name)
            .all(db)
            .await?)
    }

    pub async fn count(db: &DatabaseConnection) -> Result<u64> {
        Ok(commission::Entity::find().count(db).await?)
    }

    pub async fn by_course(
        db: &DatabaseConnection,
        course_id: Uuid,
    ) -> Result<Vec<commission::Model>> {
        Ok(commission::Entity::find()
            .filter(commission::Column::CourseId.eq(course_id))
            .order_by_asc(commission::Column::Name)
            .all(db)
            .await?)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        data: CommissionData,
    ) -> Result<commission::Model> {
        data.validate()?;

        let mut commission: commission::ActiveModel = Self::get(db, id).await?.into();
        commission.name = Set(data.name);
        commission.schedule = Set(data.schedule);
        commission.meeting_link = Set(data.meeting_link);

        Ok(commission.update(db).await?)
    }

    /// Deletes the commission and its enrollments
    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<()> {
        Self::get(db, id).await?.delete(db).await?;

        info!("Deleted commission {id}");
        Ok(())
    }

    /// Signs a student up with the default status
    pub async fn enroll(
        db: &DatabaseConnection,
        commission_id: Uuid,
        student_id: Uuid,
    ) -> Result<enrollment::Model> {
        EnrollmentService::create(db, student_id, commission_id, EnrollmentStatus::default()).await
    }

    /// Students enrolled in the commission, whatever the enrollment status
    pub async fn students(
        db: &DatabaseConnection,
        commission_id: Uuid,
    ) -> Result<Vec<student::Model>> {
        let commission = Self::get(db, commission_id).await?;

        Ok(commission
            .find_related(student::Entity)
            .order_by_asc(student::Column::LastName)
            .order_by_asc(student::Column::FirstName)
            .all(db)
            .await?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        services::student::StudentService,
        test_utils::{new_category, new_course, setup_db, student_data, temp_storage},
    };

    #[tokio::test]
    async fn test_create_and_label() {
        let db = setup_db().await;
        let (_dir, storage) = temp_storage();
        let category = new_category(&db).await;
        let course = new_course(&db, &storage, category.id).await;

        let data = CommissionData {
            name: "Comisión 23654".to_string(),
            schedule: Some("Lun/Mié 18:00-21:00".to_string()),
            meeting_link: Some("https://meet.example.com/abc-defg-hij".to_string()),
        };
        let commission = CommissionService::create(&db, course.id, data).await.unwrap();

        assert_eq!(
            CommissionService::label(&db, commission.id).await.unwrap(),
            format!("{} - Comisión 23654", course.name)
        );
        assert_eq!(
            CommissionService::by_course(&db, course.id).await.unwrap(),
            vec![commission]
        );
    }

    #[tokio::test]
    async fn test_enroll_and_students() {
        let db = setup_db().await;
        let (_dir, storage) = temp_storage();
        let category = new_category(&db).await;
        let course = new_course(&db, &storage, category.id).await;
        let commission = CommissionService::create(&db, course.id, CommissionData::new("C1"))
            .await
            .unwrap();

        let ana = StudentService::create(&db, student_data("Ana", "A-001"))
            .await
            .unwrap();
        let luis = StudentService::create(&db, student_data("Luis", "A-002"))
            .await
            .unwrap();
        StudentService::create(&db, student_data("Sol", "A-003"))
            .await
            .unwrap();

        let enrollment = CommissionService::enroll(&db, commission.id, ana.id)
            .await
            .unwrap();
        assert_eq!(enrollment.status, EnrollmentStatus::Enrolled);
        CommissionService::enroll(&db, commission.id, luis.id)
            .await
            .unwrap();

        let students = CommissionService::students(&db, commission.id)
            .await
            .unwrap();
        assert_eq!(students, vec![ana, luis]);
    }

    #[tokio::test]
    async fn test_enroll_unknown_student() {
        let db = setup_db().await;
        let (_dir, storage) = temp_storage();
        let category = new_category(&db).await;
        let course = new_course(&db, &storage, category.id).await;
        let commission = CommissionService::create(&db, course.id, CommissionData::new("C1"))
            .await
            .unwrap();

        let err = CommissionService::enroll(&db, commission.id, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::ForeignKeyViolation(_)));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = setup_db().await;
        let (_dir, storage) = temp_storage();
        let category = new_category(&db).await;
        let course = new_course(&db, &storage, category.id).await;
        let commission = CommissionService::create(&db, course.id, CommissionData::new("C1"))
            .await
            .unwrap();

        let mut data = CommissionData::new("C1 noche");
        data.schedule = Some("Mar/Jue 19:00".to_string());
        let updated = CommissionService::update(&db, commission.id, data)
            .await
            .unwrap();
        assert_eq!(updated.name, "C1 noche");
        assert_eq!(updated.course_id, course.id);

        CommissionService::delete(&db, commission.id).await.unwrap();
        assert_eq!(CommissionService::count(&db).await.unwrap(), 0);
    }
}
