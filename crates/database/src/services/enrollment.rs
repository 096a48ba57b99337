use crate::{
    entities::enrollment,
    error::{ModelError, Result},
};
use log::info;
use models::enrollment_status::EnrollmentStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Select,
};
use strum::EnumIter;
use uuid::Uuid;

/// Filtered views over the enrollments table
///
/// The three status views partition `All`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter)]
pub enum EnrollmentView {
    #[default]
    All,
    Enrolled,
    InProgress,
    Graduated,
}

impl EnrollmentView {
    /// The status this view is restricted to, `None` for `All`
    pub fn status(self) -> Option<EnrollmentStatus> {
        match self {
            Self::All => None,
            Self::Enrolled => Some(EnrollmentStatus::Enrolled),
            Self::InProgress => Some(EnrollmentStatus::InProgress),
            Self::Graduated => Some(EnrollmentStatus::Graduated),
        }
    }

    pub fn select(self) -> Select<enrollment::Entity> {
        let query = enrollment::Entity::find();
        match self.status() {
            Some(status) => query.filter(enrollment::Column::Status.eq(status)),
            None => query,
        }
    }
}

impl From<EnrollmentStatus> for EnrollmentView {
    fn from(status: EnrollmentStatus) -> Self {
        match status {
            EnrollmentStatus::Enrolled => Self::Enrolled,
            EnrollmentStatus::InProgress => Self::InProgress,
            EnrollmentStatus::Graduated => Self::Graduated,
        }
    }
}

pub struct EnrollmentService;

impl EnrollmentService {
    const ENTITY: &'static str = "enrollment";

    /// Creates an enrollment dated today
    pub async fn create(
        db: &DatabaseConnection,
        student_id: Uuid,
        commission_id: Uuid,
        status: EnrollmentStatus,
    ) -> Result<enrollment::Model> {
        let enrollment = enrollment::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_id: Set(student_id),
            commission_id: Set(commission_id),
            status: Set(status),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(
            "Enrolled student {student_id} in commission {commission_id} as {}",
            enrollment.status
        );
        Ok(enrollment)
    }

    pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<enrollment::Model> {
        enrollment::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ModelError::not_found(Self::ENTITY, id))
    }

    pub async fn list(
        db: &DatabaseConnection,
        view: EnrollmentView,
    ) -> Result<Vec<enrollment::Model>> {
        Ok(view
            .select()
            .order_by_asc(enrollment::Column::CreatedOn)
            .order_by_asc(enrollment::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn count(db: &DatabaseConnection, view: EnrollmentView) -> Result<u64> {
        Ok(view.select().count(db).await?)
    }

    pub async fn by_commission(
        db: &DatabaseConnection,
        commission_id: Uuid,
        view: EnrollmentView,
    ) -> Result<Vec<enrollment::Model>> {
        Ok(view
            .select()
            .filter(enrollment::Column::CommissionId.eq(commission_id))
            .order_by_asc(enrollment::Column::CreatedOn)
            .all(db)
            .await?)
    }

    /// Moves an enrollment to another status; the creation date is kept
    pub async fn set_status(
        db: &DatabaseConnection,
        id: Uuid,
        status: EnrollmentStatus,
    ) -> Result<enrollment::Model> {
        let mut enrollment: enrollment::ActiveModel = Self::get(db, id).await?.into();
        enrollment.status = Set(status);

        let enrollment = enrollment.update(db).await?;
        info!("Enrollment {id} is now {status}");
        Ok(enrollment)
    }

    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<()> {
        Self::get(db, id).await?.delete(db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        entities::commission,
        services::{commission::CommissionService, student::StudentService},
        test_utils::{
            new_category, new_commission, new_course, setup_db, student_data, temp_storage,
        },
    };
    use chrono::Utc;
    use sea_orm::DatabaseConnection;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    async fn commission(db: &DatabaseConnection) -> commission::Model {
        let (_dir, storage) = temp_storage();
        let category = new_category(db).await;
        let course = new_course(db, &storage, category.id).await;
        new_commission(db, course.id).await
    }

    #[tokio::test]
    async fn test_default_status_view_membership() {
        let db = setup_db().await;
        let commission = commission(&db).await;
        let student = StudentService::create(&db, student_data("Ana", "A-001"))
            .await
            .unwrap();

        let enrollment = CommissionService::enroll(&db, commission.id, student.id)
            .await
            .unwrap();
        assert_eq!(enrollment.status, EnrollmentStatus::Enrolled);
        assert_eq!(enrollment.created_on, Utc::now().date_naive());

        let ids = |models: Vec<enrollment::Model>| -> Vec<Uuid> {
            models.into_iter().map(|e| e.id).collect()
        };
        assert_eq!(
            ids(EnrollmentService::list(&db, EnrollmentView::Enrolled).await.unwrap()),
            vec![enrollment.id]
        );
        assert!(EnrollmentService::list(&db, EnrollmentView::InProgress).await.unwrap().is_empty());
        assert!(EnrollmentService::list(&db, EnrollmentView::Graduated).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_status_views_partition_all() {
        let db = setup_db().await;
        let commission = commission(&db).await;

        let statuses = [
            EnrollmentStatus::Enrolled,
            EnrollmentStatus::InProgress,
            EnrollmentStatus::InProgress,
            EnrollmentStatus::Graduated,
            EnrollmentStatus::Graduated,
            EnrollmentStatus::Graduated,
        ];
        for (idx, status) in statuses.into_iter().enumerate() {
            let student = StudentService::create(&db, student_data("Ana", &format!("A-{idx:03}")))
                .await
                .unwrap();
            EnrollmentService::create(&db, student.id, commission.id, status)
                .await
                .unwrap();
        }

        let all: HashSet<Uuid> = EnrollmentService::list(&db, EnrollmentView::All)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(all.len(), statuses.len());

        let mut seen = HashSet::new();
        for view in EnrollmentView::iter().filter(|view| *view != EnrollmentView::All) {
            let status = view.status().unwrap();
            let rows = EnrollmentService::list(&db, view).await.unwrap();

            assert!(rows.iter().all(|e| e.status == status));
            assert_eq!(
                rows.len(),
                statuses.iter().filter(|s| **s == status).count()
            );
            assert_eq!(
                EnrollmentService::count(&db, view).await.unwrap(),
                rows.len() as u64
            );
            for row in rows {
                // No row shows up in two views
                assert!(seen.insert(row.id));
            }
        }
        assert_eq!(seen, all);
    }

    #[tokio::test]
    async fn test_set_status_moves_between_views() {
        let db = setup_db().await;
        let commission = commission(&db).await;
        let student = StudentService::create(&db, student_data("Ana", "A-001"))
            .await
            .unwrap();
        let enrollment = CommissionService::enroll(&db, commission.id, student.id)
            .await
            .unwrap();

        let updated = EnrollmentService::set_status(&db, enrollment.id, EnrollmentStatus::Graduated)
            .await
            .unwrap();
        assert_eq!(updated.created_on, enrollment.created_on);

        assert_eq!(
            EnrollmentService::count(&db, EnrollmentView::Enrolled).await.unwrap(),
            0
        );
        assert_eq!(
            EnrollmentService::count(&db, EnrollmentStatus::Graduated.into())
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            EnrollmentService::by_commission(&db, commission.id, EnrollmentView::Graduated)
                .await
                .unwrap(),
            vec![updated]
        );
    }

    #[tokio::test]
    async fn test_delete() {
        let db = setup_db().await;
        let commission = commission(&db).await;
        let student = StudentService::create(&db, student_data("Ana", "A-001"))
            .await
            .unwrap();
        let enrollment = CommissionService::enroll(&db, commission.id, student.id)
            .await
            .unwrap();

        EnrollmentService::delete(&db, enrollment.id).await.unwrap();
        assert_eq!(
            EnrollmentService::count(&db, EnrollmentView::All).await.unwrap(),
            0
        );
        // Removing the enrollment leaves both sides in place
        assert!(StudentService::get(&db, student.id).await.is_ok());
        assert!(CommissionService::get(&db, commission.id).await.is_ok());
    }
}
