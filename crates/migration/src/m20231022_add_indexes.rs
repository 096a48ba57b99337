use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

impl Migration {
    /// Foreign-key columns and the columns the filtered views select on
    fn indexes() -> Vec<(&'static str, IndexCreateStatement)> {
        vec![
            (
                "idx_teachers_active",
                Index::create()
                    .table(Teachers::Table)
                    .col(Teachers::Active)
                    .to_owned(),
            ),
            (
                "idx_courses_category_id",
                Index::create()
                    .table(Courses::Table)
                    .col(Courses::CategoryId)
                    .to_owned(),
            ),
            (
                "idx_commissions_course_id",
                Index::create()
                    .table(Commissions::Table)
                    .col(Commissions::CourseId)
                    .to_owned(),
            ),
            (
                "idx_enrollments_student_id",
                Index::create()
                    .table(Enrollments::Table)
                    .col(Enrollments::StudentId)
                    .to_owned(),
            ),
            (
                "idx_enrollments_commission_id",
                Index::create()
                    .table(Enrollments::Table)
                    .col(Enrollments::CommissionId)
                    .to_owned(),
            ),
            (
                "idx_enrollments_status",
                Index::create()
                    .table(Enrollments::Table)
                    .col(Enrollments::Status)
                    .to_owned(),
            ),
            (
                "idx_projects_student_id",
                Index::create()
                    .table(Projects::Table)
                    .col(Projects::StudentId)
                    .to_owned(),
            ),
        ]
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, mut index) in Self::indexes() {
            manager.create_index(index.name(name).to_owned()).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop indexes in reverse order
        for (name, _) in Self::indexes().into_iter().rev() {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(Iden)]
enum Teachers {
    Table,
    Active,
}

#[derive(Iden)]
enum Courses {
    Table,
    CategoryId,
}

#[derive(Iden)]
enum Commissions {
    Table,
    CourseId,
}

#[derive(Iden)]
enum Enrollments {
    Table,
    StudentId,
    CommissionId,
    Status,
}

#[derive(Iden)]
enum Projects {
    Table,
    StudentId,
}
