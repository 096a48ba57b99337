use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create students table
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Students::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Students::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Students::LastName).string_len(150).not_null())
                    .col(ColumnDef::new(Students::Email).string_len(150))
                    .col(ColumnDef::new(Students::NationalId).integer().not_null())
                    .col(
                        ColumnDef::new(Students::EnrollmentNumber)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Students::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        // Create teachers table
        manager
            .create_table(
                Table::create()
                    .table(Teachers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Teachers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Teachers::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Teachers::LastName).string_len(150).not_null())
                    .col(ColumnDef::new(Teachers::Email).string_len(150))
                    .col(ColumnDef::new(Teachers::NationalId).integer().not_null())
                    .col(ColumnDef::new(Teachers::EmployeeId).string_len(10).not_null())
                    .col(
                        ColumnDef::new(Teachers::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        // Create categories table
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categories::Name).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Categories::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        // Create courses table
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Courses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Courses::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Courses::Description).text())
                    .col(ColumnDef::new(Courses::StartDate).date())
                    .col(ColumnDef::new(Courses::CoverImage).string())
                    .col(ColumnDef::new(Courses::CategoryId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-courses-category_id")
                            .from(Courses::Table, Courses::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create commissions table
        manager
            .create_table(
                Table::create()
                    .table(Commissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Commissions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Commissions::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Commissions::Schedule).string_len(100))
                    .col(ColumnDef::new(Commissions::MeetingLink).string_len(100))
                    .col(ColumnDef::new(Commissions::CourseId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-commissions-course_id")
                            .from(Commissions::Table, Commissions::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create enrollments junction table (students <-> commissions)
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrollments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Enrollments::CreatedOn).date().not_null())
                    .col(ColumnDef::new(Enrollments::StudentId).uuid().not_null())
                    .col(ColumnDef::new(Enrollments::CommissionId).uuid().not_null())
                    .col(
                        ColumnDef::new(Enrollments::Status)
                            .string_len(3)
                            .not_null()
                            .default("INS"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollments-student_id")
                            .from(Enrollments::Table, Enrollments::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollments-commission_id")
                            .from(Enrollments::Table, Enrollments::CommissionId)
                            .to(Commissions::Table, Commissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create languages lookup table
        manager
            .create_table(
                Table::create()
                    .table(Languages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Languages::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Languages::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Languages::Logo).string().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(Languages::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Commissions::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Teachers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Students {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    NationalId,
    EnrollmentNumber,
    Active,
}

#[derive(Iden)]
enum Teachers {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    NationalId,
    EmployeeId,
    Active,
}

#[derive(Iden)]
enum Categories {
    Table,
    Id,
    Name,
    Active,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
    Name,
    Description,
    StartDate,
    CoverImage,
    CategoryId,
}

#[derive(Iden)]
enum Commissions {
    Table,
    Id,
    Name,
    Schedule,
    MeetingLink,
    CourseId,
}

#[derive(Iden)]
enum Enrollments {
    Table,
    Id,
    CreatedOn,
    StudentId,
    CommissionId,
    Status,
}

#[derive(Iden)]
enum Languages {
    Table,
    Id,
    Name,
    Logo,
}
