use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Projects::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Projects::Name).string_len(100).not_null())
                    // Derived from year and name on every save
                    .col(
                        ColumnDef::new(Projects::Slug)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Projects::Year).integer().not_null())
                    .col(ColumnDef::new(Projects::Description).text())
                    .col(ColumnDef::new(Projects::Url).string_len(100).not_null())
                    .col(ColumnDef::new(Projects::CoverImage).string())
                    .col(ColumnDef::new(Projects::StudentId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-projects-student_id")
                            .from(Projects::Table, Projects::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Students {
    Table,
    Id,
}

#[derive(Iden)]
enum Projects {
    Table,
    Id,
    Name,
    Slug,
    Year,
    Description,
    Url,
    CoverImage,
    StudentId,
}
