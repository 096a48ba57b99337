pub use sea_orm_migration::prelude::*;

mod m20231020_create_all_tables;
mod m20231021_create_projects_table;
mod m20231022_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20231020_create_all_tables::Migration),
            Box::new(m20231021_create_projects_table::Migration),
            Box::new(m20231022_add_indexes::Migration),
        ]
    }
}
