use models::project::project_slug;
use sea_orm::{
    ActiveValue::{Set, Unchanged},
    ConnectionTrait,
    entity::prelude::*,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    /// Always `slugify("{year}-{name}")`, rewritten on every save
    #[sea_orm(unique)]
    pub slug: String,
    pub year: i32,
    pub description: Option<String>,
    pub url: String,
    pub cover_image: Option<String>,
    pub student_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        // A partial update may leave year or name out; take them from the stored row
        if !insert && (self.year.is_not_set() || self.name.is_not_set()) {
            if let Some(id) = self.id.try_as_ref() {
                if let Some(current) = Entity::find_by_id(*id).one(db).await? {
                    if self.year.is_not_set() {
                        self.year = Unchanged(current.year);
                    }
                    if self.name.is_not_set() {
                        self.name = Unchanged(current.name);
                    }
                }
            }
        }

        let slug = match (&self.year, &self.name) {
            (Set(year) | Unchanged(year), Set(name) | Unchanged(name)) => {
                Some(project_slug(*year, name))
            }
            _ => None,
        };

        if let Some(slug) = slug {
            self.slug = Set(slug);
        }

        Ok(self)
    }
}
