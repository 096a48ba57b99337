use crate::{
    slug::slugify,
    validation::{NAME_MAX, SLUG_MAX, URL_MAX, ValidationError, max_len, required_max_len},
};
use serde::{Deserialize, Serialize};

/// Builds the slug a project is stored under
pub fn project_slug(year: i32, name: &str) -> String {
    slugify(&format!("{year}-{name}"))
}

/// Fields written when creating or updating a student project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectData {
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub url: String,
}

impl ProjectData {
    pub fn slug(&self) -> String {
        project_slug(self.year, &self.name)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        required_max_len("name", &self.name, NAME_MAX)?;
        required_max_len("url", &self.url, URL_MAX)?;
        max_len("slug", &self.slug(), SLUG_MAX)
    }
}
