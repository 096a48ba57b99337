pub mod category;
pub mod commission;
pub mod course;
pub mod enrollment;
pub mod language;
pub mod project;
pub mod student;
pub mod teacher;
