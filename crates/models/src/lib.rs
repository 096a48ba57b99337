pub mod catalog;
pub mod enrollment_status;
pub mod person;
pub mod project;
pub mod slug;
pub mod validation;
