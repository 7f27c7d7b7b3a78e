pub mod draft;
pub mod picture;
pub mod roster;
pub mod student;
