pub mod edit;
pub mod export;
pub mod index;
pub mod registration;
pub mod search;
pub mod student_form;
pub mod student_list;
