use crate::data::picture::Picture;
use maud::{Markup, Render, html};
use serde::Deserialize;
use std::fmt::{Display, Formatter};

///the collection-assigned `_id`, distinct from the `student_id` people type in
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct StudentKey(String);

impl StudentKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for StudentKey {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for StudentKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Display for StudentKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Render for StudentKey {
    fn render_to(&self, buffer: &mut String) {
        self.0.render_to(buffer);
    }
}

#[derive(Clone, Debug)]
pub struct Student {
    pub key: StudentKey,
    pub student_id: String,
    pub name: String,
    pub pic: Option<Picture>,
    pub is_editing: bool,
    pub(super) revision: u64,
}

impl Student {
    ///`student_id` matches case-sensitively, `name` ignores case
    pub fn matches_search(&self, term: &str) -> bool {
        self.student_id.contains(term) || self.name.to_lowercase().contains(&term.to_lowercase())
    }
}

impl Render for Student {
    fn render(&self) -> Markup {
        html! {
            (self.name) " (ID: " (self.student_id) ")"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(student_id: &str, name: &str) -> Student {
        Student {
            key: StudentKey::from(1),
            student_id: student_id.to_string(),
            name: name.to_string(),
            pic: None,
            is_editing: false,
            revision: 0,
        }
    }

    #[test]
    fn student_id_is_a_case_sensitive_substring_match() {
        let s = student("AB-199", "Billy");
        assert!(s.matches_search("99"));
        assert!(s.matches_search("AB"));
        assert!(!s.matches_search("ab-"));
    }

    #[test]
    fn name_match_ignores_case() {
        let s = student("456", "Jane");
        assert!(s.matches_search("jane"));
        assert!(s.matches_search("AN"));
        assert!(!s.matches_search("jo"));
    }

    #[test]
    fn empty_term_matches_everyone() {
        assert!(student("", "").matches_search(""));
    }

    #[test]
    fn renders_name_then_id() {
        assert_eq!(
            student("123", "Billy").render().into_string(),
            "Billy (ID: 123)"
        );
    }
}
