use crate::{
    data::{
        draft::{Draft, DraftUpdate},
        picture::Picture,
        student::{Student, StudentKey},
    },
    error::{DuplicateIdentifierSnafu, RosterResult},
};

const DEMO_STUDENTS: [(&str, &str); 4] = [
    ("123", "Billy"),
    ("456", "Jane"),
    ("789", "Schdimt"),
    ("101", "Jonas"),
];

///the edit form's own copy of the target, plus which version of the target it was copied from
#[derive(Debug, Default)]
struct EditForm {
    seeded_from: Option<(StudentKey, u64)>,
    draft: Draft,
}

///everything the page shows, owned in one place
///
///every mutation goes through one of the named operations, each of which finishes by
///re-syncing the edit form
#[derive(Debug)]
pub struct Roster {
    students: Vec<Student>,
    next_key: u64,
    next_revision: u64,
    registration: Draft,
    search_term: String,
    edit_form: EditForm,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            students: vec![],
            next_key: 1,
            next_revision: 0,
            registration: Draft::default(),
            search_term: String::new(),
            edit_form: EditForm::default(),
        }
    }
}

impl Roster {
    pub fn with_demo_students() -> Self {
        let mut roster = Self::default();
        for (student_id, name) in DEMO_STUDENTS {
            roster.insert(student_id.to_string(), name.to_string(), None);
        }
        roster.sync_edit_form();
        roster
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn registration_draft(&self) -> &Draft {
        &self.registration
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    ///derived from the students and the term on every call, in collection order
    pub fn search_results(&self) -> impl Iterator<Item = &Student> {
        let term = self.search_term.as_str();
        self.students
            .iter()
            .filter(move |student| student.matches_search(term))
    }

    pub fn edit_target(&self) -> Option<&Student> {
        self.students.iter().find(|student| student.is_editing)
    }

    ///only `Some` while there is something being edited
    pub fn edit_draft(&self) -> Option<&Draft> {
        self.edit_form
            .seeded_from
            .as_ref()
            .map(|_| &self.edit_form.draft)
    }

    pub fn update_registration_draft(&mut self, update: DraftUpdate) -> bool {
        self.registration.apply(update)
    }

    ///fails without touching anything if the draft is incomplete or the student ID is taken
    pub fn register(&mut self) -> RosterResult<StudentKey> {
        self.registration.validate()?;

        let student_id = &self.registration.student_id;
        snafu::ensure!(
            !self.students.iter().any(|s| &s.student_id == student_id),
            DuplicateIdentifierSnafu {
                student_id: student_id.clone()
            }
        );

        let next = Draft::after(&self.registration);
        let Draft {
            student_id,
            name,
            pic,
            ..
        } = std::mem::replace(&mut self.registration, next);
        let key = self.insert(student_id, name, pic);
        info!(%key, count = self.students.len(), "Registered student");

        self.sync_edit_form();
        Ok(key)
    }

    ///flags `key` as the only edit target; an unknown key leaves nobody flagged
    pub fn begin_edit(&mut self, key: &StudentKey) -> bool {
        let revision = self.bump_revision();
        let mut found = false;
        for student in &mut self.students {
            student.is_editing = &student.key == key;
            if student.is_editing {
                student.revision = revision;
                found = true;
            }
        }

        if found {
            debug!(%key, "Began editing student");
        } else {
            warn!(%key, "Tried to edit a student that doesn't exist");
        }

        self.sync_edit_form();
        found
    }

    pub fn update_edit_draft(&mut self, update: DraftUpdate) -> bool {
        if self.edit_form.seeded_from.is_none() {
            debug!("No edit target, ignoring edit draft update");
            return false;
        }
        self.edit_form.draft.apply(update)
    }

    ///validates the edit form's draft, saves it over the target and empties the form
    pub fn submit_edit(&mut self) -> RosterResult<()> {
        if self.edit_form.seeded_from.is_none() {
            debug!("No edit target, ignoring edit submission");
            return Ok(());
        }

        self.edit_form.draft.validate()?;

        let draft = std::mem::take(&mut self.edit_form.draft);
        self.save_edit(draft);
        Ok(())
    }

    ///overwrites whichever student is flagged (keeping its key), then clears every flag
    pub fn save_edit(&mut self, draft: Draft) {
        let revision = self.bump_revision();
        if let Some(student) = self.students.iter_mut().find(|s| s.is_editing) {
            let Draft {
                student_id,
                name,
                pic,
                ..
            } = draft;
            student.student_id = student_id;
            student.name = name;
            student.pic = pic;
            student.revision = revision;
            info!(key = %student.key, "Saved student edit");
        } else {
            debug!("No student flagged for editing, nothing saved");
        }

        for student in &mut self.students {
            student.is_editing = false;
        }

        self.sync_edit_form();
    }

    pub fn delete(&mut self, key: &StudentKey) -> bool {
        let before = self.students.len();
        self.students.retain(|student| &student.key != key);
        let removed = self.students.len() != before;

        if removed {
            info!(%key, count = self.students.len(), "Deleted student");
        } else {
            warn!(%key, "Tried to delete a student that doesn't exist");
        }

        self.sync_edit_form();
        removed
    }

    pub fn set_search_term(&mut self, term: String) {
        self.search_term = term;
    }

    fn insert(&mut self, student_id: String, name: String, pic: Option<Picture>) -> StudentKey {
        let key = StudentKey::from(self.next_key);
        self.next_key += 1;
        let revision = self.bump_revision();

        self.students.push(Student {
            key: key.clone(),
            student_id,
            name,
            pic,
            is_editing: false,
            revision,
        });
        key
    }

    fn bump_revision(&mut self) -> u64 {
        self.next_revision += 1;
        self.next_revision
    }

    //a new target (or a new version of the same one) throws away whatever was typed into the edit form
    fn sync_edit_form(&mut self) {
        match self.students.iter().find(|student| student.is_editing) {
            Some(target) => {
                let seed = (target.key.clone(), target.revision);
                if self.edit_form.seeded_from.as_ref() != Some(&seed) {
                    self.edit_form = EditForm {
                        draft: Draft::seeded_from(target),
                        seeded_from: Some(seed),
                    };
                }
            }
            None => self.edit_form = EditForm::default(),
        }
    }
}
