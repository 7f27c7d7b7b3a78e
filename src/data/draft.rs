use crate::{
    data::{picture::Picture, student::Student},
    error::{MissingRequiredFieldSnafu, RosterResult},
};
use bitflags::bitflags;

bitflags! {
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub struct MissingFields: u8 {
        const STUDENT_ID = 0b0000_0001;
        const NAME =       0b0000_0010;
        const PICTURE =    0b0000_0100;
    }
}

impl MissingFields {
    pub fn as_nice_list(&self) -> impl Iterator<Item = &'static str> {
        self.iter().filter_map(|x| match x {
            Self::STUDENT_ID => Some("Student ID was empty"),
            Self::NAME => Some("Name was empty"),
            Self::PICTURE => Some("No picture was uploaded"),
            _ => None,
        })
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FormMode {
    Register,
    Save,
}

impl FormMode {
    pub const fn submit_label(self) -> &'static str {
        match self {
            Self::Register => "Register",
            Self::Save => "Save",
        }
    }
}

///unsaved form values, either for a registration or for an edit
///
///`round` is echoed back by the rendered form, so updates from a form that has since been
///submitted or re-seeded can be told apart from current ones
#[derive(Clone, Debug, Default)]
pub struct Draft {
    pub student_id: String,
    pub name: String,
    pub pic: Option<Picture>,
    pub is_editing: bool,
    pub round: u64,
}

///whatever fields a form sent back; `None` means "leave as is"
#[derive(Clone, Debug, Default)]
pub struct DraftUpdate {
    pub student_id: Option<String>,
    pub name: Option<String>,
    pub pic: Option<Picture>,
    pub round: u64,
}

impl Draft {
    pub fn seeded_from(student: &Student) -> Self {
        Self {
            student_id: student.student_id.clone(),
            name: student.name.clone(),
            pic: student.pic.clone(),
            is_editing: true,
            round: student.revision,
        }
    }

    ///an empty registration draft for the form rendered after `previous` was submitted
    pub fn after(previous: &Self) -> Self {
        Self {
            round: previous.round + 1,
            ..Self::default()
        }
    }

    pub const fn mode(&self) -> FormMode {
        if self.is_editing {
            FormMode::Save
        } else {
            FormMode::Register
        }
    }

    ///pictures are only demanded for registrations
    pub fn missing_fields(&self) -> MissingFields {
        let mut missing = MissingFields::empty();
        if self.student_id.trim().is_empty() {
            missing |= MissingFields::STUDENT_ID;
        }
        if self.name.trim().is_empty() {
            missing |= MissingFields::NAME;
        }
        if self.pic.is_none() && self.mode() == FormMode::Register {
            missing |= MissingFields::PICTURE;
        }
        missing
    }

    pub fn validate(&self) -> RosterResult<()> {
        let missing = self.missing_fields();
        snafu::ensure!(missing.is_empty(), MissingRequiredFieldSnafu { missing });
        Ok(())
    }

    ///the student ID is read-only while editing, so edits never change it
    ///
    ///returns `false` (and changes nothing) for an update sent by an older form
    pub fn apply(
        &mut self,
        DraftUpdate {
            student_id,
            name,
            pic,
            round,
        }: DraftUpdate,
    ) -> bool {
        if round != self.round {
            debug!(current = self.round, sent = round, "Dropping draft update from a stale form");
            return false;
        }

        if let Some(student_id) = student_id {
            if self.is_editing {
                if student_id != self.student_id {
                    warn!(kept = %self.student_id, sent = %student_id, "Ignoring student ID change while editing");
                }
            } else {
                self.student_id = student_id;
            }
        }
        if let Some(name) = name {
            self.name = name;
        }
        if pic.is_some() {
            self.pic = pic;
        }
        true
    }
}
