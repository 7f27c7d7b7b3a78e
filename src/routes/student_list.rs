use crate::{
    data::student::{Student, StudentKey},
    routes::index::render_app_swap,
    state::RosterState,
};
use axum::extract::{Path, State};
use maud::{Markup, html};

pub fn render_student_list<'a>(students: impl IntoIterator<Item = &'a Student>) -> Markup {
    html! {
        ul class="flex flex-col space-y-2" {
            @for student in students {
                li class="bg-gray-700 rounded-lg shadow-md p-3 flex flex-row items-center justify-between" {
                    div class="flex flex-col space-y-2" {
                        p class="font-semibold" {(student)}
                        @if let Some(pic) = &student.pic {
                            img src=(pic.display()) alt={"Student " (student.student_id)} style="max-width: 100px; max-height: 100px;";
                        }
                    }
                    div class="flex flex-row space-x-2" {
                        button class="bg-yellow-600 hover:bg-yellow-800 font-bold py-1 px-3 rounded" hx-post={"/students/" (student.key) "/edit"} hx-target="#app" hx-swap="outerHTML" {
                            "Edit"
                        }
                        button class="bg-red-600 hover:bg-red-800 font-bold py-1 px-3 rounded" hx-delete={"/students/" (student.key)} hx-target="#app" hx-swap="outerHTML" {
                            "Delete"
                        }
                    }
                }
            }
        }
    }
}

pub async fn delete_student(
    State(state): State<RosterState>,
    Path(key): Path<StudentKey>,
) -> Markup {
    let mut roster = state.roster().await;
    roster.delete(&key);

    render_app_swap(&roster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::RuntimeConfiguration, data::roster::Roster};

    #[test]
    fn rows_carry_their_key_in_both_buttons() {
        let roster = Roster::with_demo_students();
        let rendered = render_student_list(roster.students()).into_string();

        assert!(rendered.contains("hx-post=\"/students/2/edit\""));
        assert!(rendered.contains("hx-delete=\"/students/2\""));
        assert!(!rendered.contains("<img"));
    }

    #[tokio::test]
    async fn deleting_drops_the_row() {
        let state = RosterState::new(RuntimeConfiguration::default());

        let rendered = delete_student(State(state.clone()), Path(StudentKey::from("2")))
            .await
            .into_string();

        assert!(!rendered.contains("Jane"));
        assert!(rendered.contains("Billy (ID: 123)"));
        assert_eq!(state.roster().await.students().len(), 3);
    }
}
