use crate::{
    data::{
        draft::Draft,
        student::{Student, StudentKey},
    },
    error::RosterResult,
    maud_conveniences::subtitle,
    routes::{
        index::render_app_swap,
        student_form::{read_draft_update, render_student_form},
    },
    state::RosterState,
};
use axum::extract::{Multipart, Path, State};
use maud::{Markup, html};

pub fn render_edit_form(target: &Student, draft: &Draft) -> Markup {
    html! {
        div id="edit_form" class="mt-8" {
            (subtitle("Edit Student"))
            p class="text-sm italic text-gray-400" {"Editing record #" (target.key)}
            (render_student_form(draft))
        }
    }
}

pub async fn post_begin_edit(
    State(state): State<RosterState>,
    Path(key): Path<StudentKey>,
) -> Markup {
    let mut roster = state.roster().await;
    roster.begin_edit(&key);

    render_app_swap(&roster)
}

pub async fn internal_put_edit_draft(
    State(state): State<RosterState>,
    multipart: Multipart,
) -> RosterResult<Markup> {
    let update = read_draft_update(multipart).await?;
    state.roster().await.update_edit_draft(update);

    Ok(html! {})
}

pub async fn internal_post_save_edit(
    State(state): State<RosterState>,
    multipart: Multipart,
) -> RosterResult<Markup> {
    let update = read_draft_update(multipart).await?;

    let mut roster = state.roster().await;
    roster.update_edit_draft(update);
    roster.submit_edit()?;

    Ok(render_app_swap(&roster))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::RuntimeConfiguration,
        error::RosterError,
        data::picture::PNG_MAGIC,
        routes::student_form::test_support::{Part, multipart},
    };

    async fn edit_round(state: &RosterState) -> String {
        state.roster().await.edit_draft().unwrap().round.to_string()
    }

    #[tokio::test]
    async fn begin_edit_then_save() {
        let state = RosterState::new(RuntimeConfiguration::default());

        let rendered = post_begin_edit(State(state.clone()), Path(StudentKey::from("3")))
            .await
            .into_string();
        assert!(rendered.contains("Edit Student"));
        assert!(rendered.contains("value=\"Schdimt\""));

        let round = edit_round(&state).await;
        let form = multipart(&[
            Part::Text("round", &round),
            Part::Text("student_id", "000"),
            Part::Text("name", "Schmidt"),
        ])
        .await;
        let rendered = internal_post_save_edit(State(state.clone()), form)
            .await
            .unwrap()
            .into_string();
        assert!(rendered.contains("Schmidt (ID: 789)"));
        assert!(!rendered.contains("Edit Student"));

        let roster = state.roster().await;
        let schmidt = &roster.students()[2];
        assert_eq!(schmidt.key.as_str(), "3");
        assert!(roster.students().iter().all(|s| !s.is_editing));
    }

    #[tokio::test]
    async fn blank_name_keeps_the_edit_open() {
        let state = RosterState::new(RuntimeConfiguration::default());
        post_begin_edit(State(state.clone()), Path(StudentKey::from("1"))).await;

        let round = edit_round(&state).await;
        let form = multipart(&[Part::Text("round", &round), Part::Text("name", "   ")]).await;
        let err = internal_post_save_edit(State(state.clone()), form)
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::MissingRequiredField { .. }));

        let roster = state.roster().await;
        assert_eq!(roster.students()[0].name, "Billy");
        assert_eq!(roster.edit_target().map(|s| s.key.as_str()), Some("1"));
    }

    #[tokio::test]
    async fn picture_sent_as_a_draft_change_is_saved() {
        let state = RosterState::new(RuntimeConfiguration::default());
        post_begin_edit(State(state.clone()), Path(StudentKey::from("2"))).await;
        let round = edit_round(&state).await;

        let change = multipart(&[
            Part::Text("round", &round),
            Part::File {
                name: "pic",
                file_name: "jane.png",
                content_type: "image/png",
                bytes: PNG_MAGIC,
            },
        ])
        .await;
        internal_put_edit_draft(State(state.clone()), change)
            .await
            .unwrap();
        assert!(state.roster().await.edit_draft().unwrap().pic.is_some());

        let save = multipart(&[
            Part::Text("round", &round),
            Part::Text("student_id", "456"),
            Part::Text("name", "Jane"),
            Part::File {
                name: "pic",
                file_name: "",
                content_type: "application/octet-stream",
                bytes: &[],
            },
        ])
        .await;
        let rendered = internal_post_save_edit(State(state.clone()), save)
            .await
            .unwrap()
            .into_string();
        assert!(rendered.contains("alt=\"Student 456\""));

        let roster = state.roster().await;
        let jane = &roster.students()[1];
        assert_eq!(jane.pic.as_ref().and_then(|p| p.file_name()), Some("jane.png"));
        assert!(roster.edit_draft().is_none());
    }

    #[tokio::test]
    async fn edit_draft_changes_without_a_target_are_ignored() {
        let state = RosterState::new(RuntimeConfiguration::default());

        let change = multipart(&[Part::Text("name", "Ghost")]).await;
        internal_put_edit_draft(State(state.clone()), change)
            .await
            .unwrap();

        let roster = state.roster().await;
        assert!(roster.edit_draft().is_none());
        assert!(roster.students().iter().all(|s| s.name != "Ghost"));
    }
}
