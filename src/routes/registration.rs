use crate::{
    data::draft::Draft,
    error::RosterResult,
    maud_conveniences::title,
    routes::{
        index::render_app_swap,
        student_form::{read_draft_update, render_student_form},
    },
    state::RosterState,
};
use axum::extract::{Multipart, State};
use maud::{Markup, html};

pub fn render_registration_form(draft: &Draft) -> Markup {
    html! {
        div id="registration" class="md:w-1/2 w-full p-3 mx-auto" {
            (title("Student Registration Form"))
            (render_student_form(draft))
        }
    }
}

pub async fn internal_put_registration_draft(
    State(state): State<RosterState>,
    multipart: Multipart,
) -> RosterResult<Markup> {
    let update = read_draft_update(multipart).await?;
    state.roster().await.update_registration_draft(update);

    Ok(html! {})
}

pub async fn post_register(
    State(state): State<RosterState>,
    multipart: Multipart,
) -> RosterResult<Markup> {
    let update = read_draft_update(multipart).await?;

    let mut roster = state.roster().await;
    roster.update_registration_draft(update);
    roster.register()?;

    Ok(render_app_swap(&roster))
}
