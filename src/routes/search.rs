use crate::{
    data::roster::Roster,
    maud_conveniences::{INPUT_CLASSES, form_element},
    routes::student_list::render_student_list,
    state::RosterState,
};
use axum::{Form, extract::State};
use maud::{Markup, html};
use serde::Deserialize;

pub fn render_search_box(term: &str) -> Markup {
    form_element(
        "search_term",
        "Search by Student ID or Name:",
        html! {
            input type="search" id="search_term" name="term" value=(term)
                hx-put="/internal/search" hx-trigger="input changed delay:150ms, search" hx-target="#search_results"
                class=(INPUT_CLASSES);
        },
    )
}

pub fn render_search_results(roster: &Roster) -> Markup {
    let mut results = roster.search_results().peekable();

    html! {
        @if results.peek().is_none() {
            p class="text-red-500 font-semibold" {"No results found."}
        } @else {
            (render_student_list(results))
        }
    }
}

#[derive(Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    term: String,
}

pub async fn internal_put_search(
    State(state): State<RosterState>,
    Form(SearchForm { term }): Form<SearchForm>,
) -> Markup {
    let mut roster = state.roster().await;
    roster.set_search_term(term);

    render_search_results(&roster)
}
