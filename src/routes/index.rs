use crate::{
    data::roster::Roster,
    maud_conveniences::subtitle,
    routes::{
        edit::render_edit_form,
        registration::render_registration_form,
        search::{render_search_box, render_search_results},
        student_list::render_student_list,
    },
    state::RosterState,
};
use axum::extract::State;
use maud::{Markup, html};

pub async fn get_index(State(state): State<RosterState>) -> Markup {
    let roster = state.roster().await;

    state.render(html! {
        div id="alerts" class="w-full max-w-4xl" {}
        (render_app(&roster))
    })
}

pub fn render_app(roster: &Roster) -> Markup {
    html! {
        div id="app" class="w-full max-w-4xl flex flex-col space-y-8" {
            (render_registration_form(roster.registration_draft()))

            div class="bg-gray-800 p-4 rounded shadow-md" {
                (render_search_box(roster.search_term()))

                (subtitle("Search Results"))
                div id="search_results" {
                    (render_search_results(roster))
                }
            }

            div class="bg-gray-800 p-4 rounded shadow-md" {
                div class="flex flex-row items-center justify-between" {
                    (subtitle("Registered Students"))
                    a href="/students.csv" class="bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded" {
                        "Download as CSV"
                    }
                }
                (render_student_list(roster.students()))

                @if let (Some(target), Some(draft)) = (roster.edit_target(), roster.edit_draft()) {
                    (render_edit_form(target, draft))
                }
            }
        }
    }
}

///what every successful operation sends back: the fresh app, plus an out-of-band wipe of any old alert
pub fn render_app_swap(roster: &Roster) -> Markup {
    html! {
        (render_app(roster))
        div id="alerts" hx-swap-oob="true" class="w-full max-w-4xl" {}
    }
}
