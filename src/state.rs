use crate::{config::RuntimeConfiguration, data::roster::Roster};
use maud::{DOCTYPE, Markup, html};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

const HTMX_CONFIG: &str = r#"{"responseHandling":[{"code":"204","swap":false},{"code":"[23]..","swap":true},{"code":"[45]..","swap":true,"error":true},{"code":"...","swap":false}]}"#;

#[derive(Clone, Debug)]
pub struct RosterState {
    roster: Arc<Mutex<Roster>>,
    config: RuntimeConfiguration,
}

impl RosterState {
    pub fn new(config: RuntimeConfiguration) -> Self {
        let roster = if config.seed_demo_students() {
            Roster::with_demo_students()
        } else {
            Roster::default()
        };

        Self {
            roster: Arc::new(Mutex::new(roster)),
            config,
        }
    }

    ///handlers take this once, do one operation, render, and let go
    pub async fn roster(&self) -> MutexGuard<'_, Roster> {
        self.roster.lock().await
    }

    pub const fn config(&self) -> &RuntimeConfiguration {
        &self.config
    }

    #[allow(clippy::unused_self, clippy::needless_pass_by_value)] //in case self is ever needed :), and to allow direct html! usage
    pub fn render(&self, markup: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    //swap error bodies too, they are alerts retargeted at #alerts
                    meta name="htmx-config" content=(HTMX_CONFIG) {}
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { "Student Roster" }
                }
                body class="bg-gray-900 min-h-screen flex flex-col items-center text-white font-mono p-8" {
                    (markup)
                }
            }
        }
    }

    pub async fn sensible_shutdown(&self) {
        let count = self.roster().await.students().len();
        warn!(count, "Discarding in-memory students");
    }
}
