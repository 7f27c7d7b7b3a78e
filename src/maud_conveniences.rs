use maud::{Markup, Render, html};

pub const INPUT_CLASSES: &str = "shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600 read-only:text-gray-400";
pub const FILE_INPUT_CLASSES: &str = "block w-full text-sm text-gray-300 file:mr-4 file:py-2 file:px-4 file:rounded file:border-0 file:text-sm file:font-semibold file:bg-violet-50 file:text-violet-700 hover:file:bg-violet-100";

pub fn title(s: impl Render) -> Markup {
    html! {
        h1 class="text-2xl font-semibold mb-4 text-blue-400" {(s)}
    }
}

pub fn subtitle(s: impl Render) -> Markup {
    html! {
        h2 class="text-xl font-semibold my-4 text-blue-300" {(s)}
    }
}

pub fn form_element(id: &str, label: &str, input: Markup) -> Markup {
    html! {
        div class="mb-4" {
            label for=(id) class="block text-sm font-bold mb-2 text-gray-300" {(label)}
            (input)
        }
    }
}

pub fn form_submit_button(text: Option<&str>) -> Markup {
    html! {
        div class="flex items-center justify-between" {
            button type="submit" class="bg-blue-500 hover:bg-blue-700 font-bold py-2 px-4 rounded focus:outline-none focus:shadow-outline" {
                (text.unwrap_or("Submit"))
            }
        }
    }
}

pub fn alert<T: Render>(message: impl Render, details: impl IntoIterator<Item = T>) -> Markup {
    let details: Vec<T> = details.into_iter().collect();

    html! {
        div role="alert" class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" {
            strong class="font-bold" {"Alert! "}
            span class="block sm:inline" {(message)}
            @if !details.is_empty() {
                ul class="list-disc list-inside mt-2" {
                    @for detail in details {
                        li {(detail)}
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_escapes_and_lists_details() {
        let rendered = alert("<b>nope</b>", ["Name was empty"]).into_string();
        assert!(rendered.contains("&lt;b&gt;nope&lt;/b&gt;"));
        assert!(rendered.contains("<li>Name was empty</li>"));
    }

    #[test]
    fn alert_without_details_has_no_list() {
        let rendered = alert("Student with the same ID already exists.", Vec::<&str>::new()).into_string();
        assert!(!rendered.contains("<ul"));
    }
}
