use crate::{
    data::{
        draft::{Draft, DraftUpdate, FormMode},
        picture::Picture,
    },
    error::{MultipartSnafu, ParseFormRoundSnafu, RosterResult},
    maud_conveniences::{FILE_INPUT_CLASSES, INPUT_CLASSES, form_element, form_submit_button},
};
use axum::extract::Multipart;
use maud::{Markup, html};
use snafu::ResultExt;

struct FormEndpoints {
    id_prefix: &'static str,
    submit: &'static str,
    draft: &'static str,
}

const fn endpoints(mode: FormMode) -> FormEndpoints {
    match mode {
        FormMode::Register => FormEndpoints {
            id_prefix: "register",
            submit: "/students",
            draft: "/internal/registration/draft",
        },
        FormMode::Save => FormEndpoints {
            id_prefix: "edit",
            submit: "/internal/edit/save",
            draft: "/internal/edit/draft",
        },
    }
}

///every change is sent to the draft endpoint as it happens, and the submit re-sends the lot
///
///both requests queue on the form, and the hidden round lets the server drop anything a
///since-replaced form still sends
pub fn render_student_form(draft: &Draft) -> Markup {
    let mode = draft.mode();
    let FormEndpoints {
        id_prefix,
        submit,
        draft: draft_endpoint,
    } = endpoints(mode);

    let student_id_input = format!("{id_prefix}_student_id");
    let name_input = format!("{id_prefix}_name");
    let pic_input = format!("{id_prefix}_pic");

    html! {
        form hx-post=(submit) hx-trigger="submit" hx-sync="this:queue all" hx-encoding="multipart/form-data" hx-target="#app" hx-swap="outerHTML" class="p-4 bg-gray-800 rounded shadow-md" {
            input type="hidden" name="round" value=(draft.round);
            div hx-put=(draft_endpoint) hx-trigger="change" hx-sync="closest form:queue all" hx-include="closest form" hx-encoding="multipart/form-data" hx-swap="none" {
                (form_element(&student_id_input, "Student ID", html! {
                    input type="text" id=(student_id_input) name="student_id" value=(draft.student_id) readonly[draft.is_editing] class=(INPUT_CLASSES);
                }))
                (form_element(&name_input, "Name", html! {
                    input type="text" id=(name_input) name="name" value=(draft.name) class=(INPUT_CLASSES);
                }))
                (form_element(&pic_input, "Picture", html! {
                    input type="file" id=(pic_input) name="pic" accept="image/*" class=(FILE_INPUT_CLASSES);
                }))
            }

            @if let Some(pic) = &draft.pic {
                div class="mb-4 flex flex-row items-center space-x-4" {
                    img src=(pic.display()) alt="Current picture" style="max-width: 50px; max-height: 50px;";
                    p class="text-sm italic text-gray-400" {
                        "Current picture"
                        @if let Some(file_name) = pic.file_name() {
                            ": " (file_name)
                        }
                    }
                }
            }

            (form_submit_button(Some(mode.submit_label())))
        }
    }
}

///an empty file part means "no new file chosen", not "remove the picture"
pub async fn read_draft_update(mut multipart: Multipart) -> RosterResult<DraftUpdate> {
    let mut update = DraftUpdate::default();

    while let Some(field) = multipart.next_field().await.context(MultipartSnafu)? {
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };

        match name.as_str() {
            "student_id" => update.student_id = Some(field.text().await.context(MultipartSnafu)?),
            "name" => update.name = Some(field.text().await.context(MultipartSnafu)?),
            "round" => {
                update.round = field
                    .text()
                    .await
                    .context(MultipartSnafu)?
                    .trim()
                    .parse()
                    .context(ParseFormRoundSnafu)?;
            }
            "pic" => {
                let file_name = field.file_name().map(ToString::to_string);
                let content_type = field.content_type().map(ToString::to_string);
                let bytes = field.bytes().await.context(MultipartSnafu)?;

                if !bytes.is_empty() {
                    let pic = Picture::new(bytes, content_type.as_deref(), file_name);
                    debug!(content_type = pic.content_type(), file_name = ?pic.file_name(), "Received picture");
                    update.pic = Some(pic);
                }
            }
            other => debug!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok(update)
}

#[cfg(test)]
pub mod test_support {
    use axum::{
        body::Body,
        extract::{FromRequest, Multipart},
        http::{Request, header},
    };

    const BOUNDARY: &str = "roster-test-boundary";

    pub enum Part<'a> {
        Text(&'a str, &'a str),
        File {
            name: &'a str,
            file_name: &'a str,
            content_type: &'a str,
            bytes: &'a [u8],
        },
    }

    pub async fn multipart(parts: &[Part<'_>]) -> Multipart {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                            .as_bytes(),
                    );
                }
                Part::File {
                    name,
                    file_name,
                    content_type,
                    bytes,
                } => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                    body.extend_from_slice(b"\r\n");
                }
            }
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();

        Multipart::from_request(request, &()).await.unwrap()
    }
}
