use axum::body::Bytes;
use base64::{Engine, prelude::BASE64_STANDARD};
use maud::Render;
use std::fmt::{Debug, Formatter};

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

///an uploaded picture, held in memory for as long as the record (or draft) owning it
///
///clones share the underlying bytes
#[derive(Clone)]
pub struct Picture {
    bytes: Bytes,
    content_type: String,
    file_name: Option<String>,
}

impl Picture {
    ///sniffs the content type from the bytes, only trusting the browser's `declared_content_type` if that fails
    pub fn new(bytes: Bytes, declared_content_type: Option<&str>, file_name: Option<String>) -> Self {
        let content_type = infer::get(&bytes)
            .map(|kind| kind.mime_type())
            .or_else(|| declared_content_type.filter(|ct| is_plain_mime(ct)))
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_string();

        Self {
            bytes,
            content_type,
            file_name: file_name.filter(|name| !name.is_empty()),
        }
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    ///a displayable `data:` URL, encoded when rendered and never cached
    pub const fn display(&self) -> PictureDisplay<'_> {
        PictureDisplay(self)
    }
}

impl Debug for Picture {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Picture")
            .field("len", &self.bytes.len())
            .field("content_type", &self.content_type)
            .field("file_name", &self.file_name)
            .finish()
    }
}

pub struct PictureDisplay<'a>(&'a Picture);

impl Render for PictureDisplay<'_> {
    fn render_to(&self, buffer: &mut String) {
        buffer.push_str("data:");
        buffer.push_str(&self.0.content_type);
        buffer.push_str(";base64,");
        BASE64_STANDARD.encode_string(&self.0.bytes, buffer);
    }
}

//only `type/subtype` made of token characters gets through, so it is safe in an attribute
fn is_plain_mime(candidate: &str) -> bool {
    let is_token = |part: &str| {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    };

    candidate
        .split_once('/')
        .is_some_and(|(ty, subtype)| is_token(ty) && is_token(subtype))
}

#[cfg(test)]
pub const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

#[cfg(test)]
pub fn sample_png(file_name: &str) -> Picture {
    Picture::new(
        Bytes::from_static(PNG_MAGIC),
        Some("image/png"),
        Some(file_name.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffed_type_beats_declared_type() {
        let pic = Picture::new(Bytes::from_static(PNG_MAGIC), Some("text/plain"), None);
        assert_eq!(pic.content_type(), "image/png");
    }

    #[test]
    fn declared_type_is_used_only_when_plain() {
        let unknown = Bytes::from_static(b"not really an image");

        let declared = Picture::new(unknown.clone(), Some("image/x-custom"), None);
        assert_eq!(declared.content_type(), "image/x-custom");

        let hostile = Picture::new(unknown, Some("image/png\" onload=\"x"), None);
        assert_eq!(hostile.content_type(), FALLBACK_CONTENT_TYPE);
    }

    #[test]
    fn empty_file_names_are_dropped() {
        let pic = Picture::new(Bytes::from_static(PNG_MAGIC), None, Some(String::new()));
        assert_eq!(pic.file_name(), None);
        assert_eq!(sample_png("ana.png").file_name(), Some("ana.png"));
    }

    #[test]
    fn display_is_a_base64_data_url() {
        let rendered = sample_png("ana.png").display().render().into_string();
        assert_eq!(rendered, "data:image/png;base64,iVBORw0KGgo=");
    }
}
