//! Form submission validation.
//!
//! [`normalize`] turns a declared [`ContentKind`] and the submitted fields and
//! files into the exact payload to encode, or a [`ValidationError`] whose
//! message can be shown next to the form.
//!
//! | kind    | fields                                      | payload                               |
//! |---------|---------------------------------------------|---------------------------------------|
//! | `url`   | `url_data`                                  | trimmed URL, `http://` or `https://`  |
//! | `phone` | `phone_data`                                | `tel:<digits>`                        |
//! | `sms`   | `sms_phone`, `sms_message`                  | `smsto:<digits>:<message>`            |
//! | `email` | `email_to`, `email_subject`, `email_body`   | `mailto:<to>?subject=<s>&body=<b>`    |
//! | `text`  | `text_data`                                 | the text, untrimmed                   |
//! | `pdf`   | file `pdf_file`                             | file bytes                            |
//! | `image` | file `image_file` (png, jpg, jpeg, gif)     | file bytes                            |

mod kind;
mod payload;
mod rules;

use std::collections::HashMap;

use tracing::debug;

pub use kind::ContentKind;
pub use payload::{ContentRequest, NormalizedPayload, PayloadData, UploadedFile};

use crate::error::ValidationError;

/// Validates a submission of the given `kind`.
///
/// ```rust
/// use std::collections::HashMap;
/// use qrforge::input::{normalize, ContentKind};
///
/// let fields = HashMap::from([("url_data".to_string(), " https://a.com ".to_string())]);
/// let payload = normalize(ContentKind::Url, &fields, &HashMap::new()).unwrap();
/// assert_eq!(payload.as_str(), Some("https://a.com"));
/// ```
pub fn normalize(
    kind: ContentKind,
    fields: &HashMap<String, String>,
    files: &HashMap<String, UploadedFile>,
) -> Result<NormalizedPayload, ValidationError> {
    let res = match kind {
        ContentKind::Url => rules::url(fields).map(|s| NormalizedPayload::text(kind, s)),
        ContentKind::Phone => rules::phone(fields).map(|s| NormalizedPayload::text(kind, s)),
        ContentKind::Sms => rules::sms(fields).map(|s| NormalizedPayload::text(kind, s)),
        ContentKind::Email => rules::email(fields).map(|s| NormalizedPayload::text(kind, s)),
        ContentKind::Text => rules::text(fields).map(|s| NormalizedPayload::text(kind, s)),
        ContentKind::PdfFile => {
            rules::upload(files, &rules::PDF_RULE).map(|b| NormalizedPayload::binary(kind, b))
        }
        ContentKind::ImageFile => {
            rules::upload(files, &rules::IMAGE_RULE).map(|b| NormalizedPayload::binary(kind, b))
        }
    };

    match &res {
        Ok(payload) => debug!("Accepted {kind} submission: {} bytes", payload.len()),
        Err(e) => debug!("Rejected {kind} submission: {e}"),
    }
    res
}
