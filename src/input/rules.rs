//! Per-kind validation rules.
//!
//! Every rule reads its fields from the submission, rejects anything that
//! does not look like the declared kind and otherwise returns the exact text
//! or bytes to encode.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::payload::UploadedFile;
use crate::error::ValidationError;

type Fields = HashMap<String, String>;
type Files = HashMap<String, UploadedFile>;

static RE_URL_SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://").unwrap());

// Anchored at the start only: anything may follow the last dot
static RE_EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+").unwrap());

fn field<'a>(fields: &'a Fields, name: &str) -> &'a str {
    fields.get(name).map(String::as_str).unwrap_or_default()
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

// Text after the last dot, lowercased. `None` when the name has no dot.
fn extension(filename: &str) -> Option<String> {
    filename.rsplit_once('.').map(|(_, ext)| ext.to_lowercase())
}

pub(super) fn url(fields: &Fields) -> Result<String, ValidationError> {
    let url = field(fields, "url_data").trim();
    if !RE_URL_SCHEME.is_match(url) {
        return Err(ValidationError::new("Invalid URL. Please start with http:// or https://"));
    }
    Ok(url.to_string())
}

pub(super) fn phone(fields: &Fields) -> Result<String, ValidationError> {
    let phone = field(fields, "phone_data").trim();
    if !is_digits(phone) {
        return Err(ValidationError::new("Invalid phone number. Please use digits only."));
    }
    Ok(format!("tel:{phone}"))
}

pub(super) fn sms(fields: &Fields) -> Result<String, ValidationError> {
    let phone = field(fields, "sms_phone").trim();
    let message = field(fields, "sms_message").trim();
    if !is_digits(phone) {
        return Err(ValidationError::new("Invalid phone number for SMS. Please use digits only."));
    }
    if message.is_empty() {
        return Err(ValidationError::new("SMS message cannot be empty."));
    }
    Ok(format!("smsto:{phone}:{message}"))
}

// Subject and body are interpolated as-is, without percent-encoding
pub(super) fn email(fields: &Fields) -> Result<String, ValidationError> {
    let to = field(fields, "email_to").trim();
    let subject = field(fields, "email_subject").trim();
    let body = field(fields, "email_body").trim();
    if !RE_EMAIL.is_match(to) {
        return Err(ValidationError::new("Invalid 'To' email address."));
    }
    Ok(format!("mailto:{to}?subject={subject}&body={body}"))
}

pub(super) fn text(fields: &Fields) -> Result<String, ValidationError> {
    let text = field(fields, "text_data");
    if text.trim().is_empty() {
        return Err(ValidationError::new("Text content cannot be empty."));
    }
    Ok(text.to_string())
}

/// Accepted upload: file input name, allowed extensions and messages.
pub(super) struct FileRule {
    pub input: &'static str,
    pub extensions: &'static [&'static str],
    pub missing: &'static str,
    pub invalid: &'static str,
}

pub(super) static PDF_RULE: FileRule = FileRule {
    input: "pdf_file",
    extensions: &["pdf"],
    missing: "No PDF file selected.",
    invalid: "Invalid file type. Please upload a PDF.",
};

pub(super) static IMAGE_RULE: FileRule = FileRule {
    input: "image_file",
    extensions: &["png", "jpg", "jpeg", "gif"],
    missing: "No image file selected.",
    invalid: "Invalid file type. Please upload a PNG, JPG, JPEG, or GIF.",
};

pub(super) fn upload(files: &Files, rule: &FileRule) -> Result<Vec<u8>, ValidationError> {
    let file = match files.get(rule.input) {
        Some(f) if !f.filename.is_empty() => f,
        _ => return Err(ValidationError::new(rule.missing)),
    };
    match extension(&file.filename) {
        Some(ext) if rule.extensions.contains(&ext.as_str()) => Ok(file.bytes.clone()),
        _ => Err(ValidationError::new(rule.invalid)),
    }
}
