use std::collections::HashMap;

use super::kind::ContentKind;
use crate::error::ValidationError;

/// An uploaded file as received from a multipart form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadedFile {
    /// Client supplied name. Empty when the file input was left blank.
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self { filename: filename.into(), bytes: bytes.into() }
    }
}

/// A form submission: the declared kind plus its text fields and files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRequest {
    pub kind: ContentKind,
    pub fields: HashMap<String, String>,
    pub files: HashMap<String, UploadedFile>,
}

impl ContentRequest {
    pub fn new(kind: ContentKind) -> Self {
        Self { kind, fields: HashMap::new(), files: HashMap::new() }
    }

    /// Builds a request from raw form data, reading the kind from the
    /// `qr_type` field.
    pub fn from_form(
        fields: HashMap<String, String>,
        files: HashMap<String, UploadedFile>,
    ) -> Result<Self, ValidationError> {
        let kind = match fields.get(KIND_FIELD).map(String::as_str) {
            None | Some("") => return Err(ValidationError::new(MISSING_KIND)),
            Some(tag) => tag.parse()?,
        };
        Ok(Self { kind, fields, files })
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn file(mut self, name: impl Into<String>, file: UploadedFile) -> Self {
        self.files.insert(name.into(), file);
        self
    }

    pub fn normalize(&self) -> Result<NormalizedPayload, ValidationError> {
        super::normalize(self.kind, &self.fields, &self.files)
    }
}

/// Content of a validated submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadData {
    Text(String),
    Binary(Vec<u8>),
}

/// A validated payload, ready for the symbol encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPayload {
    pub kind: ContentKind,
    pub data: PayloadData,
}

impl NormalizedPayload {
    pub(crate) fn text(kind: ContentKind, text: String) -> Self {
        Self { kind, data: PayloadData::Text(text) }
    }

    pub(crate) fn binary(kind: ContentKind, bytes: Vec<u8>) -> Self {
        Self { kind, data: PayloadData::Binary(bytes) }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match &self.data {
            PayloadData::Text(s) => s.as_bytes(),
            PayloadData::Binary(b) => b,
        }
    }

    /// The payload as text, `None` for uploaded files.
    pub fn as_str(&self) -> Option<&str> {
        match &self.data {
            PayloadData::Text(s) => Some(s),
            PayloadData::Binary(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl AsRef<[u8]> for NormalizedPayload {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}


// Global constants
//------------------------------------------------------------------------------

const KIND_FIELD: &str = "qr_type";

const MISSING_KIND: &str = "QR Code type not specified.";
