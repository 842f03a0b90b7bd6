use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// What a form submission describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ContentKind {
    Url,
    Phone,
    Sms,
    Email,
    Text,
    #[serde(rename = "pdf")]
    #[cfg_attr(feature = "cli", value(name = "pdf"))]
    PdfFile,
    #[serde(rename = "image")]
    #[cfg_attr(feature = "cli", value(name = "image"))]
    ImageFile,
}

impl ContentKind {
    pub const ALL: [Self; 7] =
        [Self::Url, Self::Phone, Self::Sms, Self::Email, Self::Text, Self::PdfFile, Self::ImageFile];

    /// Tag used by the form's `qr_type` field.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Phone => "phone",
            Self::Sms => "sms",
            Self::Email => "email",
            Self::Text => "text",
            Self::PdfFile => "pdf",
            Self::ImageFile => "image",
        }
    }

    pub fn is_file(self) -> bool {
        matches!(self, Self::PdfFile | Self::ImageFile)
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ContentKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.tag() == s)
            .ok_or_else(|| ValidationError::new(INVALID_KIND))
    }
}


// Global constants
//------------------------------------------------------------------------------

pub(super) const INVALID_KIND: &str = "Invalid QR code type.";
