//! Store region types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Store region offered by the country selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "us")]
    Us,
    #[serde(rename = "eu")]
    Eu,
    #[serde(rename = "us-vip")]
    UsVip,
}

/// Commerce service headers selected by a region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreHeaders {
    pub store_view_code: &'static str,
    pub source_locale: &'static str,
    pub price_book_id: &'static str,
}

impl Region {
    /// Selector option value
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Us => "us",
            Self::Eu => "eu",
            Self::UsVip => "us-vip",
        }
    }

    /// Parse a selector option value
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "us" => Some(Self::Us),
            "eu" => Some(Self::Eu),
            "us-vip" => Some(Self::UsVip),
            _ => None,
        }
    }

    /// Label shown in the selector
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Us => "US",
            Self::Eu => "DE",
            Self::UsVip => "US VIP",
        }
    }

    /// Content language of the region
    #[must_use]
    pub fn locale(self) -> &'static str {
        match self {
            Self::Eu => "de",
            Self::Us | Self::UsVip => "en",
        }
    }

    #[must_use]
    pub fn store_headers(self) -> StoreHeaders {
        match self {
            Self::Us => StoreHeaders {
                store_view_code: "en",
                source_locale: "en",
                price_book_id: "us",
            },
            Self::Eu => StoreHeaders {
                store_view_code: "de",
                source_locale: "de",
                price_book_id: "eu",
            },
            Self::UsVip => StoreHeaders {
                store_view_code: "en",
                source_locale: "en",
                price_book_id: "vip",
            },
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
