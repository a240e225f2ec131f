use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// The questionnaires a patient can submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum FormKind {
    #[serde(rename = "IKDC")]
    Ikdc,
    #[serde(rename = "LYSHOLM-TEGNER")]
    LysholmTegner,
    #[serde(rename = "WOMAC")]
    Womac,
    #[serde(rename = "IKS")]
    Iks,
    #[serde(rename = "KOOS")]
    Koos,
}

impl FormKind {
    pub const ALL: [FormKind; 5] = [
        Self::Ikdc,
        Self::LysholmTegner,
        Self::Womac,
        Self::Iks,
        Self::Koos,
    ];

    /// Display name, as shown in the dashboard columns.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ikdc => "IKDC",
            Self::LysholmTegner => "LYSHOLM-TEGNER",
            Self::Womac => "WOMAC",
            Self::Iks => "IKS",
            Self::Koos => "KOOS",
        }
    }

    /// Key under which the store keeps this form's entries, also used as
    /// the `type` tag of historical items.
    pub fn storage_key(&self) -> &'static str {
        match self {
            Self::Ikdc => "ikdc",
            Self::LysholmTegner => "lysholm-tegner",
            Self::Womac => "womac",
            Self::Iks => "iks",
            Self::Koos => "koos",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormKind {
    type Err = CoreError;

    /// Accepts the display name or the storage key, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| {
                kind.as_str().eq_ignore_ascii_case(needle)
                    || kind.storage_key().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| CoreError::UnknownForm(s.to_string()))
    }
}
