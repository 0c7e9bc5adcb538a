use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// A persisted catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: i32,
    pub publisher_id: Option<String>,
    pub name: String,
    pub platform: Option<String>,
    pub store_id: Option<String>,
    pub bundle_id: Option<String>,
    pub app_version: Option<String>,
    pub is_published: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// The six mutable fields of a game plus the published flag — everything
/// needed to insert a row or fully replace one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewGame {
    pub publisher_id: Option<String>,
    pub name: String,
    pub platform: Option<String>,
    pub store_id: Option<String>,
    pub bundle_id: Option<String>,
    pub app_version: Option<String>,
    pub is_published: bool,
}

/// Identifier values in the chart feeds arrive as either JSON numbers or
/// strings. They are opaque to the catalog and kept as text.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum OpaqueId {
    Number(i64),
    Text(String),
}

impl OpaqueId {
    fn into_string(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

/// One raw record from a platform top-chart feed. Every field is optional
/// and unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawChartGame {
    #[serde(default)]
    pub publisher_id: Option<OpaqueId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub os: Option<String>,
    #[serde(default)]
    pub app_id: Option<OpaqueId>,
    #[serde(default)]
    pub bundle_id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl From<RawChartGame> for NewGame {
    /// Field-renaming serializer for chart records. No validation and no
    /// error path: absent source fields stay absent, and chart entries are
    /// always published.
    fn from(raw: RawChartGame) -> Self {
        Self {
            publisher_id: raw.publisher_id.map(OpaqueId::into_string),
            name: raw.name.unwrap_or_default(),
            platform: raw.os,
            store_id: raw.app_id.map(OpaqueId::into_string),
            bundle_id: raw.bundle_id,
            app_version: raw.version,
            is_published: true,
        }
    }
}

/// Platforms with a published top chart. Manually created games may carry
/// any free-form platform string; only the populate pipeline is limited to
/// these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Android,
    Ios,
}

impl Platform {
    /// Populate order. Android first, matching the source feeds.
    pub const ALL: [Self; 2] = [Self::Android, Self::Ios];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Ios => "ios",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unexpected platform value {0:?}, expecting \"ios\" or \"android\"")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "android" => Ok(Self::Android),
            "ios" => Ok(Self::Ios),
            other => Err(UnknownPlatform(other.to_string())),
        }
    }
}
