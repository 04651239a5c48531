//! Wire DTOs and auth state shared by the web client and the CLI.
//!
//! DESIGN
//! ======
//! Field names mirror the backend's PascalCase JSON so serde stays lossless.
//! Missing fields default instead of failing, since older servers omit some
//! of them.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// =============================================================================
// TOKEN
// =============================================================================

/// Opaque session credential issued by the backend after provider login.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

// Tokens end up in log lines through `{:?}`; keep the credential out of them.
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token(<{} bytes>)", self.0.len())
    }
}

// =============================================================================
// PROVIDERS
// =============================================================================

/// Identity provider the backend may have enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Provider {
    Google,
    Github,
    Okta,
    GenericOidc,
    Microsoft,
    /// An upstream reverse proxy authenticates requests before they arrive.
    Proxy,
}

impl Provider {
    /// Order in which login buttons are offered. `Proxy` never gets a button.
    pub const PICKER_ORDER: [Self; 5] = [
        Self::Google,
        Self::Github,
        Self::Okta,
        Self::GenericOidc,
        Self::Microsoft,
    ];

    /// Identifier used on the wire and in login URLs.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Github => "github",
            Self::Okta => "okta",
            Self::GenericOidc => "generic_oidc",
            Self::Microsoft => "microsoft",
            Self::Proxy => "proxy",
        }
    }

    /// Human-facing name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::Github => "GitHub",
            Self::Okta => "Okta",
            Self::GenericOidc => "OpenID Connect",
            Self::Microsoft => "Microsoft",
            Self::Proxy => "Proxy",
        }
    }

    /// Parse a wire identifier. Unknown identifiers yield `None`.
    #[must_use]
    pub fn parse(id: &str) -> Option<Self> {
        match id {
            "google" => Some(Self::Google),
            "github" => Some(Self::Github),
            "okta" => Some(Self::Okta),
            "generic_oidc" => Some(Self::GenericOidc),
            "microsoft" => Some(Self::Microsoft),
            "proxy" => Some(Self::Proxy),
            _ => None,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// =============================================================================
// AUTH INFO
// =============================================================================

/// Server configuration reported by `GET /api/v1/info`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthInfo {
    /// Enabled provider identifiers, in server order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub providers: Vec<String>,
    /// Everything else the endpoint reports (version, commit, build date...).
    #[serde(flatten)]
    pub build: BTreeMap<String, Value>,
}

impl AuthInfo {
    #[must_use]
    pub fn has(&self, provider: Provider) -> bool {
        self.providers.iter().any(|id| id == provider.id())
    }

    /// Whether authentication is delegated to an upstream proxy.
    #[must_use]
    pub fn uses_proxy(&self) -> bool {
        self.has(Provider::Proxy)
    }

    /// Providers that get a login button, in picker order.
    #[must_use]
    pub fn login_providers(&self) -> Vec<Provider> {
        Provider::PICKER_ORDER
            .into_iter()
            .filter(|provider| self.has(*provider))
            .collect()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// USER PROFILE + AUTH STATE
// =============================================================================

/// Identity returned by a successful token check.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserProfile {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Avatar URL.
    #[serde(default)]
    pub picture: String,
    /// Provider that issued the identity (wire id).
    #[serde(default)]
    pub provider: String,
}

/// Derived login state. Protected screens render only when `Authenticated`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    Validating,
    Authenticated(UserProfile),
}

impl AuthState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            Self::Authenticated(profile) => Some(profile),
            Self::Unauthenticated | Self::Validating => None,
        }
    }
}

/// Body of `POST /api/v1/auth/check`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CheckRequest<'a> {
    #[serde(rename = "Token")]
    pub token: &'a str,
}

// =============================================================================
// LINK MANAGEMENT
// =============================================================================

/// Body of `POST /api/v1/protected/create`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRequest {
    #[serde(rename = "URL")]
    pub url: String,
    /// Custom short id; the server generates one when absent.
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// RFC 3339 expiry timestamp.
    #[serde(rename = "Expiration", default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<String>,
    #[serde(rename = "Password", default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Response of `POST /api/v1/protected/create`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateResponse {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "DeletionURL", default)]
    pub deletion_url: String,
}

/// Body of the lookup and visitors endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IdRequest<'a> {
    #[serde(rename = "ID")]
    pub id: &'a str,
}

/// Public metadata of a short link.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntryPublic {
    #[serde(rename = "URL", default)]
    pub url: String,
    #[serde(default)]
    pub created_on: Option<String>,
    #[serde(default)]
    pub last_visit: Option<String>,
    #[serde(default)]
    pub expiration: Option<String>,
    #[serde(default)]
    pub visit_count: u64,
}

/// One row of `GET /api/v1/protected/recent`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentEntry {
    #[serde(rename = "Public", default)]
    pub public: EntryPublic,
    #[serde(rename = "DeletionURL", default)]
    pub deletion_url: Option<String>,
}

/// Recent links keyed by short id.
pub type RecentEntries = BTreeMap<String, RecentEntry>;

/// One recorded visit of a short link.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visitor {
    #[serde(rename = "IP", default)]
    pub ip: String,
    #[serde(rename = "Referer", default)]
    pub referer: String,
    #[serde(rename = "UserAgent", default)]
    pub user_agent: String,
    #[serde(rename = "Timestamp", default)]
    pub timestamp: String,
    #[serde(rename = "UTMSource", default)]
    pub utm_source: Option<String>,
    #[serde(rename = "UTMMedium", default)]
    pub utm_medium: Option<String>,
    #[serde(rename = "UTMCampaign", default)]
    pub utm_campaign: Option<String>,
    #[serde(rename = "UTMContent", default)]
    pub utm_content: Option<String>,
    #[serde(rename = "UTMTerm", default)]
    pub utm_term: Option<String>,
}
