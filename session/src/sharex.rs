//! ShareX custom uploader configuration.
//!
//! ShareX posts the clipboard URL to the create endpoint and reads the short
//! link back from the JSON response. `$input$` and `$json:URL$` are ShareX
//! placeholders and must be emitted verbatim.

#[cfg(test)]
#[path = "sharex_test.rs"]
mod sharex_test;

use serde::Serialize;

use crate::endpoints;
use crate::types::Token;

pub const SHAREX_NAME: &str = "URL Shortener";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShareXConfig {
    pub name: String,
    pub destination_type: String,
    pub request_type: String,
    #[serde(rename = "RequestURL")]
    pub request_url: String,
    pub arguments: ShareXArguments,
    pub headers: ShareXHeaders,
    pub response_type: String,
    #[serde(rename = "URL")]
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ShareXArguments {
    #[serde(rename = "URL")]
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ShareXHeaders {
    #[serde(rename = "Authorization")]
    pub authorization: String,
}

impl ShareXConfig {
    /// Uploader config creating links on `origin` with the session `token`.
    #[must_use]
    pub fn new(origin: &str, token: &Token) -> Self {
        Self {
            name: SHAREX_NAME.to_owned(),
            destination_type: "URLShortener".to_owned(),
            request_type: "POST".to_owned(),
            request_url: endpoints::url(origin, endpoints::CREATE),
            arguments: ShareXArguments {
                url: "$input$".to_owned(),
            },
            headers: ShareXHeaders {
                authorization: token.as_str().to_owned(),
            },
            response_type: "Text".to_owned(),
            url: "$json:URL$".to_owned(),
        }
    }

    /// Pretty-printed JSON, ready to import into ShareX.
    ///
    /// # Errors
    ///
    /// Returns the serializer error, which plain string fields never produce.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
