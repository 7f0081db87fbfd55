//! Response interpretation: status codes and the XML payload

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fmt;
use tracing::{debug, warn};

use crate::core::errors::{Result, TranslationError};
use crate::core::i18n::Catalog;
use crate::core::models::{ResponseCode, TranslationResponse};

/// Root element name of a translation payload
const ROOT_ELEMENT: &[u8] = b"Translation";

/// Element holding the translated text
const TEXT_ELEMENT: &[u8] = b"text";

/// `code` attribute value of a successful payload
const SUCCESS_CODE: &str = "200";

/// Result of interpreting one response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interpretation {
    /// Text extracted from a successful payload; may be empty
    Translated(String),
    /// Rejection message, `"<code>: <message>"`
    Rejected(String),
}

impl Interpretation {
    pub fn into_text(self) -> String {
        match self {
            Interpretation::Translated(text) | Interpretation::Rejected(text) => text,
        }
    }
}

/// Map a status code and body to the string shown to the user.
///
/// Documented rejections never fail. Unrecognized codes fall through to
/// extraction like a success would.
pub fn interpret(response: &TranslationResponse, catalog: &Catalog) -> Result<Interpretation> {
    let code = response.code();

    if let Some(key) = code.message_key() {
        warn!("Translation rejected with code {}", code);
        return Ok(Interpretation::Rejected(format!(
            "{}: {}",
            code,
            catalog.get(key)
        )));
    }

    if let ResponseCode::Other(other) = code {
        debug!("Unrecognized status {}, extracting anyway", other);
    }

    let body = response
        .raw_body
        .as_deref()
        .ok_or(TranslationError::UnexpectedStatus {
            code: response.status_code,
        })?;

    extract_text(body).map(Interpretation::Translated)
}

/// Extract the translation from a payload such as
/// `<Translation code="200" lang="en-fr"><text>...</text></Translation>`.
///
/// Yields the text content of the first `<text>` child of a `Translation`
/// root whose `code` is `200`, whitespace and nested markup text included.
/// A well-formed document of any other shape yields an empty string.
/// Unparseable input is an [`TranslationError::InvalidResponse`].
pub fn extract_text(body: &str) -> Result<String> {
    let mut reader = Reader::from_str(body);
    let mut depth = 0usize;
    let mut root_matches: Option<bool> = None;
    let mut capture: Option<String> = None;
    let mut found: Option<String> = None;

    loop {
        match reader.read_event().map_err(invalid)? {
            Event::Start(e) => {
                if depth == 0 {
                    if root_matches.is_some() {
                        return Err(invalid("multiple root elements"));
                    }
                    root_matches = Some(is_success_root(&e)?);
                } else if depth == 1 && wants_text(root_matches, &found, &e) {
                    capture = Some(String::new());
                }
                depth += 1;
            }
            Event::Empty(e) => {
                if depth == 0 {
                    if root_matches.is_some() {
                        return Err(invalid("multiple root elements"));
                    }
                    root_matches = Some(is_success_root(&e)?);
                } else if depth == 1 && wants_text(root_matches, &found, &e) {
                    found = Some(String::new());
                }
            }
            Event::End(_) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| invalid("unbalanced end tag"))?;
                if depth == 1 {
                    if let Some(text) = capture.take() {
                        found = Some(text);
                    }
                }
            }
            Event::Text(e) => {
                if let Some(text) = capture.as_mut() {
                    text.push_str(&e.unescape().map_err(invalid)?);
                }
            }
            Event::CData(e) => {
                if let Some(text) = capture.as_mut() {
                    text.push_str(std::str::from_utf8(&e).map_err(invalid)?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(invalid("unclosed element"));
    }

    match root_matches {
        None => Err(invalid("no root element")),
        Some(false) => {
            debug!("Payload is not a successful Translation");
            Ok(String::new())
        }
        Some(true) => Ok(found.unwrap_or_default()),
    }
}

/// Root is `Translation` with `code="200"`
fn is_success_root(e: &BytesStart<'_>) -> Result<bool> {
    if e.name().as_ref() != ROOT_ELEMENT {
        return Ok(false);
    }

    match e.try_get_attribute("code").map_err(invalid)? {
        Some(attr) => Ok(attr.unescape_value().map_err(invalid)? == SUCCESS_CODE),
        None => Ok(false),
    }
}

fn wants_text(root_matches: Option<bool>, found: &Option<String>, e: &BytesStart<'_>) -> bool {
    root_matches == Some(true) && found.is_none() && e.name().as_ref() == TEXT_ELEMENT
}

fn invalid(err: impl fmt::Display) -> TranslationError {
    TranslationError::InvalidResponse {
        message: err.to_string(),
    }
}
