//! Sharing the edition link.
//!
//! A terminal has no native share sheet, so sharing always opens a WhatsApp
//! "click to chat" link carrying the share text and the edition URL.
//! Failures are logged and never surfaced as errors.

use url::Url;

use crate::util::validate_link;

const WHATSAPP_BASE: &str = "https://wa.me/";

/// Message shared with the edition link.
pub fn share_text(date: &str) -> String {
    format!("Here's today's Daily AI newspaper — {}", date)
}

/// `https://wa.me/?text=<text + " " + edition_url>` with the text form-encoded.
pub fn whatsapp_url(text: &str, edition_url: &str) -> Result<Url, url::ParseError> {
    Url::parse_with_params(
        WHATSAPP_BASE,
        [("text", format!("{} {}", text, edition_url))],
    )
}

/// Open the share link with the system opener.
///
/// Returns whether the opener was launched. Errors are logged at warn level.
pub fn share_edition(date: &str, edition_url: &str) -> bool {
    let text = share_text(date);
    let link = match whatsapp_url(&text, edition_url) {
        Ok(link) => link,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to build share link");
            return false;
        }
    };

    if let Err(e) = validate_link(link.as_str()) {
        tracing::warn!(error = %e, "Share link rejected");
        return false;
    }

    match open::that(link.as_str()) {
        Ok(()) => {
            tracing::info!(url = %link, "Opened share link");
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "Share failed");
            false
        }
    }
}
