// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the jitsi-token project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Join URL construction
//!
//! A join URL is `https://<domain>/<room>?jwt=<token>`. The room is written
//! as a single path segment in which every byte except ASCII alphanumerics
//! and `-_.~` is percent-encoded. Control characters such as tab or newline
//! are encoded as well, a WHATWG path setter would strip them. The token is
//! base64url and is appended as is.

use ::url::Url;

use crate::error::TokenCreationError;

/// Query parameter Jitsi Meet reads the token from
pub const JWT_QUERY_PARAM: &str = "jwt";

/// Base URL of a Jitsi Meet deployment: `https://<domain>/`
pub fn meeting_base_url(domain: &str) -> Result<Url, TokenCreationError> {
    let base = Url::parse(&format!("https://{}/", domain)).map_err(|e| {
        TokenCreationError::InvalidMeetingUrl {
            reason: format!("{}: {}", domain, e),
        }
    })?;

    if base.host_str().map_or(true, str::is_empty) {
        return Err(TokenCreationError::InvalidMeetingUrl {
            reason: format!("{}: missing host", domain),
        });
    }

    Ok(base)
}

/// Build the URL that opens `room` on `base` authenticated with `token`
///
/// Any path or query already present on `base` is replaced.
pub fn build_join_url(base: &Url, room: &str, token: &str) -> Result<Url, TokenCreationError> {
    // URL parsers collapse dot segments, the room would silently vanish
    if matches!(room, "." | "..") {
        return Err(TokenCreationError::InvalidMeetingUrl {
            reason: format!("room name '{}' cannot be used as a URL path segment", room),
        });
    }

    if base.cannot_be_a_base() {
        return Err(TokenCreationError::InvalidMeetingUrl {
            reason: format!("{} cannot be used as a base URL", base),
        });
    }

    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.set_path(&format!("/{}", urlencoding::encode(room)));

    // base64url only uses URL-safe characters, no escaping needed
    url.set_query(Some(&format!("{}={}", JWT_QUERY_PARAM, token)));

    Ok(url)
}
