//! Shareable links.
//!
//! A link carries `base64(JSON{courses, assigned slots})` in its `shared`
//! query parameter. Decoding never fails loudly: anything unreadable is
//! logged and reported as "no shared data".

use base64::{Engine as _, engine::general_purpose::STANDARD};
use eyre::WrapErr;
use tracing::warn;
use url::Url;

use crate::errors::{TimetableError, TimetableResult};
use crate::models::timetable::TimetableSnapshot;
use crate::timetable::Timetable;

pub const SHARED_PARAM: &str = "shared";

/// Encodes the courses and the assigned slots of `timetable`.
pub fn encode_shared(timetable: &Timetable) -> TimetableResult<String> {
    let json = serde_json::to_string(&timetable.shared_snapshot())
        .wrap_err("Failed to serialize shared timetable")?;
    Ok(STANDARD.encode(json))
}

/// Builds `base_url?shared=<encoded>`, dropping any existing query and fragment.
pub fn generate_share_link(base_url: &str, timetable: &Timetable) -> TimetableResult<String> {
    let mut url = Url::parse(base_url)
        .map_err(|e| TimetableError::Validation(format!("Invalid base URL {}: {}", base_url, e)))?;
    url.set_query(None);
    url.set_fragment(None);

    let encoded = encode_shared(timetable)?;
    url.query_pairs_mut().append_pair(SHARED_PARAM, &encoded);

    Ok(url.to_string())
}

/// Decodes a bare `shared` parameter value.
pub fn decode_shared(encoded: &str) -> Option<TimetableSnapshot> {
    let bytes = match STANDARD.decode(encoded.trim()) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "Failed to load shared timetable: invalid base64");
            return None;
        }
    };

    match serde_json::from_slice::<TimetableSnapshot>(&bytes) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!(error = %e, "Failed to load shared timetable: invalid JSON");
            None
        }
    }
}

/// Reads the `shared` parameter of a page URL and decodes it.
pub fn load_shared_timetable(page_url: &str) -> Option<TimetableSnapshot> {
    let url = match Url::parse(page_url) {
        Ok(url) => url,
        Err(e) => {
            warn!(error = %e, "Failed to load shared timetable: invalid URL");
            return None;
        }
    };

    let shared = url
        .query_pairs()
        .find(|(key, _)| key == SHARED_PARAM)
        .map(|(_, value)| value.into_owned())?;

    decode_shared(&shared)
}

/// Accepts either a full share link or a bare parameter value.
pub fn load_shared_input(input: &str) -> Option<TimetableSnapshot> {
    let input = input.trim();
    if input.contains("://") {
        load_shared_timetable(input)
    } else {
        decode_shared(input)
    }
}
