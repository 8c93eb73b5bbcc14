use std::fmt;

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use reletter_types::api::Claims;

use crate::error::{ClientError, Result};

/// Token segments are base64url without padding, but some issuers pad them.
const SEGMENT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Stable identifier of the signed-in viewer (their email).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewerIdentity(String);

impl ViewerIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read the viewer's identity out of the token's claims segment.
///
/// The signature is not checked: the server does that on every request, and
/// the client only needs to know whose `readBy` entries to count.
pub fn decode_viewer_identity(token: &str) -> Result<ViewerIdentity> {
    let payload = token
        .split('.')
        .nth(1)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ClientError::InvalidCredential("token has no claims segment".into()))?;

    // Standard-alphabet segments show up from hand-rolled issuers.
    let normalized = payload.replace('+', "-").replace('/', "_");
    let bytes = SEGMENT_ENGINE
        .decode(normalized.as_bytes())
        .map_err(|e| ClientError::InvalidCredential(format!("claims segment: {}", e)))?;

    let claims: Claims = serde_json::from_slice(&bytes)
        .map_err(|e| ClientError::InvalidCredential(format!("claims payload: {}", e)))?;

    if claims.email.is_empty() {
        return Err(ClientError::InvalidCredential("email claim is empty".into()));
    }

    Ok(ViewerIdentity(claims.email))
}
