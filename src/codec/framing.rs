use std::borrow::Cow;

use crate::foundation::error::{ReelError, ReelResult};

/// Size of the big-endian `u32` length prefix.
pub const LENGTH_HEADER_BYTES: usize = 4;

/// How the payload length survives the trip through padded frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Framing {
    /// Prefix the payload with its byte length; decode trims filler exactly.
    #[default]
    LengthPrefixed,
    /// No header. Filler cells in the last frame decode as trailing zero bytes.
    Raw,
}

impl Framing {
    /// Bytes to bit-encode for `payload`.
    pub fn wrap(self, payload: &[u8]) -> ReelResult<Cow<'_, [u8]>> {
        match self {
            Framing::Raw => Ok(Cow::Borrowed(payload)),
            Framing::LengthPrefixed => {
                let len = u32::try_from(payload.len()).map_err(|_| {
                    ReelError::validation(format!(
                        "payload of {} bytes exceeds the u32 length header",
                        payload.len()
                    ))
                })?;
                let mut out = Vec::with_capacity(LENGTH_HEADER_BYTES + payload.len());
                out.extend_from_slice(&len.to_be_bytes());
                out.extend_from_slice(payload);
                Ok(Cow::Owned(out))
            }
        }
    }

    /// Recover the payload from decoded bytes.
    pub fn strip(self, mut recovered: Vec<u8>) -> ReelResult<Vec<u8>> {
        match self {
            Framing::Raw => Ok(recovered),
            Framing::LengthPrefixed => {
                if recovered.len() < LENGTH_HEADER_BYTES {
                    return Err(ReelError::bit_length(format!(
                        "recovered {} bits, need {} for the length header",
                        recovered.len() * 8,
                        LENGTH_HEADER_BYTES * 8
                    )));
                }
                let mut header = [0u8; LENGTH_HEADER_BYTES];
                header.copy_from_slice(&recovered[..LENGTH_HEADER_BYTES]);
                let declared = u32::from_be_bytes(header) as usize;
                let available = recovered.len() - LENGTH_HEADER_BYTES;
                if declared > available {
                    return Err(ReelError::bit_length(format!(
                        "header declares {declared} bytes but only {available} were recovered"
                    )));
                }
                recovered.truncate(LENGTH_HEADER_BYTES + declared);
                recovered.drain(..LENGTH_HEADER_BYTES);
                Ok(recovered)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/framing.rs"]
mod tests;
