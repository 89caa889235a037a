use commonware_codec::{DecodeExt, Encode};
use commonware_utils::{from_hex, hex};

use super::RoundSummary;

/// Hex encoding of a round's binary receipt.
pub fn encode_receipt(summary: &RoundSummary) -> String {
    hex(&summary.encode())
}

/// Parse a receipt produced by [`encode_receipt`].
pub fn decode_receipt(receipt: &str) -> Result<RoundSummary, ReceiptError> {
    let bytes = from_hex(receipt.trim()).ok_or(ReceiptError::InvalidHex)?;
    RoundSummary::decode(&mut bytes.as_slice()).map_err(ReceiptError::Codec)
}

#[derive(Debug)]
pub enum ReceiptError {
    InvalidHex,
    Codec(commonware_codec::Error),
}

impl std::fmt::Display for ReceiptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReceiptError::InvalidHex => f.write_str("receipt is not valid hex"),
            ReceiptError::Codec(e) => write!(f, "malformed receipt: {e}"),
        }
    }
}

impl std::error::Error for ReceiptError {}
