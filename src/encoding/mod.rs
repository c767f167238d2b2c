//! Payload encoding
//!
//! Turns a caller-owned binary asset into the base64 payload embedded in the
//! request body. Encoding always completes (or fails) before any network call.

mod asset;
mod payload;

pub use asset::BinaryAsset;
pub use payload::{EncodedPayload, encode_asset};
