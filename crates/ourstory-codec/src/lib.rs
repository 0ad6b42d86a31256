//! Our Story Codec — story state that travels inside a URL.
//!
//! A story is minified (long keys rewritten to one-letter codes), serialized
//! to JSON, deflated, and encoded with the URL-safe base64 alphabet so the
//! token can sit in a `?data=` query parameter without percent-escaping.

pub mod codec;
pub mod format;
pub mod keys;
pub mod token;

pub use codec::{decode, decode_story, encode, encode_draft, encode_story, try_decode};
pub use format::PayloadFormat;
pub use token::CodecError;
