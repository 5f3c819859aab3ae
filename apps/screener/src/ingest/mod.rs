// File decoding: turns uploaded PDF / DOCX / TXT bytes into plain text for screening.
// The screening core never sees bytes; everything it reads comes through here.

pub mod decode;
pub mod docx;

pub use decode::{decode_document, DecodeError};
