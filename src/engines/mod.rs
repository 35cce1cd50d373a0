pub mod decoding;
pub mod generation;
pub mod rendering;
