//! Flat binary loader.
//!
//! Reads a raw little-endian program image from disk and converts it into
//! the 32-bit instruction words the front-end fetches from. A trailing
//! partial word is zero-padded.

use std::fs;
use std::io;
use std::path::Path;

/// Reads a binary file from disk.
pub fn load_binary<P: AsRef<Path>>(path: P) -> io::Result<Vec<u8>> {
    fs::read(path)
}

/// Converts a little-endian byte image into 32-bit instruction words,
/// zero-padding a trailing partial word.
pub fn words_from_bytes(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks(4)
        .map(|chunk| {
            let mut word = [0u8; 4];
            word[..chunk.len()].copy_from_slice(chunk);
            u32::from_le_bytes(word)
        })
        .collect()
}

/// Reads a binary file and returns its instruction words.
pub fn load_words<P: AsRef<Path>>(path: P) -> io::Result<Vec<u32>> {
    Ok(words_from_bytes(&load_binary(path)?))
}
