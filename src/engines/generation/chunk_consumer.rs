use super::genome::BITS_PER_NOTE;

/// Sequentially reads 4-bit chunks from a genome as little-endian integers
pub struct ChunkConsumer<'a> {
    bits: &'a [bool],
    position: usize,
}

impl<'a> ChunkConsumer<'a> {
    pub fn new(bits: &'a [bool]) -> Self {
        Self { bits, position: 0 }
    }

    /// Consume next chunk and return its value in 0..=15.
    /// Bit `j` of the chunk contributes `2^j`.
    pub fn consume(&mut self) -> Option<u8> {
        let end = self.position + BITS_PER_NOTE;
        if end > self.bits.len() {
            return None;
        }

        let value = self.bits[self.position..end]
            .iter()
            .enumerate()
            .fold(0u8, |acc, (j, &bit)| acc | ((bit as u8) << j));
        self.position = end;
        Some(value)
    }

    /// Check if a full chunk remains
    pub fn has_chunks(&self) -> bool {
        self.position + BITS_PER_NOTE <= self.bits.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }
}
