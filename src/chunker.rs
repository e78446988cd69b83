use crossbeam_channel::Sender;
use tracing::debug;

/// Half-open byte range `[start, end)` into the shared buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub start: usize,
    pub end: usize,
}

impl Chunk {
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Line-aligned partition of a buffer into pieces of roughly `piece_size` bytes.
pub struct Chunks<'a> {
    data: &'a [u8],
    piece_size: usize,
    offset: usize,
}

pub fn chunks(data: &[u8], piece_size: usize) -> Chunks<'_> {
    Chunks {
        data,
        piece_size: piece_size.max(1),
        offset: 0,
    }
}

impl Iterator for Chunks<'_> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        let len = self.data.len();
        if self.offset >= len {
            return None;
        }
        let start = self.offset;
        let end = if self.piece_size >= len - start {
            len
        } else {
            // extend to the next terminator and swallow it
            let pos = start + self.piece_size;
            match memchr::memchr(b'\n', &self.data[pos..]) {
                Some(i) => pos + i + 1,
                None => len,
            }
        };
        self.offset = end;
        Some(Chunk { start, end })
    }
}

/// Pushes every chunk of `data` into the queue, then closes it by dropping
/// the sender. Stops early if no receiver is left. Returns the number of
/// chunks delivered.
pub fn cut_file(data: &[u8], piece_size: usize, tx: Sender<Chunk>) -> usize {
    let mut sent = 0;
    for chunk in chunks(data, piece_size) {
        if tx.send(chunk).is_err() {
            debug!(sent, "all workers gone, chunker stopping early");
            break;
        }
        sent += 1;
    }
    debug!(sent, bytes = data.len(), "chunker done");
    sent
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_partition(data: &[u8], piece_size: usize) {
        let all: Vec<Chunk> = chunks(data, piece_size).collect();
        let mut expected_start = 0;
        for (i, chunk) in all.iter().enumerate() {
            assert!(!chunk.is_empty());
            assert_eq!(chunk.start, expected_start, "gap or overlap at chunk {}", i);
            if chunk.start > 0 {
                assert_eq!(data[chunk.start - 1], b'\n');
            }
            if i + 1 < all.len() {
                assert_eq!(data[chunk.end - 1], b'\n');
            }
            expected_start = chunk.end;
        }
        assert_eq!(expected_start, data.len());
    }

    #[test]
    fn test_covers_buffer_for_many_piece_sizes() {
        let data = b"Paris;12.3\nLyon;-2.5\nA;0.0\nSaint-Etienne;-10.1\nNice;33.3\nB;1.0\n";
        for piece_size in 1..=data.len() + 3 {
            assert_partition(data, piece_size);
        }
    }

    #[test]
    fn test_exact_multiple_of_piece_size() {
        // 4 lines of 7 bytes; a 14 byte piece ends exactly on a line start
        let data = b"AA;1.0\nBB;2.0\nCC;3.0\nDD;4.0\n";
        assert_eq!(data.len(), 28);
        let all: Vec<Chunk> = chunks(data, 14).collect();
        assert_eq!(all, vec![Chunk { start: 0, end: 21 }, Chunk { start: 21, end: 28 }]);

        let data = b"AB;1.0\nCD;2.0\n";
        let all: Vec<Chunk> = chunks(data, 7).collect();
        assert_eq!(all, vec![Chunk { start: 0, end: 14 }]);
        assert_partition(data, 7);
    }

    #[test]
    fn test_whole_buffer_when_piece_is_large() {
        let data = b"A;1.0\nB;2.0\n";
        let all: Vec<Chunk> = chunks(data, 4 * 1024 * 1024).collect();
        assert_eq!(all, vec![Chunk { start: 0, end: data.len() }]);
    }

    #[test]
    fn test_unterminated_tail() {
        let data = b"A;1.0\nB;2.0";
        assert_partition(data, 2);
        let last = chunks(data, 2).last().unwrap();
        assert_eq!(last.end, data.len());
    }

    #[test]
    fn test_empty_buffer() {
        assert_eq!(chunks(b"", 16).count(), 0);
    }

    #[test]
    fn test_cut_file_closes_queue() {
        let data = b"A;1.0\nB;2.0\nC;3.0\n";
        let (tx, rx) = crossbeam_channel::bounded(16);
        let sent = cut_file(data, 4, tx);
        let received: Vec<Chunk> = rx.iter().collect();
        assert_eq!(received.len(), sent);
        assert_eq!(received.last().unwrap().end, data.len());
    }

    #[test]
    fn test_cut_file_stops_without_receivers() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        drop(rx);
        assert_eq!(cut_file(b"A;1.0\nB;2.0\n", 1, tx), 0);
    }
}
