/// Split off the first line of `src`, terminator included.
///
/// When no `\n` is present the whole buffer comes back as the line and the
/// rest is empty, so a line cut by the end of a read chunk is emitted as-is
/// and picks up again at the advanced source offset on the next read.
/// An empty line means the buffer is exhausted.
pub fn next_line(src: &[u8]) -> (&[u8], &[u8]) {
    match src.iter().position(|&b| b == b'\n') {
        Some(i) => src.split_at(i + 1),
        None => (src, &src[src.len()..]),
    }
}

/// Iterator over the lines of a chunk, as produced by [`next_line`].
pub struct Lines<'a> {
    rest: &'a [u8],
}

impl<'a> Lines<'a> {
    pub fn new(chunk: &'a [u8]) -> Self {
        Self { rest: chunk }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let (line, rest) = next_line(self.rest);
        if line.is_empty() {
            return None;
        }
        self.rest = rest;
        Some(line)
    }
}
