use bytes::{BufMut, Bytes, BytesMut};

const INITIAL_BUFFER_CAPACITY: usize = 64;

/// Appends bytes to a growable buffer.
#[derive(Debug, Clone)]
pub struct WriteCursor {
    buf: BytesMut,
}

impl WriteCursor {
    /// Create an empty cursor.
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_BUFFER_CAPACITY)
    }

    /// Create an empty cursor with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Append a block of bytes.
    pub fn write_buffer(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    /// Append a single unsigned byte.
    pub fn write_u8(&mut self, byte: u8) {
        self.buf.put_u8(byte);
    }

    /// Append a single signed byte.
    pub fn write_i8(&mut self, byte: i8) {
        self.buf.put_i8(byte);
    }

    /// Run `op` and discard everything it wrote if it fails.
    pub fn rollback_on_error<T, E>(
        &mut self,
        op: impl FnOnce(&mut Self) -> std::result::Result<T, E>,
    ) -> std::result::Result<T, E> {
        let start = self.buf.len();
        let result = op(self);
        if result.is_err() {
            self.buf.truncate(start);
        }
        result
    }

    /// The bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Freeze the written bytes into an immutable buffer.
    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }

    /// Consume the cursor and return the inner buffer.
    pub fn into_inner(self) -> BytesMut {
        self.buf
    }
}

impl Default for WriteCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl From<BytesMut> for WriteCursor {
    fn from(buf: BytesMut) -> Self {
        Self { buf }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_append_in_order() {
        let mut cursor = WriteCursor::new();
        cursor.write_buffer(b"ab");
        cursor.write_u8(0);
        cursor.write_i8(-1);

        assert_eq!(cursor.len(), 4);
        assert_eq!(cursor.as_slice(), &[b'a', b'b', 0x00, 0xFF]);
    }

    #[test]
    fn rollback_truncates_partial_write() {
        let mut cursor = WriteCursor::new();
        cursor.write_buffer(b"keep");

        let result: Result<(), &str> = cursor.rollback_on_error(|c| {
            c.write_buffer(b"discard");
            Err("failed")
        });

        assert!(result.is_err());
        assert_eq!(cursor.as_slice(), b"keep");
    }

    #[test]
    fn freeze_and_into_inner() {
        let mut cursor = WriteCursor::from(BytesMut::from(&b"x"[..]));
        cursor.write_u8(b'y');
        assert_eq!(cursor.clone().freeze().as_ref(), b"xy");
        assert_eq!(cursor.into_inner().as_ref(), b"xy");
    }
}
