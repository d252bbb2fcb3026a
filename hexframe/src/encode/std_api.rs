use crate::encode::Encoder;
use std::io::{self, Write};

/// Lets an [`Encoder`] be the sink of `io::copy` and friends. Writing never fails.
impl Write for Encoder {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Encoder::write(self, buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::encode::{encode, Encoder};
    use std::io;

    #[test]
    fn io_copy_into_encoder() {
        let payload = b"streamed through std::io".to_vec();

        let mut encoder = Encoder::new();
        let copied = io::copy(&mut payload.as_slice(), &mut encoder).unwrap();
        assert_eq!(copied, payload.len() as u64);

        assert!(encoder.finish() == encode(&payload));
    }
}
