//! Chunked transfer of an assembled frame to the target.

use std::time::Duration;

use crate::error::{Error, Result};
use crate::frame::DownloadFrame;
use crate::TIMEOUT;

/// Number of bytes handed to the bulk endpoint per write. Matches the packet
/// batching the bootloader expects; not configurable.
pub const CHUNK_SIZE: usize = 512;

/// The write capability the transfer loop drives.
///
/// Implemented by [`TargetHandle`] for real hardware; tests substitute their
/// own implementations.
///
/// [`TargetHandle`]: struct.TargetHandle.html
pub trait BulkWrite {
    /// Writes `data` to the bulk-out endpoint, blocking for at most
    /// `timeout`, and returns the number of bytes actually transferred.
    fn write(&mut self, data: &[u8], timeout: Duration) -> Result<usize>;
}

pub trait Operation: Iterator<Item = Result<usize>> {
    /// Total number of bytes the operation will transfer.
    fn total(&self) -> usize;

    /// Runs the operation to completion, discarding progress information.
    fn execute(&mut self) -> Result<()> {
        if let Some(Err(error)) = self.last() {
            Err(error)
        } else {
            Ok(())
        }
    }
}

/// Streams a [`DownloadFrame`] to the target in [`CHUNK_SIZE`] pieces.
///
/// Each call to `next` writes one chunk and yields the cumulative number of
/// bytes transferred. A failed or short write is yielded once as an error,
/// after which the iterator is fused; no further chunks are attempted.
pub struct Download<'d, 'w, W: BulkWrite> {
    sink: &'w mut W,
    frame: &'d DownloadFrame,
    remaining: usize,
    done: bool,
}

impl<'d, 'w, W: BulkWrite> Download<'d, 'w, W> {
    /// Prepares a transfer of `frame` through `sink`.
    pub fn over(sink: &'w mut W, frame: &'d DownloadFrame) -> Self {
        Self {
            sink,
            frame,
            remaining: frame.len(),
            done: false,
        }
    }
}

impl<W: BulkWrite> Operation for Download<'_, '_, W> {
    fn total(&self) -> usize {
        self.frame.len()
    }
}

impl<W: BulkWrite> Iterator for Download<'_, '_, W> {
    type Item = Result<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let total = self.frame.len();
        let to_write = self.remaining.min(CHUNK_SIZE);
        let offset = total - self.remaining;
        let chunk = &self.frame.as_bytes()[offset..offset + to_write];

        Some(match self.sink.write(chunk, TIMEOUT) {
            Ok(written) if written == to_write => {
                self.remaining -= to_write;
                if self.remaining == 0 {
                    self.done = true;
                }
                log::trace!("wrote chunk at offset {}: {} bytes", offset, to_write);
                Ok(total - self.remaining)
            }
            Ok(written) => {
                self.done = true;
                Err(Error::ShortWrite {
                    requested: to_write,
                    written,
                })
            }
            Err(error) => {
                self.done = true;
                Err(error)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::DownloadFrame;

    /// Records every chunk it is handed. `fail_on_call` makes the nth write
    /// come back short by one byte.
    struct MockSink {
        written: Vec<u8>,
        chunk_sizes: Vec<usize>,
        calls: usize,
        fail_on_call: Option<usize>,
    }

    impl MockSink {
        fn new() -> Self {
            Self {
                written: Vec::new(),
                chunk_sizes: Vec::new(),
                calls: 0,
                fail_on_call: None,
            }
        }

        fn failing_on(call: usize) -> Self {
            Self {
                fail_on_call: Some(call),
                ..Self::new()
            }
        }
    }

    impl BulkWrite for MockSink {
        fn write(&mut self, data: &[u8], _timeout: Duration) -> Result<usize> {
            self.calls += 1;
            if self.fail_on_call == Some(self.calls) {
                return Ok(data.len() - 1);
            }
            self.written.extend_from_slice(data);
            self.chunk_sizes.push(data.len());
            Ok(data.len())
        }
    }

    fn frame_with_total(total: usize) -> DownloadFrame {
        let payload = vec![0x5A; total - crate::frame::FRAME_OVERHEAD];
        DownloadFrame::new(&payload, 0x3000_0000).unwrap()
    }

    #[test]
    fn chunk_sequence_for_1500_bytes() {
        let frame = frame_with_total(1500);
        let mut sink = MockSink::new();

        let progress: Vec<usize> = Download::over(&mut sink, &frame)
            .map(|step| step.unwrap())
            .collect();

        assert_eq!(sink.chunk_sizes, [512, 512, 476]);
        assert_eq!(progress, [512, 1024, 1500]);

        let percentages: Vec<usize> = progress.iter().map(|written| written * 100 / 1500).collect();
        assert_eq!(percentages, [34, 68, 100]);
    }

    #[test]
    fn short_frame_is_a_single_chunk() {
        let frame = frame_with_total(20);
        let mut sink = MockSink::new();

        Download::over(&mut sink, &frame).execute().unwrap();

        assert_eq!(sink.chunk_sizes, [20]);
    }

    #[test]
    fn execute_delivers_frame_verbatim() {
        let frame = frame_with_total(1500);
        let mut sink = MockSink::new();

        Download::over(&mut sink, &frame).execute().unwrap();

        assert_eq!(sink.written, frame.as_bytes());
    }

    #[test]
    fn short_write_aborts_immediately() {
        let frame = frame_with_total(1500);
        let mut sink = MockSink::failing_on(2);
        let mut download = Download::over(&mut sink, &frame);

        assert_eq!(download.next().unwrap().unwrap(), 512);
        match download.next().unwrap() {
            Err(Error::ShortWrite { requested, written }) => {
                assert_eq!(requested, 512);
                assert_eq!(written, 511);
            }
            other => panic!("expected a short-write error, got {:?}", other),
        }
        assert!(download.next().is_none());

        // The failing write must be the last one to reach the sink.
        assert_eq!(sink.calls, 2);
        assert_eq!(sink.written.len(), 512);
    }

    #[test]
    fn execute_reports_short_write() {
        let frame = frame_with_total(1500);
        let mut sink = MockSink::failing_on(1);

        match Download::over(&mut sink, &frame).execute() {
            Err(Error::ShortWrite { .. }) => {}
            other => panic!("expected a short-write error, got {:?}", other),
        }
        assert_eq!(sink.calls, 1);
    }

    #[test]
    fn total_is_the_frame_length() {
        let frame = frame_with_total(1500);
        let mut sink = MockSink::new();
        assert_eq!(Download::over(&mut sink, &frame).total(), 1500);
    }
}
