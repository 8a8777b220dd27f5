//! This crate talks to the USB download bootloader of S3C24xx-family boards.
//!
//! The bootloader accepts a single framed image on its bulk-out endpoint: an
//! 8-byte header carrying the load address and total length, the raw image
//! bytes, and a 16-bit additive checksum trailer. This crate assembles that
//! frame and streams it to the board in 512-byte chunks.
//!
//! # Example: downloading an image
//! ```rust, no_run
//! use usbdl::{BoardProfile, Context, Download, DownloadFrame, Operation};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let profile = BoardProfile::default();
//!
//! // Find and open the target board
//! let context = Context::new()?;
//! let mut handle = context.find_target(&profile)?.open(&context, &profile)?;
//!
//! // Frame the image for the board's RAM base
//! let frame = DownloadFrame::from_file("image.bin", profile.ram_base)?;
//!
//! // Stream it to the bulk endpoint
//! Download::over(&mut handle, &frame).execute()?;
//!
//! println!("Done!");
//! # Ok(())
//! # }
//! ```
//!
//! In addition to this very basic API, progress feedback during the transfer
//! is available by iterating [`Download`] instead of calling
//! [`Operation::execute`]: every yielded item is the cumulative byte count
//! after one chunk.
//!
//! [`Download`]: struct.Download.html
//! [`Operation::execute`]: trait.Operation.html#method.execute

mod board;
mod context;
mod download;
mod error;
mod frame;
mod target;
mod target_handle;

pub use board::{BoardProfile, JZ2440};
pub use context::{Context, UsbContext};
pub use download::{BulkWrite, Download, Operation, CHUNK_SIZE};
pub use error::{Error, Result};
pub use frame::{checksum, DownloadFrame, FRAME_OVERHEAD, HEADER_LEN, TRAILER_LEN};
pub use target::TargetInfo;
pub use target_handle::TargetHandle;

/// Timeout for each bulk write to the target.
pub const TIMEOUT: std::time::Duration = std::time::Duration::from_millis(3000);
