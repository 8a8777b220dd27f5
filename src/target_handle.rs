use std::time::Duration;

use rusb::{Device, DeviceHandle, UsbContext};

use crate::board::BoardProfile;
use crate::download::BulkWrite;
use crate::error::{Error, Result};

/// An open, claimed connection to the target's bootloader.
///
/// The bootloader interface stays claimed for the lifetime of the handle and
/// is released when the handle is dropped, on success and failure paths
/// alike.
pub struct TargetHandle<T: UsbContext> {
    usb_device_handle: DeviceHandle<T>,
    profile: BoardProfile,
}

impl<T: UsbContext> TargetHandle<T> {
    /// Opens `device` and claims interface 0 for the transfer.
    pub(crate) fn from_usb_device(device: Device<T>, profile: &BoardProfile) -> Result<Self> {
        let mut usb_device_handle = device.open().map_err(Error::OpenFailed)?;
        usb_device_handle
            .claim_interface(0)
            .map_err(Error::ClaimInterface)?;

        log::debug!(
            "opened {} target on bus {:03} device {:03}",
            profile.name,
            device.bus_number(),
            device.address()
        );

        Ok(Self {
            usb_device_handle,
            profile: *profile,
        })
    }

    /// The board profile this handle was opened with.
    pub fn profile(&self) -> &BoardProfile {
        &self.profile
    }
}

impl<T: UsbContext> BulkWrite for TargetHandle<T> {
    fn write(&mut self, data: &[u8], timeout: Duration) -> Result<usize> {
        let written = self
            .usb_device_handle
            .write_bulk(self.profile.ep_out, data, timeout)?;

        log::trace!(
            "bulk out 0x{:02x}: accepted {} of {} bytes",
            self.profile.ep_out,
            written,
            data.len()
        );

        Ok(written)
    }
}

impl<T: UsbContext> Drop for TargetHandle<T> {
    fn drop(&mut self) {
        // Nothing useful can be done about a failed release here.
        let _ = self.usb_device_handle.release_interface(0);
    }
}
