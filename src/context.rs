use crate::board::BoardProfile;
use crate::error::{Error, Result};
use crate::target::TargetInfo;

pub use rusb::UsbContext;

/// Entry point for locating a target board on the USB buses.
pub struct Context {
    pub(crate) usb_context: rusb::Context,
}

impl Context {
    pub fn new() -> Result<Self> {
        let usb_context = rusb::Context::new()?;
        Ok(Context { usb_context })
    }

    /// Scans all buses and returns the first device whose descriptor matches
    /// the profile's vendor and product ids. Devices whose descriptor cannot
    /// be read are skipped.
    pub fn find_target(&self, profile: &BoardProfile) -> Result<TargetInfo> {
        for device in self.usb_context.devices()?.iter() {
            let descriptor = match device.device_descriptor() {
                Ok(descriptor) => descriptor,
                Err(_) => continue,
            };

            log::debug!(
                "bus {:03} device {:03}: {:04x}:{:04x}",
                device.bus_number(),
                device.address(),
                descriptor.vendor_id(),
                descriptor.product_id()
            );

            if descriptor.vendor_id() == profile.vendor_id
                && descriptor.product_id() == profile.product_id
            {
                return Ok(TargetInfo {
                    usb_bus_number: device.bus_number(),
                    usb_bus_address: device.address(),
                });
            }
        }

        Err(Error::TargetNotFound)
    }
}
