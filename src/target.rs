use rusb::UsbContext;

use crate::board::BoardProfile;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::target_handle::TargetHandle;

/// Contains necessary information to connect to a located target via USB.
pub struct TargetInfo {
    /// USB bus id the target is connected to.
    pub usb_bus_number: u8,

    /// USB device address of the target.
    pub usb_bus_address: u8,
}

impl TargetInfo {
    /// Opens the located device and claims its bootloader interface.
    ///
    /// The device descriptor is checked against the profile again before
    /// opening, so a device that disappeared or re-enumerated between
    /// [`Context::find_target`] and this call is reported as not found
    /// rather than written to blindly.
    pub fn open(
        &self,
        context: &Context,
        profile: &BoardProfile,
    ) -> Result<TargetHandle<rusb::Context>> {
        for device in context.usb_context.devices()?.iter() {
            if device.bus_number() == self.usb_bus_number
                && device.address() == self.usb_bus_address
            {
                let descriptor = device.device_descriptor()?;
                if descriptor.vendor_id() != profile.vendor_id
                    || descriptor.product_id() != profile.product_id
                {
                    return Err(Error::TargetNotFound);
                }
                return TargetHandle::from_usb_device(device, profile);
            }
        }

        Err(Error::TargetNotFound)
    }
}
