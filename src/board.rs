//! Target board profiles.

/// Describes one supported target board: how to find it on the bus and where
/// its bootloader expects images to land.
///
/// Supporting another board of the same bootloader family means adding a
/// profile, not changing code.
#[derive(Clone, Copy, Debug)]
pub struct BoardProfile {
    /// Short board name, used in diagnostics.
    pub name: &'static str,

    /// USB vendor id the bootloader enumerates with.
    pub vendor_id: u16,

    /// USB product id the bootloader enumerates with.
    pub product_id: u16,

    /// Bulk-out endpoint address the download frame is written to.
    pub ep_out: u8,

    /// Bulk-in endpoint address of the bootloader interface.
    pub ep_in: u8,

    /// RAM base address, the default load address for images.
    pub ram_base: u32,
}

/// The JZ2440 (S3C2440) development board.
pub const JZ2440: BoardProfile = BoardProfile {
    name: "JZ2440",
    vendor_id: 0x5345,
    product_id: 0x1234,
    ep_out: 0x03,
    ep_in: 0x81,
    ram_base: 0x3000_0000,
};

impl Default for BoardProfile {
    fn default() -> Self {
        JZ2440
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jz2440_endpoint_directions() {
        // Bit 7 of the endpoint address is the direction flag.
        assert_eq!(JZ2440.ep_in & 0x80, 0x80);
        assert_eq!(JZ2440.ep_out & 0x80, 0x00);
    }

    #[test]
    fn default_profile_is_jz2440() {
        let profile = BoardProfile::default();
        assert_eq!(profile.vendor_id, 0x5345);
        assert_eq!(profile.product_id, 0x1234);
        assert_eq!(profile.ram_base, 0x3000_0000);
    }
}
