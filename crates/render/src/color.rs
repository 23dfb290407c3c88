//! Color types shared by every sink.
//!
//! The wire format is RGB565 (what the panel consumes). Sinks that store a
//! deeper format expand each channel by bit replication so that a full-scale
//! 5/6-bit channel maps to 255 and zero maps to zero.

/// 16-bit packed color: 5 bits red, 6 bits green, 5 bits blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const BLACK: Rgb565 = Rgb565(0x0000);
    pub const WHITE: Rgb565 = Rgb565(0xFFFF);
    pub const RED: Rgb565 = Rgb565(0xF800);
    pub const GREEN: Rgb565 = Rgb565(0x07E0);
    pub const BLUE: Rgb565 = Rgb565(0x001F);
    pub const YELLOW: Rgb565 = Rgb565(0xFFE0);

    /// Pack from raw channel values (r: 0..=31, g: 0..=63, b: 0..=31).
    pub const fn from_channels(r: u8, g: u8, b: u8) -> Self {
        Self((((r & 0x1F) as u16) << 11) | (((g & 0x3F) as u16) << 5) | ((b & 0x1F) as u16))
    }

    pub const fn channels(self) -> (u8, u8, u8) {
        let r = ((self.0 >> 11) & 0x1F) as u8;
        let g = ((self.0 >> 5) & 0x3F) as u8;
        let b = (self.0 & 0x1F) as u8;
        (r, g, b)
    }

    /// Big-endian byte pair, the order the panel expects on the bus.
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// Expand to 8 bits per channel.
    pub const fn to_rgb(self) -> Rgb {
        let (r, g, b) = self.channels();
        Rgb {
            r: (r << 3) | (r >> 2),
            g: (g << 2) | (g >> 4),
            b: (b << 3) | (b >> 2),
        }
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb565> for Rgb {
    fn from(c: Rgb565) -> Self {
        c.to_rgb()
    }
}
