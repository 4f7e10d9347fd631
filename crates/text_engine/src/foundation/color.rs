//! 32-bit RGBA color type and the fixed terminal palette
//!
//! Colors are stored as a single `u32` with the red channel in the least
//! significant byte, matching the byte order expected by interleaved
//! vertex buffers on little-endian hosts.

use bytemuck::{Pod, Zeroable};

/// 32-bit RGBA color, packed `0xAABBGGRR`.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct Color32(pub u32);

impl Color32 {
    /// Opaque black
    pub const BLACK: Self = Self(0xff00_0000);
    /// Opaque white
    pub const WHITE: Self = Self(0xffff_ffff);
    /// Mid grey
    pub const GREY: Self = Self(0xff80_8080);
    /// Light grey
    pub const LIGHT_GREY: Self = Self(0xffc0_c0c0);
    /// Dark grey
    pub const DARK_GREY: Self = Self(0xff40_4040);
    /// Pure red
    pub const RED: Self = Self(0xff00_00ff);
    /// Light red
    pub const LIGHT_RED: Self = Self(0xff67_17ff);
    /// Dark red
    pub const DARK_RED: Self = Self(0xff40_40c0);
    /// Pure green
    pub const GREEN: Self = Self(0xff00_ff00);
    /// Light green
    pub const LIGHT_GREEN: Self = Self(0xff60_ffa0);
    /// Dark green
    pub const DARK_GREEN: Self = Self(0xff00_8000);
    /// Pure blue
    pub const BLUE: Self = Self(0xffff_0000);
    /// Light blue
    pub const LIGHT_BLUE: Self = Self(0xffff_a060);
    /// Dark blue
    pub const DARK_BLUE: Self = Self(0xff80_0000);
    /// Yellow
    pub const YELLOW: Self = Self(0xff00_ffff);
    /// Orange
    pub const ORANGE: Self = Self(0xff3a_96c4);

    /// Create a color from individual channel values.
    #[must_use]
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(u32::from_le_bytes([r, g, b, a]))
    }

    /// Red channel
    #[must_use]
    pub const fn r(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// Green channel
    #[must_use]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }

    /// Blue channel
    #[must_use]
    pub const fn b(self) -> u8 {
        ((self.0 >> 16) & 0xff) as u8
    }

    /// Alpha channel
    #[must_use]
    pub const fn a(self) -> u8 {
        ((self.0 >> 24) & 0xff) as u8
    }
}

impl Default for Color32 {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Fixed 16-entry palette used by inline `^NN` color escapes.
///
/// The index layout is a stable part of the public contract; text that
/// embeds escapes relies on these exact slots.
pub const PALETTE: [Color32; 16] = [
    Color32::WHITE,       // 0
    Color32::RED,         // 1
    Color32::GREEN,       // 2
    Color32::LIGHT_GREEN, // 3
    Color32::DARK_GREEN,  // 4
    Color32::BLUE,        // 5
    Color32::LIGHT_BLUE,  // 6
    Color32::YELLOW,      // 7
    Color32::GREY,        // 8
    Color32::BLACK,       // 9
    Color32::LIGHT_GREY,  // 10
    Color32::DARK_GREY,   // 11
    Color32::LIGHT_RED,   // 12
    Color32::DARK_RED,    // 13
    Color32::DARK_BLUE,   // 14
    Color32::ORANGE,      // 15
];
