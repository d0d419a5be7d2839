//! Color representation for CAD entities

use once_cell::sync::Lazy;
use std::fmt;

/// Represents a color in AutoCAD
///
/// Colors can be represented in multiple ways:
/// - By index (0-256): AutoCAD Color Index (ACI)
/// - By RGB values: True color
/// - By layer: Use the layer's color
/// - By block: Use the block's color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Color by layer (index 256)
    #[default]
    ByLayer,
    /// Color by block (index 0)
    ByBlock,
    /// AutoCAD Color Index (1-255)
    Index(u8),
    /// True color with RGB values
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    /// Create a color from an AutoCAD Color Index
    pub fn from_index(index: i16) -> Self {
        match index {
            0 => Color::ByBlock,
            256 => Color::ByLayer,
            1..=255 => Color::Index(index as u8),
            // Negative means layer is off
            _ if index < 0 => Color::Index(index.unsigned_abs().min(255) as u8),
            _ => Color::Index(7),
        }
    }

    /// Create a true color from RGB values
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// Create a true color from a packed `0x00RRGGBB` value (group code 420)
    pub fn from_true_color(value: i64) -> Self {
        Color::Rgb {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    /// Get the color index (if applicable)
    pub fn index(&self) -> Option<u16> {
        match self {
            Color::ByBlock => Some(0),
            Color::Index(i) => Some(*i as u16),
            Color::ByLayer => Some(256),
            Color::Rgb { .. } => None,
        }
    }

    /// True for colors that name an actual color rather than deferring to
    /// the layer or the block
    pub fn is_concrete(&self) -> bool {
        matches!(self, Color::Index(_) | Color::Rgb { .. })
    }

    /// Channel values of a concrete color; `None` for ByLayer / ByBlock
    pub fn to_rgb(&self) -> Option<[u8; 3]> {
        match self {
            Color::Index(i) => Some(aci_to_rgb(*i)),
            Color::Rgb { r, g, b } => Some([*r, *g, *b]),
            Color::ByLayer | Color::ByBlock => None,
        }
    }

    /// Common color constants
    pub const RED: Color = Color::Index(1);
    pub const YELLOW: Color = Color::Index(2);
    pub const GREEN: Color = Color::Index(3);
    pub const CYAN: Color = Color::Index(4);
    pub const BLUE: Color = Color::Index(5);
    pub const MAGENTA: Color = Color::Index(6);
    pub const WHITE: Color = Color::Index(7);
    pub const GRAY: Color = Color::Index(8);
    pub const LIGHT_GRAY: Color = Color::Index(9);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::ByLayer => write!(f, "ByLayer"),
            Color::ByBlock => write!(f, "ByBlock"),
            Color::Index(i) => write!(f, "Index({})", i),
            Color::Rgb { r, g, b } => write!(f, "RGB({}, {}, {})", r, g, b),
        }
    }
}

/// Standard AutoCAD palette, indexed by ACI.
///
/// Indices 10..=249 are 24 hues in 15 degree steps. Each hue holds five
/// brightness levels, and each level comes as a saturated and a pale entry.
static ACI_PALETTE: Lazy<[[u8; 3]; 256]> = Lazy::new(|| {
    // (top, saturated ramp, pale floor, pale ramp) per brightness level
    const LEVELS: [(u8, [u8; 3], u8, [u8; 3]); 5] = [
        (0xFF, [0x3F, 0x7F, 0xBF], 0xAA, [0xBF, 0xD4, 0xEA]),
        (0xBD, [0x2E, 0x5E, 0x8D], 0x7E, [0x8D, 0x9D, 0xAD]),
        (0x81, [0x1F, 0x40, 0x60], 0x56, [0x60, 0x6B, 0x76]),
        (0x68, [0x19, 0x34, 0x4E], 0x45, [0x4E, 0x56, 0x5F]),
        (0x4F, [0x13, 0x27, 0x3B], 0x35, [0x3B, 0x42, 0x49]),
    ];
    const FIXED: [[u8; 3]; 10] = [
        [0x00, 0x00, 0x00],
        [0xFF, 0x00, 0x00],
        [0xFF, 0xFF, 0x00],
        [0x00, 0xFF, 0x00],
        [0x00, 0xFF, 0xFF],
        [0x00, 0x00, 0xFF],
        [0xFF, 0x00, 0xFF],
        [0xFF, 0xFF, 0xFF],
        [0x41, 0x41, 0x41],
        [0x80, 0x80, 0x80],
    ];
    const GRAYS: [u8; 6] = [0x33, 0x50, 0x69, 0x82, 0xBE, 0xFF];

    let mut palette = [[0u8; 3]; 256];
    palette[..10].copy_from_slice(&FIXED);

    for hue in 0..24usize {
        let sector = hue / 4;
        let step = hue % 4;
        for (level, (top, ramp, floor, pale_ramp)) in LEVELS.iter().enumerate() {
            for pale in [false, true] {
                let (low, ramp) = if pale { (*floor, pale_ramp) } else { (0, ramp) };
                let rising = if step == 0 { low } else { ramp[step - 1] };
                let falling = if step == 0 { *top } else { ramp[3 - step] };
                let rgb = match sector {
                    0 => [*top, rising, low],
                    1 => [falling, *top, low],
                    2 => [low, *top, rising],
                    3 => [low, falling, *top],
                    4 => [rising, low, *top],
                    _ => [*top, low, falling],
                };
                palette[10 + hue * 10 + level * 2 + usize::from(pale)] = rgb;
            }
        }
    }

    for (offset, gray) in GRAYS.iter().enumerate() {
        palette[250 + offset] = [*gray; 3];
    }
    palette
});

/// Convert an ACI index to its RGB triple
pub fn aci_to_rgb(index: u8) -> [u8; 3] {
    ACI_PALETTE[index as usize]
}
