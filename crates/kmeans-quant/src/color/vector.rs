//! ColorVector: one pixel color as a point in 3-D real space.

/// A pixel color expressed as a 3-dimensional real-valued point.
///
/// This is the unit the clustering algorithm operates on. Components are
/// nominally in `0.0..=255.0` (the 8-bit channel range) but nothing in the
/// clustering math assumes that bound; only [`to_bytes()`](Self::to_bytes)
/// clamps.
///
/// # Example
///
/// ```
/// use kmeans_quant::ColorVector;
///
/// let orange = ColorVector::from_packed(0x00FF_8000);
/// assert_eq!(orange, ColorVector::from_u8(255, 128, 0));
/// assert_eq!(orange.to_hex(), "#ff8000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorVector {
    /// Red component
    pub r: f64,
    /// Green component
    pub g: f64,
    /// Blue component
    pub b: f64,
}

impl ColorVector {
    /// Create a new vector from real components.
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create a vector from 8-bit channel values.
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64,
            g: g as f64,
            b: b as f64,
        }
    }

    /// Create a vector from a byte array `[R, G, B]`.
    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::from_u8(bytes[0], bytes[1], bytes[2])
    }

    /// Unpack a `0xAARRGGBB` (or `0x00RRGGBB`) integer.
    ///
    /// The alpha byte is ignored.
    #[inline]
    pub fn from_packed(argb: u32) -> Self {
        Self::from_bytes(unpack_rgb(argb))
    }

    /// Squared Euclidean distance to `other`.
    ///
    /// Ordering by squared distance is the same as ordering by distance, so
    /// all nearest-centroid comparisons use this form.
    #[inline]
    pub fn squared_distance(&self, other: &ColorVector) -> f64 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        dr * dr + dg * dg + db * db
    }

    /// True Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: &ColorVector) -> f64 {
        self.squared_distance(other).sqrt()
    }

    /// Returns true if every component is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }

    /// Convert to an 8-bit `[R, G, B]` triple.
    ///
    /// Each channel is rounded half up (`floor(x + 0.5)`, so 127.5 becomes
    /// 128) and then clamped to `0..=255`.
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [
            round_channel(self.r),
            round_channel(self.g),
            round_channel(self.b),
        ]
    }

    /// Convert to a `0x00RRGGBB` integer using [`to_bytes()`](Self::to_bytes).
    #[inline]
    pub fn to_packed(self) -> u32 {
        pack_rgb(self.to_bytes())
    }

    /// Lowercase `#rrggbb` string of the rounded color.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_bytes();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Bit pattern of the components, usable as a hash key for exact
    /// deduplication.
    #[inline]
    pub(crate) fn key(&self) -> [u64; 3] {
        [self.r.to_bits(), self.g.to_bits(), self.b.to_bits()]
    }
}

impl From<[u8; 3]> for ColorVector {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

/// Round half up and clamp to the 8-bit range. NaN maps to 0.
#[inline]
fn round_channel(value: f64) -> u8 {
    (value + 0.5).floor().clamp(0.0, 255.0) as u8
}

/// Split a packed `0xAARRGGBB` integer into `[R, G, B]`.
#[inline]
pub fn unpack_rgb(argb: u32) -> [u8; 3] {
    [
        ((argb & 0x00ff_0000) >> 16) as u8,
        ((argb & 0x0000_ff00) >> 8) as u8,
        (argb & 0x0000_00ff) as u8,
    ]
}

/// Pack `[R, G, B]` into `0x00RRGGBB`.
#[inline]
pub fn pack_rgb(rgb: [u8; 3]) -> u32 {
    ((rgb[0] as u32) << 16) | ((rgb[1] as u32) << 8) | rgb[2] as u32
}
