use palette::{LinSrgb, Mix, Srgb};

/// Opaque color stored in a cell.
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

    fn to_linear(self) -> LinSrgb {
        Srgb::new(self.r, self.g, self.b)
            .into_format::<f32>()
            .into_linear()
    }
}

/// Color with straight (non-premultiplied) alpha, as handed to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Rgba {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Scale the alpha channel by `factor` (clamped to 0..=1).
    pub fn fade(self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        Self {
            a: (self.a as f32 * factor).round() as u8,
            ..self
        }
    }

    pub fn opacity(self) -> f32 {
        self.a as f32 / 255.0
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    pub const fn rgb_part(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Composite this color over `dst`, mixing in linear light.
    pub fn over(self, dst: Rgb) -> Rgb {
        match self.a {
            0 => dst,
            255 => self.rgb_part(),
            _ => {
                let mixed = dst.to_linear().mix(self.rgb_part().to_linear(), self.opacity());
                let out: Srgb<u8> = Srgb::<f32>::from_linear(mixed).into_format();
                Rgb::new(out.red, out.green, out.blue)
            }
        }
    }
}

impl From<Rgb> for Rgba {
    fn from(rgb: Rgb) -> Self {
        Self::rgb(rgb.r, rgb.g, rgb.b)
    }
}
