//! RGB indicator trait

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const OFF: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale each channel by `brightness / 255`
    pub fn scale(self, brightness: u8) -> Rgb {
        let scale = |c: u8| ((c as u16 * brightness as u16) / 255) as u8;
        Rgb::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

/// Single RGB status LED
///
/// Follows the display cadence: `clear`, optionally `set_color`, then
/// `flush` once per tick.
pub trait Indicator {
    fn clear(&mut self);

    fn set_color(&mut self, color: Rgb);

    /// Latch the pending colour onto the LED
    fn flush(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale() {
        assert_eq!(Rgb::new(255, 128, 0).scale(255), Rgb::new(255, 128, 0));
        assert_eq!(Rgb::new(255, 128, 0).scale(0), Rgb::OFF);
        assert_eq!(Rgb::new(200, 100, 50).scale(128), Rgb::new(100, 50, 25));
    }
}
