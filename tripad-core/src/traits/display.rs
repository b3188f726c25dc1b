//! Status display trait

/// Errors that can occur while rendering a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Text did not fit the line buffer
    Overflow,
}

/// Two-line monochrome status display with a progress bar
///
/// The controller calls `clear`, then the draw methods, then `flush`
/// exactly once per tick. Nothing reaches the panel before `flush`.
pub trait StatusDisplay {
    /// Clear the frame buffer
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw the two caption lines
    fn draw_lines(&mut self, line1: &str, line2: &str) -> Result<(), DisplayError>;

    /// Draw a horizontal bar along the bottom edge, `width` pixels long
    fn draw_progress(&mut self, width: u8) -> Result<(), DisplayError>;

    /// Push the frame buffer to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;
}
