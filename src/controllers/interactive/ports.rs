//! Narrow contract between the loop and the presentation collaborator.

/// A fully rendered frame, RGBA8 row-major with opaque alpha. Ownership
/// transfers to the presenter; the core never touches it again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaFrame {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// The presentation side owns device upload, drawing and vsync; it is
/// handed each completed frame exactly once and re-blits the current one
/// on its own schedule.
pub trait PresenterPort {
    fn present(&mut self, frame: RgbaFrame);
}
