/// Image table keyed by tile type and variant.
pub trait AssetLookup {
    /// Drawable handed to the surface.
    type Image;

    /// Image for `(kind, variant)`, `None` if the table has none.
    fn image(&self, kind: &str, variant: usize) -> Option<&Self::Image>;
}

/// Pixel-space target with a top-left origin.
pub trait DrawSurface {
    /// Drawable accepted by [`blit`](Self::blit).
    type Image;

    /// Width in pixels.
    fn width(&self) -> f32;
    /// Height in pixels.
    fn height(&self) -> f32;
    /// Draws `image` with its top-left corner at `(x, y)`.
    fn blit(&mut self, image: &Self::Image, x: f32, y: f32);
}
