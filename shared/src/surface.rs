use crate::Dimensions;

/// A 2D raster target the render loop paints into.
pub trait Surface {
    type Error: std::fmt::Debug;

    /// Resizes the backing pixel buffer.
    fn resize(&mut self, dimensions: Dimensions) -> Result<(), Self::Error>;

    /// Clears the whole surface and fills it with `color`.
    fn paint_background(&mut self, dimensions: Dimensions, color: &str)
        -> Result<(), Self::Error>;

    fn fill_circle(
        &mut self,
        center: (f64, f64),
        radius: f64,
        color: &str,
    ) -> Result<(), Self::Error>;

    /// Applies a blur filter to subsequent paint operations. Never called with `0`.
    fn set_blur(&mut self, radius: f64) -> Result<(), Self::Error>;

    fn reset_filter(&mut self) -> Result<(), Self::Error>;
}
