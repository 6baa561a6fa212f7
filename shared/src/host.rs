use crate::{Dimensions, Surface};

/// Opaque identifier of a scheduled frame callback, as handed out by [`Host::request_frame()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// The platform a [`crate::Sparkles`] instance is mounted on. It measures the host
/// container, supplies the drawing surface, delivers viewport resize notifications and
/// schedules display-refresh callbacks.
///
/// A host never calls back into the component synchronously from any of these methods;
/// resize notifications and frames are delivered later through
/// [`crate::Sparkles::on_resize()`] and [`crate::Sparkles::on_frame()`].
pub trait Host {
    type Surface: Surface;

    /// Client size of the host container, or `None` while it is not attached.
    fn measure_container(&self) -> Option<Dimensions>;

    /// The drawing surface looked up by its identifier, or `None` if it does not exist
    /// (yet) or has no 2D context.
    fn surface(&mut self) -> Option<&mut Self::Surface>;

    fn subscribe_resize(&mut self);

    fn unsubscribe_resize(&mut self);

    /// Schedules the next frame. `None` if the platform refused.
    fn request_frame(&mut self) -> Option<FrameHandle>;

    fn cancel_frame(&mut self, handle: FrameHandle);
}
