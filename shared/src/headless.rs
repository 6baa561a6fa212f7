//! A [`Host`] without a display: the container size is set by hand, frames fire only when
//! asked to, and every paint operation is recorded.

use std::{collections::VecDeque, convert::Infallible};

use crate::{Dimensions, FrameHandle, Host, Sparkles, Surface};

/// One recorded paint operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Resize(Dimensions),
    Background {
        dimensions: Dimensions,
        color: String,
    },
    Circle {
        center: (f64, f64),
        radius: f64,
        color: String,
    },
    Blur(f64),
    ResetFilter,
}

impl Paint {
    pub fn kind(&self) -> &'static str {
        match self {
            Paint::Resize(_) => "resize",
            Paint::Background { .. } => "background",
            Paint::Circle { .. } => "circle",
            Paint::Blur(_) => "blur",
            Paint::ResetFilter => "reset",
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<Paint>,
    size: Dimensions,
}

impl RecordingSurface {
    pub fn new() -> RecordingSurface {
        RecordingSurface::default()
    }

    pub fn ops(&self) -> &[Paint] {
        &self.ops
    }

    /// Size of the backing buffer.
    pub fn size(&self) -> Dimensions {
        self.size
    }

    pub fn backgrounds(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Paint::Background { .. }))
            .count()
    }

    /// Circles painted since the last background, i.e. the most recent frame.
    pub fn last_frame(&self) -> Vec<(f64, f64)> {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, Paint::Background { .. }))
            .map_or(0, |index| index + 1);

        self.ops[start..]
            .iter()
            .filter_map(|op| match op {
                Paint::Circle { center, .. } => Some(*center),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl Surface for RecordingSurface {
    type Error = Infallible;

    fn resize(&mut self, dimensions: Dimensions) -> Result<(), Self::Error> {
        self.size = dimensions;
        self.ops.push(Paint::Resize(dimensions));
        Ok(())
    }

    fn paint_background(
        &mut self,
        dimensions: Dimensions,
        color: &str,
    ) -> Result<(), Self::Error> {
        self.ops.push(Paint::Background {
            dimensions,
            color: color.to_string(),
        });
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: (f64, f64),
        radius: f64,
        color: &str,
    ) -> Result<(), Self::Error> {
        self.ops.push(Paint::Circle {
            center,
            radius,
            color: color.to_string(),
        });
        Ok(())
    }

    fn set_blur(&mut self, radius: f64) -> Result<(), Self::Error> {
        self.ops.push(Paint::Blur(radius));
        Ok(())
    }

    fn reset_filter(&mut self) -> Result<(), Self::Error> {
        self.ops.push(Paint::ResetFilter);
        Ok(())
    }
}

#[derive(Debug)]
pub struct HeadlessHost {
    container: Option<Dimensions>,
    surface: Option<RecordingSurface>,
    resize_subscriptions: usize,
    pending: VecDeque<FrameHandle>,
    cancelled: usize,
    next_handle: i32,
}

impl HeadlessHost {
    pub fn new(container: Dimensions) -> HeadlessHost {
        HeadlessHost {
            surface: Some(RecordingSurface::new()),
            ..HeadlessHost::without_surface(container)
        }
    }

    pub fn without_surface(container: Dimensions) -> HeadlessHost {
        HeadlessHost {
            container: Some(container),
            surface: None,
            resize_subscriptions: 0,
            pending: VecDeque::new(),
            cancelled: 0,
            next_handle: 1,
        }
    }

    /// Changes the container size. Deliver it with [`Sparkles::on_resize()`].
    pub fn resize_container(&mut self, dimensions: Dimensions) {
        self.container = Some(dimensions);
    }

    pub fn detach_container(&mut self) {
        self.container = None;
    }

    pub fn attach_surface(&mut self) {
        if self.surface.is_none() {
            self.surface = Some(RecordingSurface::new());
        }
    }

    pub fn remove_surface(&mut self) {
        self.surface = None;
    }

    pub fn surface_ref(&self) -> Option<&RecordingSurface> {
        self.surface.as_ref()
    }

    /// Fires the oldest scheduled frame, returning its handle.
    pub fn next_frame(&mut self) -> Option<FrameHandle> {
        self.pending.pop_front()
    }

    pub fn pending_frames(&self) -> usize {
        self.pending.len()
    }

    pub fn cancelled_frames(&self) -> usize {
        self.cancelled
    }

    pub fn resize_subscriptions(&self) -> usize {
        self.resize_subscriptions
    }
}

impl Host for HeadlessHost {
    type Surface = RecordingSurface;

    fn measure_container(&self) -> Option<Dimensions> {
        self.container
    }

    fn surface(&mut self) -> Option<&mut RecordingSurface> {
        self.surface.as_mut()
    }

    fn subscribe_resize(&mut self) {
        self.resize_subscriptions += 1;
    }

    fn unsubscribe_resize(&mut self) {
        self.resize_subscriptions = self.resize_subscriptions.saturating_sub(1);
    }

    fn request_frame(&mut self) -> Option<FrameHandle> {
        let handle = FrameHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push_back(handle);

        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.pending.len();
        self.pending.retain(|pending| *pending != handle);
        self.cancelled += before - self.pending.len();
    }
}

impl Sparkles<HeadlessHost> {
    /// Fires up to `count` scheduled frames, stopping early when none is scheduled.
    /// Returns the number of frames painted.
    pub fn run_frames(&mut self, count: usize) -> usize {
        let mut painted = 0;

        for _ in 0..count {
            let Some(handle) = self.host_mut().next_frame() else {
                break;
            };

            if self.on_frame(handle) {
                painted += 1;
            }
        }

        painted
    }
}
