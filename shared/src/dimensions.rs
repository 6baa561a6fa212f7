use crate::{Host, Slot};

/// Width and height of the drawing surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Dimensions {
        Dimensions { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Follows the host container's client box and republishes it through a [`Slot`].
#[derive(Debug, Default)]
pub struct DimensionTracker {
    dimensions: Slot<Dimensions>,
    subscribed: bool,
}

impl DimensionTracker {
    pub fn new() -> DimensionTracker {
        DimensionTracker::default()
    }

    /// Measures once and subscribes to the viewport resize signal.
    pub fn attach<H: Host>(&mut self, host: &mut H) {
        self.measure(host);

        if !self.subscribed {
            host.subscribe_resize();
            self.subscribed = true;
        }
    }

    pub fn detach<H: Host>(&mut self, host: &mut H) {
        if self.subscribed {
            host.unsubscribe_resize();
            self.subscribed = false;
        }
    }

    /// Re-measures the container. A detached container publishes nothing and leaves the
    /// last published dimensions in place.
    pub fn measure<H: Host>(&self, host: &H) -> Option<Dimensions> {
        let dimensions = host.measure_container()?;
        self.dimensions.publish(dimensions);

        Some(dimensions)
    }

    pub fn current(&self) -> Option<Dimensions> {
        self.dimensions.latest()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HeadlessHost;

    #[test]
    fn attach_measures_and_subscribes_once() {
        let mut host = HeadlessHost::new(Dimensions::new(300, 150));
        let mut tracker = DimensionTracker::new();

        tracker.attach(&mut host);
        tracker.attach(&mut host);

        assert_eq!(tracker.current(), Some(Dimensions::new(300, 150)));
        assert_eq!(host.resize_subscriptions(), 1);
        assert!(tracker.is_subscribed());

        tracker.detach(&mut host);

        assert_eq!(host.resize_subscriptions(), 0);
        assert!(!tracker.is_subscribed());
    }

    #[test]
    fn detached_container_keeps_last_dimensions() {
        let mut host = HeadlessHost::new(Dimensions::new(300, 150));
        let mut tracker = DimensionTracker::new();

        tracker.attach(&mut host);
        host.detach_container();

        assert_eq!(tracker.measure(&host), None);
        assert_eq!(tracker.current(), Some(Dimensions::new(300, 150)));
    }

    #[test]
    fn zero_area_is_empty() {
        assert!(Dimensions::new(0, 480).is_empty());
        assert!(Dimensions::default().is_empty());
        assert!(!Dimensions::new(1, 1).is_empty());
        assert_eq!(Dimensions::new(200, 300).area(), 60000.0);
    }
}
