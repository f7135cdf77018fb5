use engine::options::Size;
use tokio::sync::watch;

/// The surface a chart mounts into. Publishes its rendered size; a
/// detached container reports `0x0`.
#[derive(Debug)]
pub struct Container {
    size: watch::Sender<Size>,
}

impl Container {
    pub fn new(size: Size) -> Self {
        let (sender, _) = watch::channel(size);
        Self { size: sender }
    }

    pub fn rendered_size(&self) -> Size {
        *self.size.borrow()
    }

    /// Layout pass: publishes the new rendered size to observers.
    pub fn resize(&self, size: Size) {
        self.size.send_replace(size);
    }

    pub fn detach(&self) {
        self.resize(Size::default());
    }

    pub fn observe(&self) -> watch::Receiver<Size> {
        self.size.subscribe()
    }

    pub fn observer_count(&self) -> usize {
        self.size.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_notifies_observer() {
        let container = Container::new(Size::new(800, 600));
        let mut rx = container.observe();
        container.resize(Size::new(1024, 768));
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), Size::new(1024, 768));
        assert_eq!(container.rendered_size(), Size::new(1024, 768));
    }

    #[test]
    fn test_detach_reports_empty_size() {
        let container = Container::new(Size::new(800, 600));
        container.detach();
        assert!(container.rendered_size().is_empty());
    }
}
