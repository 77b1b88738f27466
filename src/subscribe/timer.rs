use std::sync::mpsc::Sender;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// A one-shot delayed message that is aborted when dropped.
#[derive(Debug)]
pub struct ResetTimer {
    handle: JoinHandle<()>,
}

impl ResetTimer {
    /// Send `event` on `notify` after `delay`, unless cancelled first.
    pub fn schedule<T: Send + 'static>(
        runtime: &Handle,
        delay: Duration,
        notify: Sender<T>,
        event: T,
    ) -> Self {
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = notify.send(event);
        });
        Self { handle }
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for ResetTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::{channel, TryRecvError};
    use tokio::runtime::Runtime;

    #[test]
    fn fires_after_delay() {
        let rt = Runtime::new().unwrap();
        let (tx, rx) = channel();
        let _timer = ResetTimer::schedule(rt.handle(), Duration::from_millis(30), tx, 7u32);

        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
        assert_eq!(rx.recv_timeout(Duration::from_secs(2)), Ok(7));
    }

    #[test]
    fn dropped_timer_never_fires() {
        let rt = Runtime::new().unwrap();
        let (tx, rx) = channel();
        let timer = ResetTimer::schedule(rt.handle(), Duration::from_millis(30), tx, ());
        drop(timer);

        std::thread::sleep(Duration::from_millis(150));
        // The aborted task dropped its sender without sending.
        assert_eq!(rx.try_recv(), Err(TryRecvError::Disconnected));
    }
}
