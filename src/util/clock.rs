//! `Clock` backed by browser timers.

use gloo_timers::future::TimeoutFuture;

use crate::env::Clock;

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    async fn sleep(&self, ms: u32) {
        TimeoutFuture::new(ms).await;
    }
}
