//! Async driver: feeds input events into a [`Site`] and keeps its virtual
//! clock in step with tokio time.
//!
//! The site is single-threaded (`!Send`), so the driver runs on the current
//! task rather than being spawned. Input arrives over an mpsc channel; the
//! loop sleeps until either the next event or the next timer deadline.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

use crate::app::Site;
use crate::error::SiteError;
use crate::event::input::InputEvent;

/// Default capacity of the input channel.
pub const INPUT_CAPACITY: usize = 128;

/// Runs a [`Site`] against a stream of input events.
#[derive(Debug)]
pub struct Runtime {
    site: Site,
    input: mpsc::Receiver<InputEvent>,
    started: Instant,
    /// Site time when the driver started.
    base: Duration,
}

impl Runtime {
    /// Wrap `site` and return the sender for its input.
    pub fn new(site: Site, capacity: usize) -> (Self, mpsc::Sender<InputEvent>) {
        let (tx, input) = mpsc::channel(capacity);
        let base = site.now();
        let runtime = Self {
            site,
            input,
            started: Instant::now(),
            base,
        };
        (runtime, tx)
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    /// Process input and timers until every sender is dropped, then return
    /// the site.
    pub async fn run(mut self) -> Result<Site, SiteError> {
        tracing::debug!("runtime started");
        loop {
            let wake = self
                .site
                .host
                .timers
                .next_deadline()
                .map(|deadline| self.started + deadline.saturating_sub(self.base));
            let timer = async {
                match wake {
                    Some(at) => sleep_until(at).await,
                    None => std::future::pending().await,
                }
            };

            tokio::select! {
                event = self.input.recv() => match event {
                    Some(event) => {
                        self.catch_up()?;
                        self.site.handle_input(event)?;
                    }
                    None => break,
                },
                () = timer => self.catch_up()?,
            }
        }
        self.catch_up()?;
        tracing::debug!(now = ?self.site.now(), "runtime stopped");
        Ok(self.site)
    }

    // Advance the site to the current tokio time.
    fn catch_up(&mut self) -> Result<(), SiteError> {
        let target = self.base + self.started.elapsed();
        let by = target.saturating_sub(self.site.now());
        if by.is_zero() {
            return Ok(());
        }
        self.site.advance(by)
    }
}
