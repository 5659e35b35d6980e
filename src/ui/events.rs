use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::handoff::{Navigator, Route};
use crate::lifecycle::ViewLifetime;

pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
    /// A screen change requested by the controller.
    Navigate(Route),
}

/// Terminal input pumped from a reader thread into the async loop.
pub struct EventHandler {
    rx: UnboundedReceiver<AppEvent>,
    tx: UnboundedSender<AppEvent>,
}

impl EventHandler {
    /// Start reading input; the reader stops once `lifetime` is unmounted.
    pub fn new(tick_rate: Duration, lifetime: ViewLifetime) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let event_tx = tx.clone();

        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                if lifetime.is_unmounted() {
                    break;
                }

                // Short poll so unmount is noticed promptly
                let timeout = tick_rate
                    .saturating_sub(last_tick.elapsed())
                    .min(Duration::from_millis(50));

                match event::poll(timeout) {
                    Ok(true) => match event::read() {
                        Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                            let _ = event_tx.send(AppEvent::Key(key));
                        }
                        Ok(Event::Resize(_, _)) => {
                            let _ = event_tx.send(AppEvent::Resize);
                        }
                        Ok(_) => {}
                        Err(err) => {
                            tracing::error!(error = %err, "Terminal read failed");
                            break;
                        }
                    },
                    Ok(false) => {}
                    Err(err) => {
                        tracing::error!(error = %err, "Terminal poll failed");
                        break;
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if event_tx.send(AppEvent::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self { rx, tx }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }

    pub fn sender(&self) -> UnboundedSender<AppEvent> {
        self.tx.clone()
    }
}

/// Navigator that turns routes into app events.
pub struct EventNavigator {
    tx: UnboundedSender<AppEvent>,
}

impl EventNavigator {
    pub fn new(tx: UnboundedSender<AppEvent>) -> Self {
        Self { tx }
    }
}

impl Navigator for EventNavigator {
    fn navigate(&self, route: Route) {
        if self.tx.send(AppEvent::Navigate(route)).is_err() {
            tracing::warn!(?route, "Navigation dropped, event loop is gone");
        }
    }
}
