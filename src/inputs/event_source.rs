use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};

/// Where the app loop takes its terminal events from.
pub trait EventSource {
    fn poll(&mut self, timeout: Duration) -> Result<bool>;
    fn read(&mut self) -> Result<Event>;
}

/// Reads events from the real terminal
pub struct KeyboardEventSource;

impl EventSource for KeyboardEventSource {
    fn poll(&mut self, timeout: Duration) -> Result<bool> {
        Ok(event::poll(timeout)?)
    }

    fn read(&mut self) -> Result<Event> {
        Ok(event::read()?)
    }
}

/// Replays a fixed list of events, for driving the app loop in tests.
#[cfg(any(test, feature = "test-utils"))]
pub struct SimulatedEventSource {
    events: std::collections::VecDeque<Event>,
}

#[cfg(any(test, feature = "test-utils"))]
impl SimulatedEventSource {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: events.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl EventSource for SimulatedEventSource {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No more simulated events"))
    }
}
