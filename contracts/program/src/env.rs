//! Injected collaborators: time source and event sink.
//!
//! Components never reach for ambient globals. The on-chain entrypoint wires a
//! sysvar-backed clock and a `msg!` sink; tests and the host runtime use the
//! manual clock and the recording sink.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pinocchio::{
    msg,
    program_error::ProgramError,
    sysvars::{clock::Clock as SysvarClockData, Sysvar},
};

use crate::events::Event;

pub trait Clock {
    /// Current unix timestamp in seconds.
    fn unix_timestamp(&self) -> i64;
}

pub trait EventSink {
    fn emit(&self, event: Event);
}

/// Handles shared by every component taking part in one call.
#[derive(Clone)]
pub struct Env {
    clock: Rc<dyn Clock>,
    events: Rc<dyn EventSink>,
}

impl Env {
    pub fn new(clock: Rc<dyn Clock>, events: Rc<dyn EventSink>) -> Self {
        Self { clock, events }
    }

    /// Sysvar clock and program-log sink for one on-chain instruction.
    pub fn on_chain() -> Result<Self, ProgramError> {
        Ok(Self::new(
            Rc::new(FixedClock::from_sysvar()?),
            Rc::new(LogSink),
        ))
    }

    #[inline]
    pub fn now(&self) -> i64 {
        self.clock.unix_timestamp()
    }

    #[inline]
    pub fn emit(&self, event: Event) {
        self.events.emit(event);
    }
}

/// Clock frozen at a single instant, e.g. the slot's sysvar time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl FixedClock {
    /// Reads the clock sysvar once for the current instruction.
    pub fn from_sysvar() -> Result<Self, ProgramError> {
        Ok(Self(SysvarClockData::get()?.unix_timestamp))
    }
}

impl Clock for FixedClock {
    fn unix_timestamp(&self) -> i64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<i64>,
}

impl ManualClock {
    pub fn new(now: i64) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.set(now);
    }

    pub fn advance(&self, seconds: i64) {
        self.now.set(self.now.get().saturating_add(seconds));
    }
}

impl Clock for ManualClock {
    fn unix_timestamp(&self) -> i64 {
        self.now.get()
    }
}

/// Writes events to the program log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, event: Event) {
        msg!("event: {:?}", event);
    }
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    events: RefCell<Vec<Event>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn last(&self) -> Option<Event> {
        self.events.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Drops events recorded after the first `len`.
    pub fn truncate(&self, len: usize) {
        self.events.borrow_mut().truncate(len);
    }

    /// Drains everything recorded so far.
    pub fn take(&self) -> Vec<Event> {
        self.events.borrow_mut().drain(..).collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }
}
