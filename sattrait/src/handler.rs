use std::time::{Duration, Instant};

/// Points at which a computation asks its handler whether to go on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    EnumerationStarted,
    SatCallStarted,
    SatConflictDetected,
    /// A solver model was found, standing for the given number of enumerated models.
    ModelsFound(u64),
    Commit,
    Rollback,
}

/// Cooperative cancellation. Returning `false` stops the computation at the
/// current suspension point.
pub trait Handler {
    fn should_resume(&mut self, event: &Event) -> bool;
}

impl<F: FnMut(&Event) -> bool> Handler for F {
    fn should_resume(&mut self, event: &Event) -> bool {
        self(event)
    }
}

/// The computation was stopped by its handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled {
    pub cause: Event,
}

impl Cancelled {
    /// Ask `handler` about `event`, turning a refusal into `Err`.
    pub fn check(handler: &mut dyn Handler, event: Event) -> Result<(), Cancelled> {
        if handler.should_resume(&event) {
            Ok(())
        } else {
            Err(Cancelled { cause: event })
        }
    }
}

/// Never cancels.
#[derive(Debug, Default, Clone, Copy)]
pub struct NopHandler;

impl Handler for NopHandler {
    fn should_resume(&mut self, _: &Event) -> bool {
        true
    }
}

/// Cancels as soon as more than `bound` models would have been found.
///
/// Models found since the last commit are forgotten on rollback, so only models
/// that can still end up in the result count towards the bound.
#[derive(Debug, Clone)]
pub struct NumberOfModelsHandler {
    bound: u64,
    committed: u64,
    uncommitted: u64,
}

impl NumberOfModelsHandler {
    pub fn new(bound: u64) -> Self {
        NumberOfModelsHandler {
            bound,
            committed: 0,
            uncommitted: 0,
        }
    }
}

impl Handler for NumberOfModelsHandler {
    fn should_resume(&mut self, event: &Event) -> bool {
        match *event {
            Event::EnumerationStarted => {
                self.committed = 0;
                self.uncommitted = 0;
                true
            }
            Event::ModelsFound(n) => {
                let total = self
                    .committed
                    .saturating_add(self.uncommitted)
                    .saturating_add(n);
                if total > self.bound {
                    return false;
                }
                self.uncommitted += n;
                true
            }
            Event::Commit => {
                self.committed += self.uncommitted;
                self.uncommitted = 0;
                true
            }
            Event::Rollback => {
                self.uncommitted = 0;
                true
            }
            Event::SatCallStarted | Event::SatConflictDetected => true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum TimerType {
    /// The timeout starts again with every `EnumerationStarted` event.
    SingleTimeout(Duration),
    FixedEnd(Instant),
}

/// Cancels once a deadline has passed. Checked at every event.
#[derive(Debug, Clone)]
pub struct TimeoutHandler {
    timer: TimerType,
    deadline: Instant,
}

impl TimeoutHandler {
    pub fn new(timeout: Duration) -> Self {
        Self::with_timer(TimerType::SingleTimeout(timeout))
    }

    pub fn with_timer(timer: TimerType) -> Self {
        let deadline = match timer {
            TimerType::SingleTimeout(d) => Instant::now() + d,
            TimerType::FixedEnd(end) => end,
        };
        TimeoutHandler { timer, deadline }
    }
}

impl Handler for TimeoutHandler {
    fn should_resume(&mut self, event: &Event) -> bool {
        if let (Event::EnumerationStarted, TimerType::SingleTimeout(d)) = (event, self.timer) {
            self.deadline = Instant::now() + d;
        }
        Instant::now() < self.deadline
    }
}
