//! Machines decide, the session executes.
//!
//! A machine holds flow state and turns each event into at most one command.
//! It never touches storage, the directory or the clock; its owner runs the
//! command and reports the result back as the next event.

/// Pure event → command state machine
pub trait Machine {
    type Event;
    type Command;

    /// Apply `event`, returning the side effect to run, if any.
    ///
    /// Runs synchronously and is never called concurrently on one machine.
    fn decide(&mut self, event: &Self::Event) -> Option<Self::Command>;
}
