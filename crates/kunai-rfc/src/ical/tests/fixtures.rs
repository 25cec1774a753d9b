//! Shared test fixtures.

use std::cell::RefCell;
use std::rc::Rc;

use kunai_core::event::ValueChange;

/// Shared record of every change delivered to a listener.
pub type ChangeLog = Rc<RefCell<Vec<ValueChange<String>>>>;

/// Returns a change log and a listener that appends to it.
pub fn change_log() -> (ChangeLog, impl FnMut(&ValueChange<String>) + 'static) {
    let log: ChangeLog = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let listener = move |change: &ValueChange<String>| {
        sink.borrow_mut().push(change.clone());
    };
    (log, listener)
}

/// Builds an owned string vector from literals.
pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}
