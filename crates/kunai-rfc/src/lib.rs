//! Kunai calendar object model (RFC 5545).
//!
//! Mutable object-model types for iCalendar data. The crate currently
//! covers the property parameter: an ordered, multi-valued string
//! attribute with synchronous change notification and a silent bulk-copy
//! path for cloning.

pub mod ical;

pub use ical::Parameter;
pub use kunai_core::{Copyable, ListenerId, ListenerRegistry, Named, ValueChange, ValueContainer};
