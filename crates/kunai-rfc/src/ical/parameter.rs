//! iCalendar property parameters (RFC 5545 §3.2).

use std::fmt;

use kunai_core::event::{ListenerId, ListenerRegistry, ValueChange};
use kunai_core::traits::{Copyable, Named, ValueContainer};

/// An iCalendar property parameter.
///
/// A parameter is a named, ordered, multi-valued string attribute attached
/// to a calendar property, e.g. `TZID=America/New_York` or a `MEMBER`
/// parameter listing several calendar user addresses. Values keep
/// insertion order and may repeat; the first value, when present, is the
/// primary value.
///
/// The value list is owned by the parameter and only changes through the
/// methods below. Each incremental mutation publishes a single
/// [`ValueChange`] synchronously to every listener registered with
/// [`Parameter::on_value_changed`], in registration order, before the
/// mutating call returns.
pub struct Parameter {
    /// Parameter name (normalized to uppercase).
    pub(crate) name: String,
    /// Values in order of appearance.
    pub(crate) values: Vec<String>,
    /// Change listeners; runtime state, never cloned or serialized.
    pub(crate) listeners: ListenerRegistry<String>,
}

impl Parameter {
    /// Creates a parameter with a name and no values.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values: Vec::new(),
            listeners: ListenerRegistry::new(),
        }
    }

    /// Creates a parameter with a single value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut parameter = Self::named(name);
        parameter.values.push(value.into());
        parameter
    }

    /// Creates a parameter with multiple values.
    #[must_use]
    pub fn multi(name: impl Into<String>, values: Vec<String>) -> Self {
        let mut parameter = Self::named(name);
        parameter.values = values;
        parameter
    }

    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the parameter. Identity is not part of the value list, so
    /// no change notification fires.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into().to_ascii_uppercase();
    }

    /// Returns the ordered value list.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Returns the number of values.
    #[must_use]
    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    /// Returns whether the list contains `value`. O(n).
    #[must_use]
    pub fn contains_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    /// Returns the primary value: the first value, or `None` when the
    /// list is empty.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Replaces the primary value.
    ///
    /// With `Some(value)`: appends when the list is empty, otherwise
    /// replaces element 0 and leaves later elements untouched. With
    /// `None`: clears the whole list when non-empty; when the list is
    /// already empty nothing happens and no notification fires. The
    /// asymmetry between the two `None` cases is intentional.
    pub fn set_value<V: Into<String>>(&mut self, value: Option<V>) {
        match value {
            Some(value) => {
                let value = value.into();
                if let Some(first) = self.values.first_mut() {
                    let old = std::mem::replace(first, value.clone());
                    self.notify(&ValueChange::new(vec![old], vec![value]));
                } else {
                    self.values.push(value.clone());
                    self.notify(&ValueChange::added(vec![value]));
                }
            }
            None => {
                if self.values.is_empty() {
                    return;
                }
                let removed = std::mem::take(&mut self.values);
                self.notify(&ValueChange::removed(removed));
            }
        }
    }

    /// Replaces the whole value list.
    ///
    /// Always clears and repopulates, and always notifies with the full
    /// removed and added lists, even when the new sequence is empty or
    /// identical to the current one.
    pub fn set_values<I>(&mut self, values: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let added: Vec<String> = values.into_iter().map(Into::into).collect();
        let removed = std::mem::replace(&mut self.values, added.clone());
        self.notify(&ValueChange::new(removed, added));
    }

    /// Appends a value to the end of the list.
    pub fn add_value(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.values.push(value.clone());
        self.notify(&ValueChange::added(vec![value]));
    }

    /// Removes the first occurrence of `value`. Absent values are a
    /// silent no-op.
    pub fn remove_value(&mut self, value: &str) {
        if let Some(index) = self.values.iter().position(|v| v == value) {
            let removed = self.values.remove(index);
            self.notify(&ValueChange::removed(vec![removed]));
        }
    }

    /// Empties the value list without notifying listeners.
    ///
    /// Reconstruction from a persisted form calls this before
    /// repopulating fields; it is a lifecycle step, not an incremental
    /// edit.
    pub fn reset_values(&mut self) {
        self.values.clear();
    }

    /// Registers a change listener. It runs on every subsequent value
    /// mutation, after listeners registered earlier.
    pub fn on_value_changed(
        &mut self,
        handler: impl FnMut(&ValueChange<String>) + 'static,
    ) -> ListenerId {
        self.listeners.subscribe(handler)
    }

    /// Removes a previously registered listener. Returns whether it was
    /// still registered.
    pub fn remove_value_changed(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn notify(&mut self, change: &ValueChange<String>) {
        tracing::trace!(
            name = %self.name,
            removed = change.removed.len(),
            added = change.added.len(),
            "parameter values changed"
        );
        self.listeners.notify(change);
    }

    // --- Convenience constructors ---

    /// Creates a TZID parameter.
    #[must_use]
    pub fn tzid(tz: impl Into<String>) -> Self {
        Self::new(names::TZID, tz)
    }

    /// Creates a VALUE parameter specifying the value type.
    #[must_use]
    pub fn value_type(type_name: impl Into<String>) -> Self {
        Self::new(names::VALUE, type_name)
    }

    /// Creates a LANGUAGE parameter.
    #[must_use]
    pub fn language(tag: impl Into<String>) -> Self {
        Self::new(names::LANGUAGE, tag)
    }

    /// Creates a CN (common name) parameter.
    #[must_use]
    pub fn common_name(name: impl Into<String>) -> Self {
        Self::new(names::CN, name)
    }

    /// Creates a MEMBER parameter listing group memberships.
    #[must_use]
    pub fn member(addresses: Vec<String>) -> Self {
        Self::multi(names::MEMBER, addresses)
    }

    /// Creates a PARTSTAT parameter.
    #[must_use]
    pub fn partstat(status: impl Into<String>) -> Self {
        Self::new(names::PARTSTAT, status)
    }

    /// Creates a ROLE parameter.
    #[must_use]
    pub fn role(role: impl Into<String>) -> Self {
        Self::new(names::ROLE, role)
    }

    /// Creates a CUTYPE (calendar user type) parameter.
    #[must_use]
    pub fn cutype(kind: impl Into<String>) -> Self {
        Self::new(names::CUTYPE, kind)
    }

    /// Creates an RSVP parameter.
    #[must_use]
    pub fn rsvp(expects_reply: bool) -> Self {
        Self::new(names::RSVP, if expects_reply { "TRUE" } else { "FALSE" })
    }

    /// Creates a DELEGATED-TO parameter.
    #[must_use]
    pub fn delegated_to(address: impl Into<String>) -> Self {
        Self::new(names::DELEGATED_TO, address)
    }

    /// Creates a DELEGATED-FROM parameter.
    #[must_use]
    pub fn delegated_from(address: impl Into<String>) -> Self {
        Self::new(names::DELEGATED_FROM, address)
    }

    /// Creates a SENT-BY parameter.
    #[must_use]
    pub fn sent_by(address: impl Into<String>) -> Self {
        Self::new(names::SENT_BY, address)
    }

    /// Creates an ENCODING parameter.
    #[must_use]
    pub fn encoding(encoding: impl Into<String>) -> Self {
        Self::new(names::ENCODING, encoding)
    }

    /// Creates an FMTTYPE (media type) parameter.
    #[must_use]
    pub fn fmttype(media_type: impl Into<String>) -> Self {
        Self::new(names::FMTTYPE, media_type)
    }
}

impl Default for Parameter {
    fn default() -> Self {
        Self::named("")
    }
}

impl Named for Parameter {
    fn name(&self) -> &str {
        &self.name
    }
}

impl ValueContainer for Parameter {
    type Value = String;

    fn values(&self) -> &[String] {
        &self.values
    }
}

impl<C> Copyable<C> for Parameter
where
    C: ValueContainer<Value = String> + ?Sized,
{
    /// Replaces the local value list with a copy of `source`'s.
    ///
    /// Bulk-clone path: no change notification fires, and local listener
    /// registrations stay in place.
    fn copy_from(&mut self, source: &C) {
        self.values = source.values().to_vec();
    }
}

impl Clone for Parameter {
    /// Clones name and values; listener registrations do not transfer.
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            values: self.values.clone(),
            listeners: ListenerRegistry::new(),
        }
    }
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.values == other.values
    }
}

impl Eq for Parameter {}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("values", &self.values)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl fmt::Display for Parameter {
    /// Renders `NAME=value1,value2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.values.join(","))
    }
}

/// Parameter names from RFC 5545 §3.2.
pub mod names {
    pub const ALTREP: &str = "ALTREP";
    pub const CN: &str = "CN";
    pub const CUTYPE: &str = "CUTYPE";
    pub const DELEGATED_FROM: &str = "DELEGATED-FROM";
    pub const DELEGATED_TO: &str = "DELEGATED-TO";
    pub const DIR: &str = "DIR";
    pub const ENCODING: &str = "ENCODING";
    pub const FMTTYPE: &str = "FMTTYPE";
    pub const FBTYPE: &str = "FBTYPE";
    pub const LANGUAGE: &str = "LANGUAGE";
    pub const MEMBER: &str = "MEMBER";
    pub const PARTSTAT: &str = "PARTSTAT";
    pub const RANGE: &str = "RANGE";
    pub const RELATED: &str = "RELATED";
    pub const RELTYPE: &str = "RELTYPE";
    pub const ROLE: &str = "ROLE";
    pub const RSVP: &str = "RSVP";
    pub const SENT_BY: &str = "SENT-BY";
    pub const TZID: &str = "TZID";
    pub const VALUE: &str = "VALUE";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_parameter_is_empty() {
        let param = Parameter::named("tzid");
        assert_eq!(param.name(), "TZID");
        assert_eq!(param.value(), None);
        assert_eq!(param.value_count(), 0);
    }

    #[test]
    fn single_value_parameter() {
        let param = Parameter::new("TZID", "America/New_York");
        assert_eq!(param.value(), Some("America/New_York"));
        assert_eq!(param.value_count(), 1);
    }

    #[test]
    fn multi_value_parameter() {
        let param = Parameter::multi(
            "MEMBER",
            vec!["a@example.com".into(), "b@example.com".into()],
        );
        assert_eq!(param.value(), Some("a@example.com"));
        assert_eq!(param.values(), ["a@example.com", "b@example.com"]);
    }

    #[test]
    fn add_value_updates_count_and_membership() {
        let mut param = Parameter::named("TZID");
        param.add_value("America/New_York");
        assert_eq!(param.value(), Some("America/New_York"));
        assert_eq!(param.value_count(), 1);
        assert!(param.contains_value("America/New_York"));
    }

    #[test]
    fn contains_value_is_case_sensitive() {
        let param = Parameter::new("PARTSTAT", "ACCEPTED");
        assert!(param.contains_value("ACCEPTED"));
        assert!(!param.contains_value("accepted"));
    }

    #[test]
    fn remove_value_removes_first_occurrence_only() {
        let mut param = Parameter::multi("X-TAG", vec!["a".into(), "b".into(), "a".into()]);
        param.remove_value("a");
        assert_eq!(param.values(), ["b", "a"]);
    }

    #[test]
    fn remove_absent_value_is_noop() {
        let mut param = Parameter::new("TZID", "UTC");
        param.remove_value("America/New_York");
        assert_eq!(param.value_count(), 1);
    }

    #[test]
    fn duplicates_are_permitted() {
        let mut param = Parameter::named("X-TAG");
        param.add_value("a");
        param.add_value("a");
        assert_eq!(param.value_count(), 2);
    }

    #[test]
    fn display_joins_values() {
        let param = Parameter::multi("MEMBER", vec!["a".into(), "b".into()]);
        assert_eq!(param.to_string(), "MEMBER=a,b");
        assert_eq!(Parameter::named("TZID").to_string(), "TZID=");
    }

    #[test]
    fn equality_ignores_listeners() {
        let mut left = Parameter::new("TZID", "UTC");
        left.on_value_changed(|_| {});
        let right = Parameter::new("TZID", "UTC");
        assert_eq!(left, right);
    }

    #[test]
    fn rsvp_constructor() {
        assert_eq!(Parameter::rsvp(true).to_string(), "RSVP=TRUE");
        assert_eq!(Parameter::rsvp(false).to_string(), "RSVP=FALSE");
    }

    #[test]
    fn convenience_constructors_use_rfc_names() {
        assert_eq!(Parameter::tzid("UTC").name(), "TZID");
        assert_eq!(Parameter::sent_by("mailto:a@example.com").name(), "SENT-BY");
        assert_eq!(Parameter::delegated_from("mailto:b@example.com").name(), "DELEGATED-FROM");
    }
}
