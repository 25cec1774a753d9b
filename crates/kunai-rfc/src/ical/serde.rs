//! serde support for parameter types.
//!
//! Only the name and values round-trip; listener registrations are
//! runtime state and never serialize. Reconstruction resets the value
//! list to empty before repopulating the persisted fields, and raises no
//! change notifications.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::Parameter;

impl Serialize for Parameter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Parameter", 2)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("values", &self.values)?;
        state.end()
    }
}

/// Persisted form of [`Parameter`].
#[derive(serde::Deserialize)]
struct ParameterRecord {
    name: String,
    #[serde(default)]
    values: Vec<String>,
}

impl<'de> Deserialize<'de> for Parameter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let record = ParameterRecord::deserialize(deserializer)?;
        let mut parameter = Parameter::named(record.name);
        // The value list must start empty before the persisted values are
        // absorbed; reconstruction bypasses the notifying mutation paths.
        parameter.reset_values();
        parameter.values.extend(record.values);
        Ok(parameter)
    }
}
