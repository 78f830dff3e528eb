use serde::Serialize;
use serde_json::{Map, Value};

/// An accepted webhook call: the event name and the decoded JSON body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Delivery {
    event: String,
    /// Always a JSON object.
    payload: Value,
}

impl Delivery {
    pub fn new(event: impl Into<String>, payload: Map<String, Value>) -> Self {
        Self {
            event: event.into(),
            payload: Value::Object(payload),
        }
    }

    pub fn event(&self) -> &str {
        &self.event
    }

    /// The whole decoded payload.
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Look up a nested payload value by a dot-delimited path such as
    /// `"sender.url"` or `"commits.0.id"`.
    ///
    /// Object segments match keys, array segments match decimal indices.
    /// Returns `None` when a segment is missing, when it would index into a
    /// scalar, or when the value found is `null`. An empty path yields the
    /// whole payload.
    pub fn payload_at(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return Some(&self.payload);
        }

        path.split('.')
            .try_fold(&self.payload, |current, segment| match current {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => array_index(segment).and_then(|i| items.get(i)),
                _ => None,
            })
            .filter(|value| !value.is_null())
    }

    pub fn into_parts(self) -> (String, Value) {
        (self.event, self.payload)
    }
}

/// Only canonical decimal indices: "0" and "12", never "01" or "+1".
fn array_index(segment: &str) -> Option<usize> {
    let index = segment.parse::<usize>().ok()?;
    (index.to_string() == segment).then_some(index)
}
