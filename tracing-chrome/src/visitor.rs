use crate::layer::SpanFields;
use serde_json::Value;
use std::fmt;
use tracing::field::{Field, Visit};

impl SpanFields {
    fn insert(&mut self, field: &Field, value: Value) {
        self.args.insert(field.name().to_string(), value);
    }
}

impl Visit for SpanFields {
    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    // non-finite floats become null
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::from(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let formatted = format!("{:?}", value);
        self.insert(field, Value::String(formatted));
    }
}
