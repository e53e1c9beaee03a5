//! Field rule checks shared by the entity inputs.
//!
//! Every check appends to a [`Violations`] collector instead of returning
//! early, so a single pass reports all broken rules of a record.

use rust_decimal::Decimal;

use crate::errors::FieldViolation;

#[derive(Debug, Default)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldViolation::new(field, message));
    }

    /// Presence check; returns the value so later rules can run on it.
    pub fn required<'a, T>(
        &mut self,
        field: &str,
        value: &'a Option<T>,
        message: &str,
    ) -> Option<&'a T> {
        if value.is_none() {
            self.push(field, message);
        }
        value.as_ref()
    }

    /// Text must contain at least one non-whitespace character.
    pub fn not_blank(&mut self, field: &str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.push(field, message);
        }
    }

    /// Length in characters, bounds inclusive.
    pub fn length_between(
        &mut self,
        field: &str,
        value: &str,
        min: usize,
        max: usize,
        message: &str,
    ) {
        let len = value.chars().count();
        if len < min || len > max {
            self.push(field, message);
        }
    }

    pub fn positive(&mut self, field: &str, value: &Decimal, message: &str) {
        if *value <= Decimal::ZERO {
            self.push(field, message);
        }
    }

    /// Upper bound, inclusive.
    pub fn at_most(&mut self, field: &str, value: &Decimal, max: Decimal, message: &str) {
        if *value > max {
            self.push(field, message);
        }
    }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn into_vec(self) -> Vec<FieldViolation> { self.0 }
}
