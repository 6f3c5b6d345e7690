//! The in-memory record a user is editing.
//!
//! A [`Draft`] holds one [`FieldControl`] per catalog field, in catalog order. Each control
//! tracks the entered value and whether the field has been touched, which is what a renderer
//! needs to decide when to show a "required" message.

use dengue_core::normalise::FieldValue;
use dengue_core::record::{field, FieldKind, FieldSpec, FIELDS};
use dengue_core::{CoreError, CoreResult, NotificationRecord};

/// Validation failure of a single field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldError {
    Required,
}

/// Value and interaction state of one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldControl {
    spec: &'static FieldSpec,
    value: FieldValue,
    touched: bool,
}

impl FieldControl {
    fn new(spec: &'static FieldSpec) -> Self {
        Self {
            spec,
            value: FieldValue::Empty,
            touched: false,
        }
    }

    pub fn spec(&self) -> &'static FieldSpec {
        self.spec
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn error(&self) -> Option<FieldError> {
        (self.spec.required && self.value.is_empty()).then_some(FieldError::Required)
    }

    pub fn is_valid(&self) -> bool {
        self.error().is_none()
    }

    /// `true` once the field is both touched and invalid.
    pub fn shows_error(&self) -> bool {
        self.touched && !self.is_valid()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Draft {
    controls: Vec<FieldControl>,
}

impl Default for Draft {
    fn default() -> Self {
        Self::empty()
    }
}

impl Draft {
    /// A draft with every catalog field present, empty and untouched.
    pub fn empty() -> Self {
        Self {
            controls: FIELDS.iter().map(FieldControl::new).collect(),
        }
    }

    pub fn controls(&self) -> impl Iterator<Item = &FieldControl> {
        self.controls.iter()
    }

    pub fn control(&self, name: &str) -> Option<&FieldControl> {
        self.controls.iter().find(|control| control.name() == name)
    }

    fn control_mut(&mut self, name: &str) -> CoreResult<&mut FieldControl> {
        self.controls
            .iter_mut()
            .find(|control| control.name() == name)
            .ok_or_else(|| CoreError::UnknownField(name.to_string()))
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.control(name).map(FieldControl::value)
    }

    /// Set a field's value.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownField`] for names outside the catalog and
    /// [`CoreError::NotADateField`] when a date value targets a field outside the canonical
    /// date-field set.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> CoreResult<()> {
        let value = value.into();
        let control = self.control_mut(name)?;
        if matches!(value, FieldValue::Date(_)) && control.spec.kind != FieldKind::Date {
            return Err(CoreError::NotADateField(name.to_string()));
        }
        control.value = value;
        Ok(())
    }

    pub fn clear(&mut self, name: &str) -> CoreResult<()> {
        self.control_mut(name)?.value = FieldValue::Empty;
        Ok(())
    }

    /// Record that the user has visited a field.
    pub fn mark_touched(&mut self, name: &str) -> CoreResult<()> {
        self.control_mut(name)?.touched = true;
        Ok(())
    }

    pub fn mark_all_touched(&mut self) {
        for control in &mut self.controls {
            control.touched = true;
        }
    }

    /// Required fields that are still empty, in catalog order.
    pub fn missing_required(&self) -> Vec<&'static str> {
        self.controls
            .iter()
            .filter(|control| control.error() == Some(FieldError::Required))
            .map(FieldControl::name)
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.controls.iter().all(FieldControl::is_valid)
    }

    /// Normalised copy of the draft as it goes on the wire.
    ///
    /// Date values in the canonical date-field set become `YYYY-MM-DD`; empty fields are
    /// left out.
    pub fn to_record(&self) -> NotificationRecord {
        let mut record = NotificationRecord::default();
        for control in &self.controls {
            if let Some(slot) = record.get_mut(control.name()) {
                *slot = control.value.to_wire(control.spec);
            }
        }
        record
    }

    /// Draft pre-filled from a stored record, e.g. for editing an existing notification.
    ///
    /// Values are loaded as text; the record's `id` is not part of the draft.
    pub fn from_record(record: &NotificationRecord) -> Self {
        let mut draft = Self::empty();
        for control in &mut draft.controls {
            if let Some(text) = record.get(control.spec.name) {
                control.value = FieldValue::Text(text.to_owned());
            }
        }
        draft
    }
}

/// Whether `name` is part of the field catalog.
pub fn is_known_field(name: &str) -> bool {
    field(name).is_some()
}
