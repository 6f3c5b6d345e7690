//! Input validation utilities.
//!
//! Checks applied to notification records and user accounts before they are stored or sent.

use crate::record::{required_fields, NotificationRecord};
use crate::{CoreError, CoreResult};

const USERNAME_MIN_LEN: usize = 3;
const USERNAME_MAX_LEN: usize = 80;
const EMAIL_MAX_LEN: usize = 120;

/// Names of mandatory fields that are absent or empty in `record`, in catalog order.
pub fn missing_required_fields(record: &NotificationRecord) -> Vec<&'static str> {
    required_fields()
        .filter(|spec| record.get(spec.name).map_or(true, str::is_empty))
        .map(|spec| spec.name)
        .collect()
}

/// Validates that every mandatory field of `record` holds a value.
///
/// # Errors
///
/// Returns [`CoreError::MissingRequired`] listing the empty mandatory fields.
pub fn validate_required(record: &NotificationRecord) -> CoreResult<()> {
    let missing = missing_required_fields(record);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::MissingRequired(missing))
    }
}

/// Validates a username: 3 to 80 characters, alphanumeric plus `_` and `-`.
///
/// # Errors
///
/// Returns [`CoreError::InvalidInput`] describing the first violated rule.
pub fn validate_username(username: &str) -> CoreResult<()> {
    let len = username.chars().count();
    if len < USERNAME_MIN_LEN {
        return Err(CoreError::InvalidInput(format!(
            "Nome de usuário deve ter pelo menos {USERNAME_MIN_LEN} caracteres"
        )));
    }

    if len > USERNAME_MAX_LEN {
        return Err(CoreError::InvalidInput(format!(
            "Nome de usuário deve ter no máximo {USERNAME_MAX_LEN} caracteres"
        )));
    }

    let stripped: Vec<char> = username.chars().filter(|c| !matches!(c, '_' | '-')).collect();
    if stripped.is_empty() || !stripped.iter().all(|c| c.is_alphanumeric()) {
        return Err(CoreError::InvalidInput(
            "Nome de usuário deve conter apenas letras, números, _ e -".into(),
        ));
    }

    Ok(())
}

/// Validates the shape of an email address: contains `@` and `.`, at most 120 characters.
///
/// # Errors
///
/// Returns [`CoreError::InvalidInput`] describing the violated rule.
pub fn validate_email(email: &str) -> CoreResult<()> {
    if !email.contains('@') || !email.contains('.') {
        return Err(CoreError::InvalidInput("Formato de email inválido".into()));
    }

    if email.chars().count() > EMAIL_MAX_LEN {
        return Err(CoreError::InvalidInput(format!(
            "Email deve ter no máximo {EMAIL_MAX_LEN} caracteres"
        )));
    }

    Ok(())
}
