//! Building blocks for hand-written validation rules.
//!
//! Rules record their violations into a [`ValidationErrors`] accumulator
//! and never stop early, so a caller sees every problem with a record at once.

use std::{borrow::Cow, collections::HashSet, hash::Hash};

use validator::{ValidationError, ValidationErrors};

/// Creates an error with a machine-readable `code` and a human-readable message.
pub fn error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
	let mut error = ValidationError::new(code);
	error.message = Some(message.into());
	error
}

/// Records an error for `field` unless `ok` holds.
pub fn check(
	errors: &mut ValidationErrors,
	ok: bool,
	field: &'static str,
	code: &'static str,
	message: &'static str,
) {
	if !ok {
		errors.add(field, error(code, message));
	}
}

pub fn required(errors: &mut ValidationErrors, field: &'static str, value: &str) {
	check(errors, !value.is_empty(), field, "required", "must be provided");
}

/// Records an error if `value` is longer than `max` bytes.
pub fn max_bytes(errors: &mut ValidationErrors, field: &'static str, value: &str, max: usize) {
	if value.len() > max {
		let mut error = error("length", format!("must not be more than {max} bytes long"));

		error.add_param(Cow::Borrowed("max"), &max);
		errors.add(field, error);
	}
}

/// Checks a user identifier: zero means it was never filled in.
pub fn user_id(errors: &mut ValidationErrors, field: &'static str, id: i64) {
	check(errors, id != 0, field, "required", "must be provided");
	check(errors, id > 0, field, "range", "must be a positive integer");
}

/// Whether every value in the slice is distinct.
pub fn unique<T: Eq + Hash>(values: &[T]) -> bool {
	let mut seen = HashSet::with_capacity(values.len());

	values.iter().all(|value| seen.insert(value))
}

pub fn into_result(errors: ValidationErrors) -> Result<(), ValidationErrors> {
	if errors.errors().is_empty() {
		Ok(())
	} else {
		Err(errors)
	}
}

#[cfg(test)]
mod test {
	use validator::ValidationErrors;

	use super::*;

	fn codes(errors: &ValidationErrors, field: &str) -> Vec<String> {
		errors
			.field_errors()
			.get(field)
			.map(|errors| errors.iter().map(|error| error.code.to_string()).collect())
			.unwrap_or_default()
	}

	#[test]
	fn test_unique() {
		assert!(unique::<&str>(&[]));
		assert!(unique(&["a", "b"]));
		assert!(unique(&["a", "A"]));
		assert!(!unique(&["a", "b", "a"]));
	}

	#[test]
	fn test_max_bytes_counts_bytes() {
		let mut errors = ValidationErrors::new();

		// 2 characters, 4 bytes
		max_bytes(&mut errors, "title", "éé", 3);
		max_bytes(&mut errors, "category", "abc", 3);

		assert_eq!(codes(&errors, "title"), ["length"]);
		assert!(codes(&errors, "category").is_empty());

		let field_errors = errors.field_errors();
		assert_eq!(field_errors["title"][0].params["max"], serde_json::json!(3));
	}

	#[test]
	fn test_user_id() {
		let mut errors = ValidationErrors::new();

		user_id(&mut errors, "zero", 0);
		user_id(&mut errors, "negative", -4);
		user_id(&mut errors, "positive", 5);

		assert_eq!(codes(&errors, "zero"), ["required", "range"]);
		assert_eq!(codes(&errors, "negative"), ["range"]);
		assert!(codes(&errors, "positive").is_empty());
	}

	#[test]
	fn test_into_result() {
		assert!(into_result(ValidationErrors::new()).is_ok());

		let mut errors = ValidationErrors::new();
		required(&mut errors, "title", "");

		assert!(into_result(errors).is_err());
	}
}
