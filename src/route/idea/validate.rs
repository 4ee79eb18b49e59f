use std::{ffi::OsStr, io, path::Path};

use validator::ValidationErrors;

use crate::{files::FileLookup, validate};

use super::model::{Comment, Idea};

pub const MAX_TITLE_BYTES: usize = 100;
pub const MAX_DESCRIPTION_BYTES: usize = 1000;
pub const MAX_CATEGORY_BYTES: usize = 50;
pub const MAX_COMMENT_BYTES: usize = 1000;
/// 5MB
pub const MAX_PDF_BYTES: u64 = 5 * 1024 * 1024;

/// Checks every field of a candidate idea, recording all violations into `errors`.
///
/// The referenced PDF is looked up through `files`.
pub fn validate_idea(errors: &mut ValidationErrors, idea: &Idea, files: &dyn FileLookup) {
	validate::required(errors, "title", &idea.title);
	validate::max_bytes(errors, "title", &idea.title, MAX_TITLE_BYTES);

	validate::required(errors, "description", &idea.description);
	validate::max_bytes(
		errors,
		"description",
		&idea.description,
		MAX_DESCRIPTION_BYTES,
	);

	validate::required(errors, "pdf", &idea.pdf);
	validate::check(
		errors,
		has_pdf_extension(&idea.pdf),
		"pdf",
		"extension",
		"must be a PDF file",
	);

	// An empty path is already reported above
	if !idea.pdf.is_empty() {
		validate_pdf_file(errors, &idea.pdf, files);
	}

	validate::required(errors, "category", &idea.category);
	validate::max_bytes(errors, "category", &idea.category, MAX_CATEGORY_BYTES);

	validate::check(
		errors,
		!idea.tags.is_empty(),
		"tags",
		"required",
		"must contain at least one tag",
	);
	validate::check(
		errors,
		validate::unique(&idea.tags),
		"tags",
		"unique",
		"must not contain duplicate values",
	);

	validate::user_id(errors, "submitted_by", idea.submitted_by);
}

pub fn check_idea(idea: &Idea, files: &dyn FileLookup) -> Result<(), ValidationErrors> {
	let mut errors = ValidationErrors::new();

	validate_idea(&mut errors, idea, files);
	validate::into_result(errors)
}

pub fn validate_comment(errors: &mut ValidationErrors, comment: &Comment) {
	validate::required(errors, "content", &comment.content);
	validate::max_bytes(errors, "content", &comment.content, MAX_COMMENT_BYTES);

	validate::user_id(errors, "commented_by", comment.commented_by);
}

pub fn check_comment(comment: &Comment) -> Result<(), ValidationErrors> {
	let mut errors = ValidationErrors::new();

	validate_comment(&mut errors, comment);
	validate::into_result(errors)
}

/// Whether the file name ends in `.pdf`, ignoring ASCII case.
///
/// A file named just `.pdf` counts too.
fn has_pdf_extension(path: &str) -> bool {
	const EXTENSION: &[u8] = b".pdf";

	Path::new(path)
		.file_name()
		.and_then(OsStr::to_str)
		.map(str::as_bytes)
		.is_some_and(|name| {
			name.len() >= EXTENSION.len()
				&& name[name.len() - EXTENSION.len()..].eq_ignore_ascii_case(EXTENSION)
		})
}

fn validate_pdf_file(errors: &mut ValidationErrors, pdf: &str, files: &dyn FileLookup) {
	let info = match files.stat(Path::new(pdf)) {
		Ok(info) => info,
		Err(error) => {
			let message = match error.kind() {
				io::ErrorKind::NotFound => "file does not exist",
				io::ErrorKind::PermissionDenied => "file is not accessible",
				_ => {
					tracing::warn!(%error, pdf, "failed to look up pdf");
					"unable to get file information"
				}
			};

			errors.add("pdf", validate::error("file", message));
			return;
		}
	};

	if !info.is_file {
		errors.add("pdf", validate::error("file", "must reference a file"));
		return;
	}

	if info.len > MAX_PDF_BYTES {
		let mut error = validate::error("size", "file size must not be more than 5MB");

		error.add_param("max".into(), &MAX_PDF_BYTES);
		errors.add("pdf", error);
	}
}

#[cfg(test)]
mod test {
	use validator::ValidationErrors;

	use super::*;
	use crate::test::StaticFiles;

	fn files() -> StaticFiles {
		StaticFiles::default().file("x.pdf", 1024)
	}

	fn valid_idea() -> Idea {
		Idea {
			title: "Idea".into(),
			description: "desc".into(),
			category: "cat".into(),
			pdf: "x.pdf".into(),
			tags: vec!["a".into()],
			submitted_by: 1,
			..Idea::default()
		}
	}

	fn errors_for(idea: &Idea, files: &StaticFiles) -> ValidationErrors {
		let mut errors = ValidationErrors::new();

		validate_idea(&mut errors, idea, files);
		errors
	}

	fn codes(errors: &ValidationErrors, field: &str) -> Vec<String> {
		errors
			.field_errors()
			.get(field)
			.map(|errors| errors.iter().map(|error| error.code.to_string()).collect())
			.unwrap_or_default()
	}

	#[test]
	fn test_valid_idea_has_no_errors() {
		let errors = errors_for(&valid_idea(), &files());

		assert!(errors.errors().is_empty(), "{errors:?}");
		assert!(check_idea(&valid_idea(), &files()).is_ok());
	}

	#[test]
	fn test_title_length() {
		let mut idea = valid_idea();

		idea.title = "a".repeat(MAX_TITLE_BYTES);
		assert!(codes(&errors_for(&idea, &files()), "title").is_empty());

		idea.title = "a".repeat(MAX_TITLE_BYTES + 1);
		assert_eq!(codes(&errors_for(&idea, &files()), "title"), ["length"]);

		idea.title = String::new();
		assert_eq!(codes(&errors_for(&idea, &files()), "title"), ["required"]);
	}

	#[test]
	fn test_description_and_category_length() {
		let mut idea = valid_idea();

		idea.description = "d".repeat(MAX_DESCRIPTION_BYTES + 1);
		idea.category = "c".repeat(MAX_CATEGORY_BYTES + 1);

		let errors = errors_for(&idea, &files());

		assert_eq!(codes(&errors, "description"), ["length"]);
		assert_eq!(codes(&errors, "category"), ["length"]);
	}

	#[test]
	fn test_tags() {
		let mut idea = valid_idea();

		idea.tags = vec!["a".into(), "a".into()];
		assert_eq!(codes(&errors_for(&idea, &files()), "tags"), ["unique"]);

		idea.tags = vec!["a".into(), "b".into()];
		assert!(codes(&errors_for(&idea, &files()), "tags").is_empty());

		idea.tags = Vec::new();
		assert_eq!(codes(&errors_for(&idea, &files()), "tags"), ["required"]);
	}

	#[test]
	fn test_submitted_by() {
		let mut idea = valid_idea();

		idea.submitted_by = 0;
		assert_eq!(
			codes(&errors_for(&idea, &files()), "submitted_by"),
			["required", "range"]
		);

		idea.submitted_by = -3;
		assert_eq!(codes(&errors_for(&idea, &files()), "submitted_by"), ["range"]);

		idea.submitted_by = 5;
		assert!(codes(&errors_for(&idea, &files()), "submitted_by").is_empty());
	}

	#[test]
	fn test_pdf_extension_is_case_insensitive() {
		let mut idea = valid_idea();
		let files = StaticFiles::default()
			.file("x.PDF", 10)
			.file("x.Pdf", 10)
			.file("x.docx", 10);

		idea.pdf = "x.PDF".into();
		assert!(codes(&errors_for(&idea, &files), "pdf").is_empty());

		idea.pdf = "x.Pdf".into();
		assert!(codes(&errors_for(&idea, &files), "pdf").is_empty());

		idea.pdf = "x.docx".into();
		assert_eq!(codes(&errors_for(&idea, &files), "pdf"), ["extension"]);
	}

	#[test]
	fn test_pdf_extension_uses_the_file_name() {
		assert!(has_pdf_extension("docs/x.pdf"));
		assert!(has_pdf_extension(".pdf"));
		assert!(has_pdf_extension("dir/.PDF"));
		assert!(has_pdf_extension("é.pdf"));
		assert!(!has_pdf_extension("pdf"));
		assert!(!has_pdf_extension("x.pdf.docx"));
		assert!(!has_pdf_extension("x.pdf/.."));
		assert!(!has_pdf_extension("é"));
	}

	#[test]
	fn test_missing_pdf_is_reported_even_when_everything_else_is_valid() {
		let mut idea = valid_idea();

		idea.pdf = "missing.pdf".into();

		let errors = errors_for(&idea, &files());
		let field_errors = errors.field_errors();

		assert_eq!(field_errors.len(), 1);
		assert_eq!(codes(&errors, "pdf"), ["file"]);
		assert_eq!(
			field_errors["pdf"][0].message.as_deref(),
			Some("file does not exist")
		);
	}

	#[test]
	fn test_pdf_lookup_failures_are_distinguished() {
		let mut idea = valid_idea();
		let files = StaticFiles::default().denied("locked.pdf").dir("folder.pdf");

		idea.pdf = "locked.pdf".into();
		let errors = errors_for(&idea, &files);
		assert_eq!(
			errors.field_errors()["pdf"][0].message.as_deref(),
			Some("file is not accessible")
		);

		idea.pdf = "folder.pdf".into();
		let errors = errors_for(&idea, &files);
		assert_eq!(
			errors.field_errors()["pdf"][0].message.as_deref(),
			Some("must reference a file")
		);
	}

	#[test]
	fn test_pdf_size_limit() {
		let mut idea = valid_idea();
		let files = StaticFiles::default()
			.file("max.pdf", MAX_PDF_BYTES)
			.file("big.pdf", MAX_PDF_BYTES + 1);

		idea.pdf = "max.pdf".into();
		assert!(codes(&errors_for(&idea, &files), "pdf").is_empty());

		idea.pdf = "big.pdf".into();
		assert_eq!(codes(&errors_for(&idea, &files), "pdf"), ["size"]);
	}

	#[test]
	fn test_empty_pdf_is_not_looked_up() {
		let mut idea = valid_idea();

		idea.pdf = String::new();

		assert_eq!(
			codes(&errors_for(&idea, &files()), "pdf"),
			["required", "extension"]
		);
	}

	#[test]
	fn test_errors_accumulate_across_fields() {
		let idea = Idea::default();
		let errors = errors_for(&idea, &files());

		for field in [
			"title",
			"description",
			"pdf",
			"category",
			"tags",
			"submitted_by",
		] {
			assert!(!codes(&errors, field).is_empty(), "{field}");
		}
	}

	#[test]
	fn test_comment() {
		let comment = Comment {
			commented_by: 2,
			content: "Nice".into(),
			..Comment::default()
		};

		assert!(check_comment(&comment).is_ok());

		let mut errors = ValidationErrors::new();
		validate_comment(&mut errors, &Comment::default());

		assert_eq!(codes(&errors, "content"), ["required"]);
		assert_eq!(codes(&errors, "commented_by"), ["required", "range"]);
	}
}
