use aide::{openapi::Tag, transform::TransformOpenApi};

use crate::{error, extract::Json};

pub mod tag {
	pub const IDEA: &str = "Idea";
}

pub fn docs(api: TransformOpenApi) -> TransformOpenApi {
	api.title("Idea Board Open API")
		.summary("Submit, review and discuss ideas")
		.description(include_str!("../README.md"))
		.tag(Tag {
			name: tag::IDEA.into(),
			description: Some("Idea submission and comments".into()),
			..Default::default()
		})
		.default_response_with::<Json<Vec<error::Message<'static>>>, _>(|res| {
			res.example(vec![error::Message::new("length")
				.content("must not be more than 100 bytes long")
				.field("title")
				.detail("max", 100)])
		})
}
