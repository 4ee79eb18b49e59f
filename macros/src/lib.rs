mod model;
mod route;

use proc_macro::TokenStream;

/// Creates a new documentation function for the route, named after the original function with the suffix `_docs`.
///
/// The first line of the doc comment becomes the summary, the rest the description.
#[proc_macro_attribute]
pub fn route(args: TokenStream, input: TokenStream) -> TokenStream {
	route::from_input(args, input)
}

/// Creates the input structs for a model: `CreateXInput` and, unless
/// `#[model(create_only)]` is used, `UpdateXInput`.
///
/// Fields with `#[serde(skip_deserializing)]` or `#[serde(skip)]` are left out.
/// All other fields are copied verbatim (including attributes), wrapped in
/// an [`Option`] for the update input.
#[proc_macro_attribute]
pub fn model(args: TokenStream, input: TokenStream) -> TokenStream {
	model::from_input(args, input)
}
