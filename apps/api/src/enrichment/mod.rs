// Resume enrichment: PDF URL -> extracted text -> Gemini -> encrypted applicant record.
// Each external step sits behind a trait so the pipeline runs against fakes in tests.

pub mod extract;
pub mod fetch;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod store;
