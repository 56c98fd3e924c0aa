pub mod current_subject;
pub mod validated_json;

pub use current_subject::CurrentSubject;
pub use validated_json::ValidatedJson;
