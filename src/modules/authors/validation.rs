use crate::validation::{Message, Messages, ValidationErrors, Validator};

use super::models::{AuthorInput, NewAuthor};

/// Check an author submission. `name` must be present and not blank.
pub fn validate(input: &AuthorInput, messages: &Messages) -> Result<NewAuthor, ValidationErrors> {
    let mut validator = Validator::new(messages);
    let name = validator.required_text("name", input.name.as_deref(), Message::RequiredField);

    validator.finish(|| {
        Some(NewAuthor {
            name: name?,
            birth_date: input.birth_date,
            nationality: input.nationality.clone(),
        })
    })
}
