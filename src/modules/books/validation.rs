use crate::validation::{Message, Messages, ValidationErrors, Validator};

use super::models::{BookInput, NewBook};

/// Check a book submission.
///
/// `title`, `published_date` and `author_id` are required. Every missing
/// field is reported, not just the first. Whether `author_id` refers to an
/// existing author is checked when the book is stored.
pub fn validate(input: &BookInput, messages: &Messages) -> Result<NewBook, ValidationErrors> {
    let mut validator = Validator::new(messages);
    let title = validator.required_text("title", input.title.as_deref(), Message::TitleRequired);
    let published_date = validator.required_value(
        "published_date",
        input.published_date.as_ref(),
        Message::PublishedDateRequired,
    );
    let author_id =
        validator.required_value("author_id", input.author_id.as_ref(), Message::RequiredField);

    validator.finish(|| {
        Some(NewBook {
            title: title?,
            published_date: published_date?,
            genre: input.genre.clone(),
            author_id: author_id?,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::authors::models::AuthorId;
    use library_kernel::settings::Locale;
    use time::macros::date;

    #[test]
    fn accepts_complete_book() {
        let input = BookInput::new("20,000 Leagues", date!(1870 - 01 - 01), AuthorId::new(1))
            .genre("Adventure");
        let book = validate(&input, &Messages::default()).unwrap();
        assert_eq!(book.title, "20,000 Leagues");
        assert_eq!(book.genre.as_deref(), Some("Adventure"));
        assert_eq!(book.author_id, AuthorId::new(1));
    }

    #[test]
    fn rejects_empty_title() {
        let input = BookInput::new("", date!(2020 - 01 - 01), AuthorId::new(1));
        let errors = validate(&input, &Messages::default()).unwrap_err();
        assert_eq!(errors.fields(), vec!["title"]);
        assert_eq!(errors.get("title").unwrap().message, "Title is required.");
    }

    #[test]
    fn reports_every_missing_field() {
        let errors = validate(&BookInput::default(), &Messages::default()).unwrap_err();
        assert_eq!(errors.fields(), vec!["title", "published_date", "author_id"]);
        assert_eq!(
            errors.get("published_date").unwrap().message,
            "Published date is required."
        );
        assert_eq!(
            errors.get("author_id").unwrap().message,
            "required field missing"
        );
    }

    #[test]
    fn slovak_messages() {
        let errors = validate(&BookInput::default(), &Messages::new(Locale::Sk)).unwrap_err();
        assert_eq!(
            errors
                .errors()
                .iter()
                .map(|error| error.message.as_str())
                .collect::<Vec<_>>(),
            vec![
                "Názov knihy je povinný.",
                "Dátum vydania je povinný.",
                "povinné pole chýba"
            ]
        );
    }

    #[test]
    fn genre_is_optional() {
        let input = BookInput::new("Siddhartha", date!(1922 - 01 - 01), AuthorId::new(2));
        assert_eq!(validate(&input, &Messages::default()).unwrap().genre, None);
    }
}
