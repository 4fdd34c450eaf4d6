//! Comment form
//!
//! Field values and "show validation error" flags live here, local to the
//! form, and never reach the global error banner.

use crate::types::CommentDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Body,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Body];

    /// Next field in tab order, wrapping around
    pub fn next(self) -> Self {
        match self {
            Field::Name => Field::Email,
            Field::Email => Field::Body,
            Field::Body => Field::Name,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Author Name",
            Field::Email => "Author Email",
            Field::Body => "Comment Text",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Name => "Name Surname",
            Field::Email => "email@test.com",
            Field::Body => "Type comment here",
        }
    }

    pub fn error_message(self) -> &'static str {
        match self {
            Field::Name => "Name is required",
            Field::Email => "Email is required",
            Field::Body => "Enter some text",
        }
    }
}

/// Which fields currently show their validation error
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: bool,
    pub email: bool,
    pub body: bool,
}

impl FieldErrors {
    pub fn get(&self, field: Field) -> bool {
        match field {
            Field::Name => self.name,
            Field::Email => self.email,
            Field::Body => self.body,
        }
    }

    fn set(&mut self, field: Field, shown: bool) {
        match field {
            Field::Name => self.name = shown,
            Field::Email => self.email = shown,
            Field::Body => self.body = shown,
        }
    }

    pub fn any(&self) -> bool {
        self.name || self.email || self.body
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentForm {
    pub name: String,
    pub email: String,
    pub body: String,
    pub errors: FieldErrors,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl CommentForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Body => &self.body,
        }
    }

    /// Edit a field. Editing hides that field's error.
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Body => self.body = value,
        }
        self.errors.set(field, false);
    }

    /// Leaving a field shows its error if it is blank
    pub fn blur(&mut self, field: Field) {
        let blank = is_blank(self.value(field));
        self.errors.set(field, blank);
    }

    /// Check every field and build the draft to send
    ///
    /// Sets the error flag of each blank field and clears the others. Returns
    /// `None` when any field is blank or when no post is open.
    pub fn validate(&mut self, post_id: Option<u64>) -> Option<CommentDraft> {
        for field in Field::ALL {
            let blank = is_blank(self.value(field));
            self.errors.set(field, blank);
        }

        if self.errors.any() {
            return None;
        }

        Some(CommentDraft {
            post_id: post_id?,
            name: self.name.clone(),
            email: self.email.clone(),
            body: self.body.clone(),
        })
    }

    /// "Clear" button: empty every field and hide every error
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// After a successful submission only the body is cleared, so the author
    /// can write another comment without retyping name and email.
    pub fn commit_succeeded(&mut self) {
        self.body.clear();
    }
}
