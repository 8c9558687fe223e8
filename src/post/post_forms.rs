use serde::{Deserialize, Serialize};

use crate::comment::model::NewComment;
use crate::utils::forms::{FieldErrors, Validator};

/// Comment submission from the detail page.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CommentForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub body: Option<String>,
}

impl CommentForm {
    pub fn clean(&self) -> Result<NewComment, FieldErrors> {
        let mut v = Validator::new();
        let name = v.required("name", self.name.as_deref(), Some(80));
        let email = v.email("email", self.email.as_deref());
        let content = v.required("body", self.body.as_deref(), None);
        v.finish()?;

        Ok(NewComment {
            name,
            email,
            content,
        })
    }
}

/// "Recommend this post" submission.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct EmailPostForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub to: Option<String>,
    pub comments: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EmailPostData {
    pub name: String,
    pub email: String,
    pub to: String,
    pub comments: String,
}

impl EmailPostForm {
    pub fn clean(&self) -> Result<EmailPostData, FieldErrors> {
        let mut v = Validator::new();
        let name = v.required("name", self.name.as_deref(), Some(25));
        let email = v.email("email", self.email.as_deref());
        let to = v.email("to", self.to.as_deref());
        let comments = v.optional(self.comments.as_deref());
        v.finish()?;

        Ok(EmailPostData {
            name,
            email,
            to,
            comments,
        })
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SearchForm {
    pub query: Option<String>,
}

impl SearchForm {
    pub fn clean(&self) -> Result<String, FieldErrors> {
        let mut v = Validator::new();
        let query = v.required("query", self.query.as_deref(), None);
        v.finish()?;
        Ok(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_form_requires_every_field() {
        let errors = CommentForm {
            name: Some("Ann".into()),
            ..Default::default()
        }
        .clean()
        .unwrap_err();
        assert!(!errors.contains_key("name"));
        assert!(errors.contains_key("email"));
        assert!(errors.contains_key("body"));
    }

    #[test]
    fn share_form_comments_are_optional() {
        let data = EmailPostForm {
            name: Some("Ann".into()),
            email: Some("ann@example.com".into()),
            to: Some("x@example.com".into()),
            comments: None,
        }
        .clean()
        .unwrap();
        assert_eq!(data.to, "x@example.com");
        assert_eq!(data.comments, "");
    }

    #[test]
    fn share_form_rejects_long_name_and_bad_recipient() {
        let errors = EmailPostForm {
            name: Some("a".repeat(26)),
            email: Some("ann@example.com".into()),
            to: Some("nobody".into()),
            comments: Some("hi".into()),
        }
        .clean()
        .unwrap_err();
        assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["name", "to"]);
    }

    #[test]
    fn blank_query_is_invalid() {
        let form = SearchForm {
            query: Some("  ".into()),
        };
        assert!(form.clean().is_err());
        let form = SearchForm {
            query: Some(" django ".into()),
        };
        assert_eq!(form.clean().unwrap(), "django");
    }
}
