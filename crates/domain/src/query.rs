use serde_json::Value;

use crate::{BoardId, BoardImage, ImageCategory};

/// Filters applied to a board listing before a selection expression runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageQuery {
    pub board_id: BoardId,
    pub category: ImageCategory,
    pub starred_only: bool,
    pub keyword: Option<String>,
}

impl ImageQuery {
    pub fn for_board(board_id: BoardId) -> Self {
        Self {
            board_id,
            category: ImageCategory::Images,
            starred_only: false,
            keyword: None,
        }
    }

    /// Blank keywords are treated as absent.
    pub fn keyword(&self) -> Option<&str> {
        self.keyword
            .as_deref()
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
    }

    pub fn matches(&self, image: &BoardImage) -> bool {
        if image.board_id != self.board_id || image.category != self.category {
            return false;
        }
        if self.starred_only && !image.starred {
            return false;
        }
        self.matches_keyword(image.metadata_json.as_deref())
    }

    /// Case-insensitive substring match against the values of the metadata
    /// document. Object keys are not searched. Metadata that is not valid
    /// JSON is searched as plain text.
    pub fn matches_keyword(&self, metadata_json: Option<&str>) -> bool {
        let Some(keyword) = self.keyword() else {
            return true;
        };
        let Some(metadata) = metadata_json else {
            return false;
        };

        let needle = keyword.to_lowercase();
        match serde_json::from_str::<Value>(metadata) {
            Ok(document) => value_contains(&document, &needle),
            Err(_) => metadata.to_lowercase().contains(&needle),
        }
    }
}

fn value_contains(value: &Value, needle: &str) -> bool {
    match value {
        Value::Null => false,
        Value::String(text) => text.to_lowercase().contains(needle),
        Value::Bool(flag) => flag.to_string().contains(needle),
        Value::Number(number) => number.to_string().contains(needle),
        Value::Array(items) => items.iter().any(|item| value_contains(item, needle)),
        Value::Object(fields) => fields.values().any(|field| value_contains(field, needle)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImageName;

    fn image(name: &str, starred: bool, metadata: Option<&str>) -> BoardImage {
        BoardImage {
            name: ImageName::new(name).expect("name"),
            board_id: BoardId::new("b1").expect("board"),
            category: ImageCategory::Images,
            starred,
            created_at: "1".to_string(),
            metadata_json: metadata.map(str::to_string),
        }
    }

    #[test]
    fn default_query_matches_every_image_on_board() {
        let query = ImageQuery::for_board(BoardId::new("b1").expect("board"));
        assert!(query.matches(&image("a.png", false, None)));

        let other = ImageQuery::for_board(BoardId::new("b2").expect("board"));
        assert!(!other.matches(&image("a.png", false, None)));
    }

    #[test]
    fn starred_and_keyword_filters_combine() {
        let query = ImageQuery {
            starred_only: true,
            keyword: Some("Castle".to_string()),
            ..ImageQuery::for_board(BoardId::new("b1").expect("board"))
        };

        assert!(query.matches(&image("a.png", true, Some(r#"{"prompt":"a castle"}"#))));
        assert!(!query.matches(&image("b.png", false, Some(r#"{"prompt":"a castle"}"#))));
        assert!(!query.matches(&image("c.png", true, Some(r#"{"prompt":"a lake"}"#))));
        assert!(!query.matches(&image("d.png", true, None)));
    }

    #[test]
    fn keyword_searches_values_not_keys() {
        let query = ImageQuery {
            keyword: Some("width".to_string()),
            ..ImageQuery::for_board(BoardId::new("b1").expect("board"))
        };
        let imported = r#"{"source_entry":"a.png","source_format":"png","width":640,"height":480}"#;
        assert!(!query.matches_keyword(Some(imported)));

        let by_number = ImageQuery {
            keyword: Some("640".to_string()),
            ..query.clone()
        };
        assert!(by_number.matches_keyword(Some(imported)));

        let nested = ImageQuery {
            keyword: Some("fog".to_string()),
            ..query
        };
        assert!(nested.matches_keyword(Some(r#"{"tags":["Morning FOG","hills"]}"#)));
        assert!(nested.matches_keyword(Some("not json: fog bank")));
    }

    #[test]
    fn keyword_folds_non_ascii_case() {
        let query = ImageQuery {
            keyword: Some("CHÂTEAU".to_string()),
            ..ImageQuery::for_board(BoardId::new("b1").expect("board"))
        };
        assert!(query.matches_keyword(Some(r#"{"prompt":"un château la nuit"}"#)));
    }

    #[test]
    fn blank_keyword_is_ignored() {
        let query = ImageQuery {
            keyword: Some("   ".to_string()),
            ..ImageQuery::for_board(BoardId::new("b1").expect("board"))
        };
        assert_eq!(query.keyword(), None);
        assert!(query.matches(&image("a.png", false, None)));
    }
}
