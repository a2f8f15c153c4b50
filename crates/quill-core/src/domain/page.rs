use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::post::{Post, PostStatus};
use crate::error::DomainError;

/// Page number used when none is given (1-based).
pub const DEFAULT_PAGE: u64 = 1;
/// Page size used when none is given.
pub const DEFAULT_LIMIT: u64 = 15;
/// Largest page size a caller may request.
pub const MAX_LIMIT: u64 = 100;

/// Equality filters on post attributes. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFilter {
    pub status: Option<PostStatus>,
    pub language: Option<String>,
    pub featured: Option<bool>,
}

impl PostFilter {
    pub fn status(mut self, status: PostStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.status.is_none_or(|s| post.status == s)
            && self
                .language
                .as_deref()
                .is_none_or(|l| post.language == l)
            && self.featured.is_none_or(|f| post.featured == f)
    }
}

/// Listing order shared by every store: newest first, ties broken by id.
pub fn listing_order(a: &Post, b: &Post) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

/// Status restriction applied by paginated listings.
///
/// Written as `"all"`, `"published"` or `"draft"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatusFilter {
    /// No status restriction; drafts included.
    All,
    Only(PostStatus),
}

impl Default for StatusFilter {
    fn default() -> Self {
        StatusFilter::Only(PostStatus::Published)
    }
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            other => other.parse().map(StatusFilter::Only),
        }
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StatusFilter> for String {
    fn from(status: StatusFilter) -> Self {
        status.as_str().to_string()
    }
}

/// Options for a paginated listing.
///
/// Defaults: `page = 1`, `limit = 15`, published posts only. Missing fields
/// take these defaults when deserialized too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FindPageOptions {
    pub page: u64,
    pub limit: u64,
    #[serde(rename = "where")]
    pub filter: PostFilter,
    pub status: StatusFilter,
}

impl Default for FindPageOptions {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            filter: PostFilter::default(),
            status: StatusFilter::default(),
        }
    }
}

impl FindPageOptions {
    pub fn page(mut self, page: u64) -> Self {
        self.page = page;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    pub fn filter(mut self, filter: PostFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.filter.language = Some(language.into());
        self
    }

    pub fn status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.page == 0 {
            return Err(DomainError::Validation(
                "page must be at least 1".to_string(),
            ));
        }
        if self.limit == 0 || self.limit > MAX_LIMIT {
            return Err(DomainError::Validation(format!(
                "limit must be between 1 and {}",
                MAX_LIMIT
            )));
        }
        Ok(())
    }

    /// The filter actually sent to storage.
    ///
    /// An explicit status restriction overrides any status in `filter`;
    /// `StatusFilter::All` leaves `filter` as given.
    pub fn effective_filter(&self) -> PostFilter {
        let mut filter = self.filter.clone();
        if let StatusFilter::Only(status) = self.status {
            filter.status = Some(status);
        }
        filter
    }

    /// Zero-based row offset of the first post on the requested page.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Row offset if a SQL store can bind it (fits in a signed 64-bit integer).
    /// `None` means the page lies beyond any possible result set.
    pub fn checked_offset(&self) -> Option<u64> {
        self.page
            .saturating_sub(1)
            .checked_mul(self.limit)
            .filter(|offset| *offset <= i64::MAX as u64)
    }
}

/// One page of a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPage {
    pub page: u64,
    pub limit: u64,
    pub pages: u64,
    pub total: u64,
    pub posts: Vec<Post>,
}

impl PostPage {
    pub fn new(posts: Vec<Post>, page: u64, limit: u64, total: u64) -> Self {
        let pages = if limit > 0 { total.div_ceil(limit) } else { 0 };

        Self {
            page,
            limit,
            pages,
            total,
            posts,
        }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewPost;

    #[test]
    fn test_default_options() {
        let options = FindPageOptions::default();
        assert_eq!(options.page, 1);
        assert_eq!(options.limit, 15);
        assert_eq!(options.status, StatusFilter::Only(PostStatus::Published));
        assert_eq!(options.offset(), 0);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate_bounds() {
        assert!(FindPageOptions::default().page(0).validate().is_err());
        assert!(FindPageOptions::default().limit(0).validate().is_err());
        assert!(FindPageOptions::default().limit(MAX_LIMIT + 1).validate().is_err());
        assert!(FindPageOptions::default().limit(MAX_LIMIT).validate().is_ok());
    }

    #[test]
    fn test_effective_filter() {
        let options = FindPageOptions::default().language("fr");
        let filter = options.effective_filter();
        assert_eq!(filter.status, Some(PostStatus::Published));
        assert_eq!(filter.language.as_deref(), Some("fr"));

        let all = FindPageOptions::default()
            .filter(PostFilter::default().status(PostStatus::Draft))
            .status(StatusFilter::All);
        assert_eq!(all.effective_filter().status, Some(PostStatus::Draft));

        let overridden = FindPageOptions::default()
            .filter(PostFilter::default().status(PostStatus::Draft));
        assert_eq!(
            overridden.effective_filter().status,
            Some(PostStatus::Published)
        );
    }

    #[test]
    fn test_page_count() {
        assert_eq!(PostPage::new(vec![], 1, 15, 52).pages, 4);
        assert_eq!(PostPage::new(vec![], 1, 30, 52).pages, 2);
        assert_eq!(PostPage::new(vec![], 1, 10, 102).pages, 11);
        assert_eq!(PostPage::new(vec![], 1, 10, 0).pages, 0);
        assert_eq!(PostPage::new(vec![], 3, 10, 30).pages, 3);
    }

    #[test]
    fn test_offset() {
        assert_eq!(FindPageOptions::default().page(2).offset(), 15);
        assert_eq!(FindPageOptions::default().page(3).limit(10).offset(), 20);
        assert_eq!(FindPageOptions::default().page(u64::MAX).offset(), u64::MAX);
    }

    #[test]
    fn test_checked_offset() {
        assert_eq!(FindPageOptions::default().page(2).checked_offset(), Some(15));
        assert_eq!(FindPageOptions::default().page(u64::MAX).checked_offset(), None);
        assert_eq!(
            FindPageOptions::default()
                .page(1 << 62)
                .limit(4)
                .checked_offset(),
            None
        );
        assert_eq!(
            FindPageOptions::default()
                .page(1 << 61)
                .limit(4)
                .checked_offset(),
            Some(((1u64 << 61) - 1) * 4)
        );
    }

    #[test]
    fn test_filter_matches() {
        let post = Post::create(
            NewPost::new("Bonjour", "").with_language("fr"),
            "bonjour".to_string(),
        );

        assert!(PostFilter::default().matches(&post));
        assert!(PostFilter::default().language("fr").matches(&post));
        assert!(!PostFilter::default().language("en").matches(&post));
        assert!(!PostFilter::default()
            .status(PostStatus::Published)
            .matches(&post));
        assert!(PostFilter::default().featured(false).matches(&post));
    }

    #[test]
    fn test_status_filter_parse() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "draft".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(PostStatus::Draft)
        );
        assert!("bogus".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: FindPageOptions = serde_json::from_str(r#"{"page":2}"#).unwrap();
        assert_eq!(options, FindPageOptions::default().page(2));

        let options: FindPageOptions =
            serde_json::from_str(r#"{"page":2,"limit":10,"status":"published"}"#).unwrap();
        assert_eq!(options.limit, 10);
        assert_eq!(options.status, StatusFilter::Only(PostStatus::Published));

        let options: FindPageOptions =
            serde_json::from_str(r#"{"status":"all","where":{"language":"fr"}}"#).unwrap();
        assert_eq!(options.page, DEFAULT_PAGE);
        assert_eq!(options.status, StatusFilter::All);
        assert_eq!(options.filter.language.as_deref(), Some("fr"));

        let empty: FindPageOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, FindPageOptions::default());

        assert!(serde_json::from_str::<FindPageOptions>(r#"{"status":"bogus"}"#).is_err());
    }

    #[test]
    fn test_options_serialize_status_as_string() {
        let options = FindPageOptions::default()
            .status(StatusFilter::All)
            .language("fr");
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["status"], "all");
        assert_eq!(json["where"]["language"], "fr");

        let back: FindPageOptions = serde_json::from_value(json).unwrap();
        assert_eq!(back, options);

        assert_eq!(
            serde_json::to_value(StatusFilter::Only(PostStatus::Draft)).unwrap(),
            "draft"
        );
    }
}
