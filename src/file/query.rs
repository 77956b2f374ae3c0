//! Parameterized query construction for the `files` table.
//!
//! Predicates are collected as an ordered list of clauses, each optionally
//! carrying one bound value. Placeholders are written only when the query is
//! rendered: a clause's value is pushed onto the parameter list first and its
//! `{}` markers are replaced with `$n`, where `n` is the parameter count right
//! after that push. A clause can therefore never refer to the wrong slot,
//! whatever combination of predicates ends up included.

use chrono::{DateTime, Utc};

use crate::db::{SqlQuery, SqlValue};

/// Marker replaced by the clause's `$n` placeholder at render time.
const PLACEHOLDER: &str = "{}";

/// Columns returned by every `files` query. UUID columns are cast to text.
const FILE_COLUMNS: &str = "id::text AS id, user_id, file_name, original_name, storage_url, \
     storage_key, mime_type, file_size, parent_id::text AS parent_id, is_folder, is_public, \
     created_at, updated_at, deleted_at";

/// Listing order shared by every filter combination: folders first, then newest.
const LIST_ORDER: &str = "ORDER BY is_folder DESC, updated_at DESC";

pub const DEFAULT_LIMIT: i64 = 50;
pub const MAX_LIMIT: i64 = 200;

/// Parent directory constraint of a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ParentFilter {
    /// No constraint.
    #[default]
    Any,
    /// Top-level rows only (`parent_id IS NULL`).
    Root,
    /// Direct children of the given directory.
    Id(String),
}

/// Filtered, paginated listing request.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    /// Owner every row must belong to.
    pub owner: String,
    pub parent: ParentFilter,
    pub include_deleted: bool,
    /// Case-insensitive substring match on name or original name.
    pub search: Option<String>,
    pub public_only: bool,
    pub folders_only: bool,
    pub files_only: bool,
    /// Page size, clamped to `1..=200`; 50 when absent.
    pub limit: Option<i64>,
    /// Rows to skip, clamped to `>= 0`; 0 when absent.
    pub offset: Option<i64>,
}

impl ListFilter {
    /// Create a filter scoped to `owner` with every option off.
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            ..Default::default()
        }
    }

    pub fn with_parent(mut self, parent: ParentFilter) -> Self {
        self.parent = parent;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_deleted(mut self) -> Self {
        self.include_deleted = true;
        self
    }

    pub fn public_only(mut self) -> Self {
        self.public_only = true;
        self
    }

    pub fn folders_only(mut self) -> Self {
        self.folders_only = true;
        self
    }

    pub fn files_only(mut self) -> Self {
        self.files_only = true;
        self
    }

    pub fn with_page(mut self, limit: i64, offset: i64) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }

    /// Effective page size.
    pub fn effective_limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Effective offset.
    pub fn effective_offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// Options for single-row lookups.
#[derive(Debug, Clone, Default)]
pub struct LookupOptions {
    /// Restrict the lookup to this owner.
    pub owner: Option<String>,
    pub include_deleted: bool,
}

impl LookupOptions {
    /// Lookup restricted to `owner`, excluding deleted rows.
    pub fn scoped(owner: impl Into<String>) -> Self {
        Self {
            owner: Some(owner.into()),
            include_deleted: false,
        }
    }
}

enum Clause {
    Fixed(String),
    Bound { template: String, value: SqlValue },
}

/// Ordered predicate list; rendered into `AND`-joined text plus parameters.
#[derive(Default)]
struct Predicates {
    clauses: Vec<Clause>,
}

impl Predicates {
    fn fixed(&mut self, clause: impl Into<String>) -> &mut Self {
        self.clauses.push(Clause::Fixed(clause.into()));
        self
    }

    /// Add a clause whose `{}` markers all refer to `value`.
    fn bound(&mut self, template: impl Into<String>, value: impl Into<SqlValue>) -> &mut Self {
        self.clauses.push(Clause::Bound {
            template: template.into(),
            value: value.into(),
        });
        self
    }

    fn render(self, params: &mut Vec<SqlValue>) -> String {
        let rendered: Vec<String> = self
            .clauses
            .into_iter()
            .map(|clause| match clause {
                Clause::Fixed(text) => text,
                Clause::Bound { template, value } => {
                    let placeholder = bind(params, value);
                    template.replace(PLACEHOLDER, &placeholder)
                }
            })
            .collect();
        rendered.join(" AND ")
    }
}

/// Push `value` and return the placeholder naming its slot.
fn bind(params: &mut Vec<SqlValue>, value: impl Into<SqlValue>) -> String {
    params.push(value.into());
    format!("${}", params.len())
}

fn select(predicates: Predicates, tail: &str, params: &mut Vec<SqlValue>) -> String {
    let where_clause = predicates.render(params);
    let mut text = format!("SELECT {FILE_COLUMNS} FROM files");
    if !where_clause.is_empty() {
        text.push_str(" WHERE ");
        text.push_str(&where_clause);
    }
    if !tail.is_empty() {
        text.push(' ');
        text.push_str(tail);
    }
    text
}

/// Build the filtered, paginated listing query.
pub fn build_list(filter: &ListFilter) -> SqlQuery {
    let mut predicates = Predicates::default();

    predicates.bound("user_id = {}", filter.owner.as_str());

    match &filter.parent {
        ParentFilter::Any => {}
        // NULL never equals itself, so the root case is structural, not a bound value.
        ParentFilter::Root => {
            predicates.fixed("parent_id IS NULL");
        }
        ParentFilter::Id(id) => {
            predicates.bound("parent_id = {}::uuid", id.as_str());
        }
    }

    if !filter.include_deleted {
        predicates.fixed("deleted_at IS NULL");
    }

    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        predicates.bound(
            "(file_name ILIKE {} OR original_name ILIKE {})",
            format!("%{search}%"),
        );
    }

    if filter.public_only {
        predicates.fixed("is_public = TRUE");
    }

    // Asking for both folders and files is treated as no kind filter.
    match (filter.folders_only, filter.files_only) {
        (true, false) => {
            predicates.fixed("is_folder = TRUE");
        }
        (false, true) => {
            predicates.fixed("is_folder = FALSE");
        }
        _ => {}
    }

    let mut params = Vec::new();
    let mut text = select(predicates, LIST_ORDER, &mut params);

    let limit = bind(&mut params, filter.effective_limit());
    let offset = bind(&mut params, filter.effective_offset());
    text.push_str(&format!(" LIMIT {limit} OFFSET {offset}"));

    SqlQuery { text, params }
}

fn build_lookup(key_clause: &str, key: &str, options: &LookupOptions) -> SqlQuery {
    let mut predicates = Predicates::default();
    predicates.bound(key_clause, key);

    if let Some(owner) = &options.owner {
        predicates.bound("user_id = {}", owner.as_str());
    }
    if !options.include_deleted {
        predicates.fixed("deleted_at IS NULL");
    }

    let mut params = Vec::new();
    let text = select(predicates, "LIMIT 1", &mut params);
    SqlQuery { text, params }
}

/// Build a point lookup by row ID. The ID is always `$1`, the owner `$2`.
pub fn build_get_by_id(id: &str, options: &LookupOptions) -> SqlQuery {
    build_lookup("id = {}::uuid", id, options)
}

/// Build a point lookup by storage key.
pub fn build_get_by_storage_key(storage_key: &str, options: &LookupOptions) -> SqlQuery {
    build_lookup("storage_key = {}", storage_key, options)
}

/// Build the query listing every live directory of `owner`, newest first.
pub fn build_list_directories(owner: &str) -> SqlQuery {
    let mut predicates = Predicates::default();
    predicates
        .bound("user_id = {}", owner)
        .fixed("is_folder = TRUE")
        .fixed("deleted_at IS NULL");

    let mut params = Vec::new();
    let text = select(predicates, "ORDER BY updated_at DESC", &mut params);
    SqlQuery { text, params }
}

/// Build a lookup of one live directory of `owner`.
pub fn build_get_directory(id: &str, owner: &str) -> SqlQuery {
    let mut predicates = Predicates::default();
    predicates
        .bound("id = {}::uuid", id)
        .bound("user_id = {}", owner)
        .fixed("is_folder = TRUE")
        .fixed("deleted_at IS NULL");

    let mut params = Vec::new();
    let text = select(predicates, "LIMIT 1", &mut params);
    SqlQuery { text, params }
}

/// Build the query listing live files directly inside a directory.
///
/// With `include_top_level`, files without any parent are listed as well.
pub fn build_list_directory_files(
    owner: &str,
    directory_id: &str,
    include_top_level: bool,
) -> SqlQuery {
    let parent_clause = if include_top_level {
        "(parent_id = {}::uuid OR parent_id IS NULL)"
    } else {
        "parent_id = {}::uuid"
    };

    let mut predicates = Predicates::default();
    predicates
        .bound("user_id = {}", owner)
        .bound(parent_clause, directory_id)
        .fixed("is_folder = FALSE")
        .fixed("deleted_at IS NULL");

    let mut params = Vec::new();
    let text = select(predicates, "ORDER BY updated_at DESC", &mut params);
    SqlQuery { text, params }
}

/// Values of a new file row.
#[derive(Debug, Clone)]
pub struct FileInsert<'a> {
    pub owner: &'a str,
    pub name: &'a str,
    pub storage_locator: Option<&'a str>,
    pub mime_type: &'a str,
    pub size: Option<i64>,
    pub directory_id: &'a str,
    pub now: DateTime<Utc>,
}

/// Build the insert for a public, non-folder file row, returning the new row.
pub fn build_insert_file(insert: &FileInsert<'_>) -> SqlQuery {
    let mut params = Vec::new();

    let columns: [(&str, String); 8] = [
        ("user_id", format!("{}::text", bind(&mut params, insert.owner))),
        ("file_name", format!("{}::text", bind(&mut params, insert.name))),
        ("original_name", format!("{}::text", bind(&mut params, insert.name))),
        (
            "storage_url",
            format!("{}::text", bind(&mut params, insert.storage_locator)),
        ),
        ("storage_key", format!("{}::text", bind(&mut params, insert.name))),
        ("mime_type", format!("{}::text", bind(&mut params, insert.mime_type))),
        ("file_size", format!("{}::bigint", bind(&mut params, insert.size))),
        (
            "parent_id",
            format!("{}::uuid", bind(&mut params, insert.directory_id)),
        ),
    ];
    let now = format!("{}::timestamptz", bind(&mut params, SqlValue::Timestamp(insert.now)));

    let names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
    let values: Vec<&str> = columns.iter().map(|(_, value)| value.as_str()).collect();

    let text = format!(
        "INSERT INTO files ({}, is_folder, is_public, created_at, updated_at) \
         VALUES ({}, FALSE, TRUE, {now}, {now}) RETURNING {FILE_COLUMNS}",
        names.join(", "),
        values.join(", "),
    );

    SqlQuery { text, params }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use regex::Regex;
    use std::collections::BTreeSet;

    static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$(\d+)").unwrap());

    fn placeholders(text: &str) -> BTreeSet<usize> {
        PLACEHOLDER_RE
            .captures_iter(text)
            .map(|c| c[1].parse().unwrap())
            .collect()
    }

    /// Every placeholder names an existing slot and every slot is referenced.
    fn assert_placeholders_consistent(query: &SqlQuery) {
        let used = placeholders(&query.text);
        let expected: BTreeSet<usize> = (1..=query.params.len()).collect();
        assert_eq!(used, expected, "query: {}", query.text);
    }

    fn text(s: &str) -> SqlValue {
        SqlValue::Text(s.to_string())
    }

    #[test]
    fn test_minimal_list() {
        let query = build_list(&ListFilter::new("u1"));

        assert_eq!(query.params, vec![text("u1"), SqlValue::Int(50), SqlValue::Int(0)]);
        assert!(query.text.contains("WHERE user_id = $1 AND deleted_at IS NULL"));
        assert!(query
            .text
            .ends_with("ORDER BY is_folder DESC, updated_at DESC LIMIT $2 OFFSET $3"));
        assert_placeholders_consistent(&query);
    }

    #[test]
    fn test_all_filter_combinations_keep_placeholders_aligned() {
        let parents = [
            ParentFilter::Any,
            ParentFilter::Root,
            ParentFilter::Id("5c1f7d9e-2b3a-4c6d-8e9f-0a1b2c3d4e5f".to_string()),
        ];
        let searches = [None, Some(String::new()), Some("report".to_string())];

        for parent in &parents {
            for search in &searches {
                for bits in 0u8..16 {
                    let filter = ListFilter {
                        owner: "u1".to_string(),
                        parent: parent.clone(),
                        include_deleted: bits & 1 != 0,
                        search: search.clone(),
                        public_only: bits & 2 != 0,
                        folders_only: bits & 4 != 0,
                        files_only: bits & 8 != 0,
                        limit: Some(10),
                        offset: Some(20),
                    };
                    let query = build_list(&filter);

                    assert_placeholders_consistent(&query);
                    let n = query.params.len();
                    assert_eq!(query.params[n - 2], SqlValue::Int(10));
                    assert_eq!(query.params[n - 1], SqlValue::Int(20));
                    assert_eq!(query.params[0], text("u1"));
                    assert!(query.text.contains(LIST_ORDER));
                }
            }
        }
    }

    #[test]
    fn test_limit_clamping() {
        let with_limit = |limit: Option<i64>| {
            let mut filter = ListFilter::new("u1");
            filter.limit = limit;
            build_list(&filter).params[1].clone()
        };

        assert_eq!(with_limit(Some(0)), SqlValue::Int(1));
        assert_eq!(with_limit(Some(-3)), SqlValue::Int(1));
        assert_eq!(with_limit(Some(500)), SqlValue::Int(200));
        assert_eq!(with_limit(Some(200)), SqlValue::Int(200));
        assert_eq!(with_limit(None), SqlValue::Int(50));
    }

    #[test]
    fn test_offset_clamping() {
        let query = build_list(&ListFilter::new("u1").with_page(10, -5));
        assert_eq!(query.params[2], SqlValue::Int(0));

        let query = build_list(&ListFilter::new("u1").with_page(10, 30));
        assert_eq!(query.params[2], SqlValue::Int(30));
    }

    #[test]
    fn test_root_parent_is_structural() {
        let query = build_list(&ListFilter::new("u1").with_parent(ParentFilter::Root));

        assert!(query.text.contains("parent_id IS NULL"));
        assert_eq!(query.params.len(), 3);
        assert!(!query.params.contains(&SqlValue::Null));
    }

    #[test]
    fn test_parent_id_binds_one_value() {
        let query = build_list(
            &ListFilter::new("u1").with_parent(ParentFilter::Id("x".to_string())),
        );

        assert_eq!(query.params.len(), 4);
        assert_eq!(query.params[1], text("x"));
        assert!(query.text.contains("parent_id = $2::uuid"));
        assert!(!query.text.contains("parent_id IS NULL"));
    }

    #[test]
    fn test_search_uses_one_slot_twice() {
        let query = build_list(
            &ListFilter::new("u1")
                .with_parent(ParentFilter::Id("p".to_string()))
                .with_search("rep"),
        );

        assert_eq!(query.params[2], text("%rep%"));
        assert!(query
            .text
            .contains("(file_name ILIKE $3 OR original_name ILIKE $3)"));
        assert!(query.text.contains("LIMIT $4 OFFSET $5"));
    }

    #[test]
    fn test_empty_search_is_ignored() {
        let query = build_list(&ListFilter::new("u1").with_search(""));
        assert!(!query.text.contains("ILIKE"));
        assert_eq!(query.params.len(), 3);
    }

    #[test]
    fn test_search_value_is_never_inlined() {
        let query = build_list(&ListFilter::new("u1").with_search("x' OR '1'='1"));
        assert!(!query.text.contains("'1'='1"));
        assert_eq!(query.params[1], text("%x' OR '1'='1%"));
    }

    #[test]
    fn test_include_deleted_drops_clause() {
        let query = build_list(&ListFilter::new("u1").with_deleted());
        assert!(!query.text.contains("deleted_at IS NULL"));
    }

    #[test]
    fn test_public_only() {
        let query = build_list(&ListFilter::new("u1").public_only());
        assert!(query.text.contains("is_public = TRUE"));
        assert_eq!(query.params.len(), 3);
    }

    #[test]
    fn test_folders_and_files_filters() {
        let folders = build_list(&ListFilter::new("u1").folders_only());
        assert!(folders.text.contains("is_folder = TRUE"));

        let files = build_list(&ListFilter::new("u1").files_only());
        assert!(files.text.contains("is_folder = FALSE"));

        let both = build_list(&ListFilter::new("u1").folders_only().files_only());
        assert!(!both.text.contains("is_folder ="));
        assert!(both.text.contains("ORDER BY is_folder DESC"));
    }

    #[test]
    fn test_get_by_id_scoped() {
        let query = build_get_by_id("abc", &LookupOptions::scoped("u1"));

        assert_eq!(query.params, vec![text("abc"), text("u1")]);
        assert!(query
            .text
            .contains("WHERE id = $1::uuid AND user_id = $2 AND deleted_at IS NULL"));
        assert!(query.text.ends_with("LIMIT 1"));
        assert_placeholders_consistent(&query);
    }

    #[test]
    fn test_get_by_id_unscoped_with_deleted() {
        let options = LookupOptions {
            owner: None,
            include_deleted: true,
        };
        let query = build_get_by_id("abc", &options);

        assert_eq!(query.params, vec![text("abc")]);
        assert!(!query.text.contains("user_id"));
        assert!(!query.text.contains("deleted_at IS NULL"));
    }

    #[test]
    fn test_get_by_storage_key() {
        let query = build_get_by_storage_key("simple.txt", &LookupOptions::scoped("u1"));

        assert!(query.text.contains("storage_key = $1 AND user_id = $2"));
        assert_placeholders_consistent(&query);
    }

    #[test]
    fn test_list_directories() {
        let query = build_list_directories("u1");

        assert_eq!(query.params, vec![text("u1")]);
        assert!(query.text.contains("is_folder = TRUE"));
        assert!(query.text.contains("deleted_at IS NULL"));
        assert!(query.text.ends_with("ORDER BY updated_at DESC"));
    }

    #[test]
    fn test_get_directory() {
        let query = build_get_directory("d1", "u1");

        assert_eq!(query.params, vec![text("d1"), text("u1")]);
        assert!(query.text.contains("id = $1::uuid AND user_id = $2 AND is_folder = TRUE"));
        assert_placeholders_consistent(&query);
    }

    #[test]
    fn test_list_directory_files() {
        let query = build_list_directory_files("u1", "d1", false);
        assert!(query.text.contains("parent_id = $2::uuid AND is_folder = FALSE"));
        assert_eq!(query.params, vec![text("u1"), text("d1")]);

        let query = build_list_directory_files("u1", "d1", true);
        assert!(query
            .text
            .contains("(parent_id = $2::uuid OR parent_id IS NULL)"));
        assert_placeholders_consistent(&query);
    }

    #[test]
    fn test_insert_file() {
        let now = Utc::now();
        let query = build_insert_file(&FileInsert {
            owner: "u1",
            name: "notes.txt",
            storage_locator: None,
            mime_type: "text/plain",
            size: Some(5),
            directory_id: "d1",
            now,
        });

        assert_eq!(query.params.len(), 9);
        assert_eq!(query.params[3], SqlValue::Null);
        assert_eq!(query.params[6], SqlValue::Int(5));
        assert_eq!(query.params[8], SqlValue::Timestamp(now));
        assert!(query.text.contains("VALUES ($1::text, $2::text"));
        assert!(query.text.contains("FALSE, TRUE, $9::timestamptz, $9::timestamptz"));
        assert!(query.text.contains("RETURNING id::text AS id"));
        assert_placeholders_consistent(&query);
    }
}
