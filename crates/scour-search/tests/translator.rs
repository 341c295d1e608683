//! End-to-end tests: argument bags translated and run against an on-disk index.

#![allow(clippy::tests_outside_test_module)]

use std::collections::{BTreeMap, BTreeSet};

use scour_config::Config;
use scour_index::{ContentDocument, IndexRegistry, Language};
use scour_search::{
    IndexItemResolver, RequestContext, SearchArgs, SearchError, SearchResultPage, SearchTranslator,
};
use tempfile::TempDir;

const INDEX: &str = "content_master_index";
const HOME: &str = "{6A1E1D2F-0000-4000-8000-000000000001}";
const BIKES: &str = "{6A1E1D2F-0000-4000-8000-000000000002}";

/// Fixture index plus the config pointing at it.
struct Fixture {
    /// Keeps the index directory alive.
    _temp: TempDir,
    /// Registry over the fixture root.
    registry: IndexRegistry,
    /// Config whose index root is the fixture root.
    config: Config,
}

impl Fixture {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let registry = IndexRegistry::new(temp.path(), Language::English);
        let mut writer = registry.writer(INDEX).unwrap();
        writer.add_documents(&documents()).unwrap();
        writer.commit().unwrap();

        let mut config = Config::default();
        config.index.root = Some(temp.path().to_path_buf());

        Self {
            _temp: temp,
            registry,
            config,
        }
    }

    /// Commits extra documents on top of the fixture set.
    fn add(&self, docs: &[ContentDocument]) {
        let mut writer = self.registry.writer(INDEX).unwrap();
        writer.add_documents(docs).unwrap();
        writer.commit().unwrap();
    }

    fn search(&self, json: &str) -> Result<SearchResultPage, SearchError> {
        let args = SearchArgs::from_json(json)?;
        let resolver = IndexItemResolver::new(&self.registry, INDEX);
        let translator = SearchTranslator::new(&self.registry, &resolver, &self.config);
        translator.search(&args, &RequestContext::from_config(&self.config))
    }

    fn ids(&self, json: &str) -> BTreeSet<String> {
        self.search(json)
            .unwrap()
            .results
            .hits
            .into_iter()
            .map(|h| h.id)
            .collect()
    }
}

fn document(
    id: &str,
    path: &str,
    ancestors: &[&str],
    content: &str,
    latest: bool,
    fields: &[(&str, &str)],
) -> ContentDocument {
    ContentDocument {
        id: id.to_string(),
        path: path.to_string(),
        name: id.to_string(),
        ancestors: ancestors.iter().map(|a| (*a).to_string()).collect(),
        content: content.to_string(),
        language: "en".to_string(),
        version: if latest { 2 } else { 1 },
        is_latest_version: latest,
        fields: fields
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect::<BTreeMap<_, _>>(),
    }
}

/// Five documents: three latest versions contain "bicycle", two of those are sports.
fn documents() -> Vec<ContentDocument> {
    vec![
        document(
            BIKES,
            "/sitecore/content/home/bikes",
            &[HOME],
            "Road bicycle and mountain bicycle catalogue",
            true,
            &[("category", "sports"), ("color", "red")],
        ),
        document(
            "mountain",
            "/sitecore/content/home/bikes/mountain",
            &[HOME, BIKES],
            "Mountain bicycle for rough trails",
            true,
            &[("category", "sports"), ("color", "blue")],
        ),
        document(
            "city",
            "/sitecore/content/home/city",
            &[HOME],
            "City bicycle with a basket",
            true,
            &[("category", "commute"), ("color", "red")],
        ),
        document(
            "mountain-draft",
            "/sitecore/content/home/bikes/mountain",
            &[HOME, BIKES],
            "Draft bicycle text",
            false,
            &[("category", "sports")],
        ),
        document(
            "helmet",
            "/sitecore/content/home/helmet",
            &[HOME],
            "Safety helmet",
            true,
            &[("category", "sports"), ("color", "black")],
        ),
    ]
}

fn set(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|s| (*s).to_string()).collect()
}

const BIKES_ID: &str = "6a1e1d2f-0000-4000-8000-000000000002";

#[test]
fn bicycle_sports_scenario_returns_two_documents() {
    let fixture = Fixture::new();
    let ids = fixture.ids(
        r#"{"keyword": "bicycle", "latestVersion": true,
            "fieldsEqual": [{"name": "category", "value": "sports"}]}"#,
    );
    assert_eq!(ids, set(&[BIKES_ID, "mountain"]));
}

#[test]
fn defaults_return_all_latest_documents_at_offset_zero() {
    let fixture = Fixture::new();
    let page = fixture.search("{}").unwrap();

    assert_eq!(page.offset, 0);
    assert_eq!(page.results.total, 4);
    assert!(page.results.hits.iter().all(|h| h.is_latest_version));
}

#[test]
fn root_item_scopes_to_descendants() {
    let fixture = Fixture::new();
    for root in ["/sitecore/content/home/bikes", BIKES, BIKES_ID] {
        let page = fixture
            .search(&format!(
                r#"{{"rootItem": "{root}", "latestVersion": false}}"#
            ))
            .unwrap();
        assert_eq!(page.results.total, 2, "{root}");
        assert!(
            page.results
                .hits
                .iter()
                .all(|h| h.ancestors.iter().any(|a| a == BIKES_ID)),
            "{root}"
        );
    }
}

#[test]
fn root_known_only_as_ancestor_scopes_results() {
    let fixture = Fixture::new();
    fixture.add(&[document(
        "outside",
        "/sitecore/system/outside",
        &[],
        "Unrelated settings item",
        true,
        &[],
    )]);

    assert!(fixture.ids("{}").contains("outside"));
    assert_eq!(
        fixture.ids(&format!(r#"{{"rootItem": "{HOME}"}}"#)),
        set(&[BIKES_ID, "mountain", "city", "helmet"])
    );
}

#[test]
fn unresolvable_root_is_ignored() {
    let fixture = Fixture::new();
    assert_eq!(
        fixture.ids(r#"{"rootItem": "/sitecore/content/nowhere"}"#),
        fixture.ids("{}")
    );
}

#[test]
fn keyword_results_contain_the_keyword() {
    let fixture = Fixture::new();
    let page = fixture.search(r#"{"keyword": "bicycle"}"#).unwrap();

    assert_eq!(page.results.total, 3);
    assert!(
        page.results
            .hits
            .iter()
            .all(|h| h.content.to_lowercase().contains("bicycle"))
    );
}

#[test]
fn latest_version_flag() {
    let fixture = Fixture::new();
    let all = fixture.ids(r#"{"latestVersion": false}"#);
    let latest = fixture.ids(r#"{"latestVersion": true}"#);

    assert!(all.contains("mountain-draft"));
    assert!(!latest.contains("mountain-draft"));
    assert_eq!(latest, fixture.ids("{}"));
}

#[test]
fn field_filters_are_anded() {
    let fixture = Fixture::new();
    let sports = fixture.ids(r#"{"fieldsEqual": [{"name": "category", "value": "sports"}]}"#);
    let red = fixture.ids(r#"{"fieldsEqual": [{"name": "color", "value": "red"}]}"#);
    let both = fixture.ids(
        r#"{"fieldsEqual": [{"name": "category", "value": "sports"},
                            {"name": "color", "value": "red"}]}"#,
    );

    assert_eq!(both, set(&[BIKES_ID]));
    assert_eq!(both, &sports & &red);
}

#[test]
fn malformed_field_entry_fails() {
    let fixture = Fixture::new();
    let err = fixture
        .search(r#"{"fieldsEqual": [{"name": "category"}]}"#)
        .unwrap_err();

    assert_eq!(err.to_string(), "fieldsEqual[0] is missing 'value'");
}

#[test]
fn facets_never_filter() {
    let fixture = Fixture::new();
    let plain = fixture.search(r#"{"keyword": "bicycle"}"#).unwrap();
    let faceted = fixture
        .search(r#"{"keyword": "bicycle", "facetOn": ["color", "material"]}"#)
        .unwrap();

    assert_eq!(plain.results.hits, faceted.results.hits);
    let colors = faceted.results.facet("color").unwrap();
    assert_eq!(colors.values[0].value, "red");
    assert_eq!(colors.values[0].count, 2);
    assert!(faceted.results.facet("material").unwrap().values.is_empty());
}

#[test]
fn nul_facet_name_fails() {
    let fixture = Fixture::new();
    let err = fixture
        .search(r#"{"facetOn": ["color", "color\u0000red"]}"#)
        .unwrap_err();

    assert_eq!(err.to_string(), "facetOn[1] has a name containing NUL");
}

#[test]
fn garbage_language_searches_every_language() {
    let fixture = Fixture::new();
    let mut danish = document(
        "cykel",
        "/sitecore/content/home/cykel",
        &[HOME],
        "Danish bicycle page",
        true,
        &[],
    );
    danish.language = "da".to_string();
    fixture.add(&[danish]);

    let omitted = fixture.ids(r#"{"keyword": "bicycle"}"#);
    let garbage = fixture.ids(r#"{"language": "garbage string", "keyword": "bicycle"}"#);

    assert_eq!(omitted, set(&[BIKES_ID, "mountain", "city"]));
    assert_eq!(garbage, set(&[BIKES_ID, "mountain", "city", "cykel"]));
    assert_eq!(
        fixture.ids(r#"{"language": "da", "keyword": "bicycle"}"#),
        set(&["cykel"])
    );
}

#[test]
fn other_language_finds_nothing() {
    let fixture = Fixture::new();
    assert!(fixture.ids(r#"{"language": "da"}"#).is_empty());
}

#[test]
fn repeated_requests_are_identical() {
    let fixture = Fixture::new();
    let query = r#"{"keyword": "bicycle", "facetOn": "category", "first": 2}"#;
    assert_eq!(fixture.search(query).unwrap(), fixture.search(query).unwrap());
}

#[test]
fn paging_follows_end_cursor() {
    let fixture = Fixture::new();
    let first = fixture.search(r#"{"first": 3}"#).unwrap();
    assert_eq!(first.results.hits.len(), 3);
    assert!(first.page_info.has_next_page);
    assert!(!first.page_info.has_previous_page);
    assert_eq!(first.page_info.start_cursor.as_deref(), Some("1"));

    let end = first.page_info.end_cursor.clone().unwrap();
    let second = fixture
        .search(&format!(r#"{{"first": 3, "after": "{end}"}}"#))
        .unwrap();

    assert_eq!(second.offset, 3);
    assert_eq!(second.results.hits.len(), 1);
    assert!(!second.page_info.has_next_page);
    assert!(second.page_info.has_previous_page);

    let seen: BTreeSet<String> = first
        .results
        .hits
        .iter()
        .chain(&second.results.hits)
        .map(|h| h.id.clone())
        .collect();
    assert_eq!(seen, fixture.ids("{}"));
}

#[test]
fn last_and_before_page_backwards() {
    let fixture = Fixture::new();
    let tail = fixture.search(r#"{"last": 1}"#).unwrap();
    assert_eq!(tail.results.start, 3);

    let start = tail.page_info.start_cursor.clone().unwrap();
    let previous = fixture
        .search(&format!(r#"{{"last": 2, "before": {start}}}"#))
        .unwrap();
    assert_eq!(previous.results.start, 1);
    assert_eq!(previous.results.hits.len(), 2);
}

#[test]
fn invalid_cursor_fails() {
    let fixture = Fixture::new();
    let err = fixture.search(r#"{"after": "abc"}"#).unwrap_err();
    assert!(matches!(err, SearchError::InvalidCursor { argument: "after", .. }));
}

#[test]
fn unknown_index_fails() {
    let fixture = Fixture::new();
    let err = fixture.search(r#"{"index": "content_web_index"}"#).unwrap_err();
    assert!(err.to_string().contains("unknown index 'content_web_index'"));
}
