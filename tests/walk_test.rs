//! End-to-end walks over saved article pages and in-memory pages.

use std::path::PathBuf;

use firstlink::{
    Config, DirectoryProvider, DocumentProvider, HtmlOptions, PageId, PathWalker, StaticProvider,
    WalkResult, first_link_in_page, run_conjecture,
};

const WIKI: &str = "https://en.wikipedia.org/wiki/";

fn wiki(title: &str) -> PageId {
    PageId::from(format!("{WIKI}{title}"))
}

fn fixtures() -> DirectoryProvider {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/pages");
    DirectoryProvider::new(dir, HtmlOptions::default())
}

#[test]
fn test_saved_pages_reach_philosophy() {
    let result = run_conjecture(
        fixtures(),
        &wiki("Java_(programming_language)"),
        &wiki("Philosophy"),
    );

    assert_eq!(
        result,
        WalkResult::Success {
            path: vec![
                wiki("Java_(programming_language)"),
                wiki("Class-based_programming"),
                wiki("Object-oriented_programming"),
                wiki("Programming_paradigm"),
                wiki("Conceptualization"),
                wiki("Philosophy"),
            ]
        }
    );
}

#[test]
fn test_saved_pages_walk_from_bare_titles() {
    let config = Config {
        start: "Java_(programming_language)".to_string(),
        target: "Philosophy".to_string(),
        ..Config::default()
    };
    let start = config.start_page().unwrap();
    let target = config.target_page().unwrap();
    assert_eq!(start, wiki("Java_(programming_language)"));

    let result = run_conjecture(fixtures(), &start, &target);
    assert!(result.is_success());
    assert_eq!(result.path().len(), 6);
    assert_eq!(result.last(), Some(&wiki("Philosophy")));
}

#[test]
fn test_unnormalized_start_still_rejects_self_link() {
    let provider = StaticProvider::new(HtmlOptions::new("p").unwrap()).with_page(
        "https://en.wikipedia.org/wiki/Gödel",
        "<p><a href='/wiki/G%C3%B6del'>G\u{f6}del</a> studied <a href='/wiki/Logic'>logic</a>.</p>",
    );
    let result = run_conjecture(
        provider,
        &PageId::from("https://en.wikipedia.org/wiki/Gödel"),
        &wiki("Logic"),
    );
    assert_eq!(result.path().len(), 2);
    assert!(result.is_success());
}

#[test]
fn test_first_link_skips_pronunciation_italics_self_and_external() {
    let mut provider = fixtures();
    let page = provider.fetch(&wiki("Java_(programming_language)")).unwrap();
    assert_eq!(
        first_link_in_page(&page),
        Some(&wiki("Class-based_programming"))
    );
}

#[test]
fn test_fragment_and_red_links() {
    let mut provider = fixtures();
    let page = provider.fetch(&wiki("Class-based_programming")).unwrap();
    // The red link is dropped and the fragment is stripped from the next one.
    assert_eq!(
        first_link_in_page(&page),
        Some(&wiki("Object-oriented_programming"))
    );
}

#[test]
fn test_saved_pages_loop() {
    let result = run_conjecture(fixtures(), &wiki("Mathematics"), &wiki("Philosophy"));
    assert_eq!(
        result,
        WalkResult::LoopDetected {
            path: vec![wiki("Mathematics"), wiki("Mathematical_proof")],
            repeated: wiki("Mathematics"),
        }
    );
}

#[test]
fn test_saved_page_without_qualifying_links() {
    let result = run_conjecture(fixtures(), &wiki("Stub"), &wiki("Philosophy"));
    assert_eq!(result, WalkResult::DeadEnd { path: vec![wiki("Stub")] });
}

#[test]
fn test_unclosed_parenthesis_ends_with_block() {
    // The second paragraph's link qualifies again; its page is not saved.
    let result = run_conjecture(fixtures(), &wiki("Unbalanced"), &wiki("Philosophy"));
    assert_eq!(
        result,
        WalkResult::DeadEnd {
            path: vec![wiki("Unbalanced"), wiki("Missing_page")]
        }
    );
}

#[test]
fn test_walker_can_be_reused_across_starts() {
    let mut walker = PathWalker::new(fixtures());
    let target = wiki("Philosophy");

    let from_oop = walker.walk(&wiki("Object-oriented_programming"), &target);
    let from_math = walker.walk(&wiki("Mathematics"), &target);
    let again = walker.walk(&wiki("Object-oriented_programming"), &target);

    assert_eq!(from_oop.path().len(), 4);
    assert!(matches!(from_math, WalkResult::LoopDetected { .. }));
    assert_eq!(from_oop, again);
}

#[test]
fn test_result_json() {
    let result = run_conjecture(fixtures(), &wiki("Stub"), &wiki("Philosophy"));
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["outcome"], "dead_end");
    assert_eq!(json["path"][0], format!("{WIKI}Stub"));
}

fn opaque(pages: &[(&str, &str)]) -> StaticProvider {
    let mut provider = StaticProvider::new(HtmlOptions::new("p").unwrap());
    for (id, html) in pages {
        provider.insert(*id, *html);
    }
    provider
}

#[test]
fn test_parenthesized_and_italic_links_in_one_block() {
    let provider = opaque(&[
        (
            "A",
            "<p>See (external <a href='X'>x</a> note) <a href='B'>B</a> \
             then <i><a href='C'>C</a></i></p>",
        ),
        ("B", "<p>The <a href='T'>target</a>.</p>"),
    ]);
    assert_eq!(
        run_conjecture(provider, &PageId::from("A"), &PageId::from("T")),
        WalkResult::Success {
            path: vec![PageId::from("A"), PageId::from("B"), PageId::from("T")]
        }
    );
}

#[test]
fn test_cycle_through_three_pages() {
    let provider = opaque(&[
        ("A", "<p><a href='B'>b</a></p>"),
        ("B", "<p><a href='C'>c</a></p>"),
        ("C", "<p><a href='B'>b</a></p>"),
    ]);
    let result = run_conjecture(provider, &PageId::from("A"), &PageId::from("Z"));
    assert_eq!(
        result,
        WalkResult::LoopDetected {
            path: vec![PageId::from("A"), PageId::from("B"), PageId::from("C")],
            repeated: PageId::from("B"),
        }
    );
}

#[test]
fn test_start_equals_target_fetches_nothing() {
    let mut walker = PathWalker::new(opaque(&[]));
    let result = walker.walk(&PageId::from("A"), &PageId::from("A"));
    assert_eq!(result, WalkResult::Success { path: vec![PageId::from("A")] });
    assert_eq!(walker.provider().fetch_count(), 0);
}

#[test]
fn test_page_with_no_blocks_is_dead_end() {
    let provider = opaque(&[("A", "<div><a href='T'>not in a paragraph</a></div>")]);
    assert_eq!(
        run_conjecture(provider, &PageId::from("A"), &PageId::from("T")),
        WalkResult::DeadEnd { path: vec![PageId::from("A")] }
    );
}
