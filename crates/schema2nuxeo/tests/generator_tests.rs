//! End-to-end generation into scratch directories.

use std::fs;
use std::path::{Path, PathBuf};

use schema2nuxeo::extraction::vocabulary_loader;
use schema2nuxeo::generator::{generate, GenerateError};
use schema2nuxeo::model::context::GenerationContext;
use schema2nuxeo::model::vocabulary::Vocabulary;

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn vocabulary() -> Vocabulary {
    vocabulary_loader::load_json(&fixtures().join("vocabulary.json")).expect("fixture")
}

fn context() -> GenerationContext {
    GenerationContext::load(&fixtures().join("config")).expect("config")
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("reading {}: {e}", path.display()))
}

fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn creative_work_round_trip() {
    let scratch = tempfile::tempdir().unwrap();
    let target = scratch.path().join("out");

    let summary = generate(&vocabulary(), &context(), "CreativeWork", &target).expect("generate");
    assert_eq!(summary.types, vec!["CreativeWork", "Article", "NewsArticle"]);
    assert_eq!(summary.ui_types, vec!["CreativeWork", "NewsArticle"]);

    assert_eq!(
        listing(&target.join("schema")),
        vec!["Article.xsd", "CreativeWork.xsd", "NewsArticle.xsd", "listTypes.xsd"]
    );
    assert_eq!(
        listing(&target.join("osgi")),
        vec!["core-types-contrib.xml", "ecm-types-contrib.xml", "ui-types-contrib.xml"]
    );

    let article = read(&target.join("schema/Article.xsd"));
    assert!(article.contains(r#"schemaLocation="CreativeWork.xsd""#));
    assert!(article.contains(r#"<xs:element name="headline" type="xs:string">"#));
    assert!(article.contains(r#"<xs:element name="wordCount" type="xs:float">"#));
}

#[test]
fn context_tables_shape_the_creative_work_schema() {
    let scratch = tempfile::tempdir().unwrap();
    let target = scratch.path().join("out");
    generate(&vocabulary(), &context(), "CreativeWork", &target).expect("generate");

    let cw = read(&target.join("schema/CreativeWork.xsd"));
    assert!(!cw.contains(r#"name="about""#), "skipped field emitted:\n{cw}");
    assert!(cw.contains(r#"<xs:element name="keywords" type="lt:textList">"#));
    assert!(cw.contains(r#"<xs:element name="datePublished" type="xs:date">"#));
    assert!(cw.contains(r#"<xs:element name="isFamilyFriendly" type="xs:boolean">"#));
}

#[test]
fn news_article_uses_its_own_icon() {
    let scratch = tempfile::tempdir().unwrap();
    let target = scratch.path().join("out");
    generate(&vocabulary(), &context(), "CreativeWork", &target).expect("generate");

    let ui = read(&target.join("osgi/ui-types-contrib.xml"));
    let cw = ui.find(r#"<type id="CreativeWork">"#).expect("creative work entry");
    let news = ui.find(r#"<type id="NewsArticle">"#).expect("news entry");
    assert!(ui[cw..news].contains("<icon>/icons/file.gif</icon>"));
    assert!(ui[news..].contains("<icon>/icons/news.gif</icon>"));
}

#[test]
fn types_without_their_own_icon_line_are_not_registered() {
    let scratch = tempfile::tempdir().unwrap();
    let target = scratch.path().join("out");
    let summary = generate(&vocabulary(), &context(), "CreativeWork", &target).expect("generate");

    // Article inherits CreativeWork's icons but has no mapping of its own.
    assert!(!summary.ui_types.contains(&"Article".to_string()));
    let ui = read(&target.join("osgi/ui-types-contrib.xml"));
    assert!(!ui.contains(r#"<type id="Article">"#));
    assert!(!ui.contains("<type>Article</type>"));
    assert_eq!(ui.matches("<type>NewsArticle</type>").count(), 2);

    // Article still gets a schema and a document type.
    assert!(target.join("schema/Article.xsd").exists());
    let docs = read(&target.join("osgi/ecm-types-contrib.xml"));
    assert!(docs.contains(r#"<doctype name="Article" extends="File">"#));
}

#[test]
fn thing_root_generates_everything_in_dependency_order() {
    let scratch = tempfile::tempdir().unwrap();
    let target = scratch.path().join("out");

    let summary = generate(&vocabulary(), &context(), "Thing", &target).expect("generate");
    assert_eq!(
        summary.types,
        vec!["Thing", "CreativeWork", "Person", "Article", "NewsArticle"]
    );
    // Only types with their own icon line are registered.
    assert_eq!(summary.ui_types, vec!["CreativeWork", "NewsArticle"]);

    let thing = read(&target.join("schema/Thing.xsd"));
    assert!(thing.contains(r#"<xs:element name="additionalType_" type="xs:anyURI">"#));
    assert!(thing.contains(r#"<xs:element name="url" type="xs:anyURI">"#));

    let core = read(&target.join("osgi/core-types-contrib.xml"));
    let thing_pos = core.find(r#"name="Thing""#).unwrap();
    let news_pos = core.find(r#"name="NewsArticle""#).unwrap();
    assert!(thing_pos < news_pos);
}

#[test]
fn leaf_root_yields_a_single_schema() {
    let scratch = tempfile::tempdir().unwrap();
    let target = scratch.path().join("out");

    let summary = generate(&vocabulary(), &context(), "Person", &target).expect("generate");
    assert_eq!(summary.types, vec!["Person"]);
    assert!(summary.ui_types.is_empty());
    assert_eq!(
        listing(&target.join("schema")),
        vec!["Person.xsd", "listTypes.xsd"]
    );

    let doctypes = read(&target.join("osgi/ecm-types-contrib.xml"));
    assert_eq!(doctypes.matches("<doctype ").count(), 1);
}

#[test]
fn unknown_root_yields_empty_registries() {
    let scratch = tempfile::tempdir().unwrap();
    let target = scratch.path().join("out");

    let summary = generate(&vocabulary(), &context(), "Place", &target).expect("generate");
    assert!(summary.types.is_empty());
    assert_eq!(listing(&target.join("schema")), vec!["listTypes.xsd"]);

    let doctypes = read(&target.join("osgi/ecm-types-contrib.xml"));
    assert_eq!(doctypes.matches("<doctype ").count(), 0);
}

#[test]
fn rerun_replaces_previous_output() {
    let scratch = tempfile::tempdir().unwrap();
    let target = scratch.path().join("out");

    generate(&vocabulary(), &context(), "CreativeWork", &target).expect("first run");
    fs::write(target.join("stale.txt"), "left over").unwrap();

    generate(&vocabulary(), &context(), "Person", &target).expect("second run");
    assert!(!target.join("stale.txt").exists());
    assert!(!target.join("schema/Article.xsd").exists());
    assert!(target.join("schema/Person.xsd").exists());

    // No staging directories left behind.
    assert_eq!(listing(scratch.path()), vec!["out"]);
}

#[test]
fn first_run_into_nested_target_leaves_only_the_output() {
    let scratch = tempfile::tempdir().unwrap();
    let target = scratch.path().join("build").join("nuxeo");

    generate(&vocabulary(), &context(), "Person", &target).expect("generate");
    assert!(target.join("schema/Person.xsd").exists());
    assert_eq!(listing(&scratch.path().join("build")), vec!["nuxeo"]);
}

#[test]
fn failed_replacement_cleans_up_staging() {
    let scratch = tempfile::tempdir().unwrap();
    let target = scratch.path().join("out");
    fs::write(&target, "not a directory").unwrap();

    let err = generate(&vocabulary(), &context(), "Person", &target).unwrap_err();
    assert!(matches!(err, GenerateError::Io { .. }), "unexpected error: {err}");
    assert_eq!(fs::read_to_string(&target).unwrap(), "not a directory");
    assert_eq!(listing(scratch.path()), vec!["out"]);
}

#[test]
fn malformed_input_leaves_previous_output_untouched() {
    let scratch = tempfile::tempdir().unwrap();
    let target = scratch.path().join("out");
    generate(&vocabulary(), &context(), "CreativeWork", &target).expect("first run");

    let mut broken = vocabulary();
    broken
        .types
        .get_mut("Article")
        .unwrap()
        .specific_properties
        .push("nope".to_string());

    let err = generate(&broken, &context(), "CreativeWork", &target).unwrap_err();
    assert!(matches!(err, GenerateError::Load(_)), "unexpected error: {err}");
    assert!(target.join("schema/Article.xsd").exists());
}

#[test]
fn cycle_among_selected_types_fails() {
    let scratch = tempfile::tempdir().unwrap();
    let target = scratch.path().join("out");

    let mut cyclic = vocabulary();
    cyclic
        .types
        .get_mut("CreativeWork")
        .unwrap()
        .ancestors
        .push("Article".to_string());

    let err = generate(&cyclic, &context(), "CreativeWork", &target).unwrap_err();
    assert!(matches!(err, GenerateError::Cycle(_)), "unexpected error: {err}");
    assert!(!target.exists());
    assert!(listing(scratch.path()).is_empty());
}
