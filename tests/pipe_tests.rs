//! Tests for pipelines: `pipe!`, the `|` operator and `Pipeline`.
//!
//! Pipelines run over real documents here, so these tests also cover how
//! the wrappers hand values to one another.

use composable_soup::compose::{Pipeable, Pipeline, Value, pipe};
use composable_soup::error::SoupError;
use composable_soup::soup::{
    children, find, find_all, find_next_sibling, get, get_text, has_attr, parse, select,
    stripped_strings,
};
use rstest::{fixture, rstest};

const ARTICLE: &str = r#"
<article id="post">
  <h1>Title</h1>
  <p class="lead">First <b>bold</b> paragraph.</p>
  <p>Second paragraph.</p>
  <a href="/next" rel="next">Next</a>
</article>
"#;

#[fixture]
fn article() -> Value {
    pipe(ARTICLE, &parse()).expect("markup parses")
}

fn count() -> Pipeable {
    Pipeable::new("count", 1, |mut arguments| {
        let items: Value = arguments.positional(0)?;
        let length = match &items {
            Value::Nodes(nodes) => nodes.len(),
            Value::List(values) => values.len(),
            _ => 0,
        };
        Ok(Value::from(length))
    })
}

// =============================================================================
// pipe! Macro
// =============================================================================

#[rstest]
fn pipe_macro_reads_left_to_right(article: Value) {
    let lead = pipe!(article, find().arg("p"), get_text());

    assert_eq!(lead, Ok(Value::from("First bold paragraph.")));
}

#[rstest]
fn pipe_macro_with_only_a_value(article: Value) {
    assert_eq!(pipe!(article.clone()), Ok(article));
}

#[rstest]
fn pipe_macro_accepts_a_trailing_comma(article: Value) {
    let paragraphs = pipe!(article, find_all().arg("p"), count(),);

    assert_eq!(paragraphs, Ok(Value::Int(2)));
}

#[rstest]
fn pipe_macro_with_options(article: Value) {
    let lead = pipe!(
        article,
        find().arg("p").with("class_", "lead"),
        get_text().with("separator", "|").with("strip", true),
    );

    assert_eq!(lead, Ok(Value::from("First|bold|paragraph.")));
}

// =============================================================================
// Operator
// =============================================================================

#[rstest]
fn operator_matches_the_macro(article: Value) {
    let via_operator = (article.clone() | find().arg("a") | get().arg("href")).into_result();
    let via_macro = pipe!(article, find().arg("a"), get().arg("href"));

    assert_eq!(via_operator, via_macro);
    assert_eq!(via_operator, Ok(Value::from("/next")));
}

#[rstest]
fn operator_starts_from_markup_text() {
    let headings = ("<h1>a</h1><h2>b</h2><h1>c</h1>" | parse() | find_all().arg("h1") | count())
        .into_result();

    assert_eq!(headings, Ok(Value::Int(2)));
}

#[rstest]
fn composed_stages_are_reusable(article: Value) {
    let lead_text = find().arg("p") | get_text();

    assert_eq!(
        pipe(article.clone(), &lead_text),
        pipe!(article, find().arg("p"), get_text())
    );
}

#[rstest]
fn pipeline_can_be_built_stage_by_stage(article: Value) {
    let stages = [find().arg("h1"), find_next_sibling(), stripped_strings()];

    let result = stages
        .iter()
        .fold(Pipeline::new(article), Pipeline::then)
        .into_result();

    assert_eq!(
        result,
        Ok(Value::from(vec![
            "First".to_owned(),
            "bold".to_owned(),
            "paragraph.".to_owned(),
        ]))
    );
}

// =============================================================================
// Values flowing between stages
// =============================================================================

#[rstest]
fn list_results_feed_list_consumers(article: Value) {
    let heading_children = pipe!(article, select().arg("article > *"), count());

    assert_eq!(heading_children, Ok(Value::Int(4)));
}

#[rstest]
fn children_include_text_nodes(article: Value) {
    let paragraph_children = pipe!(article, find().arg("p"), children(), count());

    assert_eq!(paragraph_children, Ok(Value::Int(3)));
}

#[rstest]
fn predicates_end_a_pipeline(article: Value) {
    let has_rel = pipe!(article.clone(), find().arg("a"), has_attr().arg("rel"));
    let has_title = pipe!(article, find().arg("a"), has_attr().arg("title"));

    assert_eq!(has_rel, Ok(Value::Bool(true)));
    assert_eq!(has_title, Ok(Value::Bool(false)));
}

// =============================================================================
// Error Handling
// =============================================================================

#[rstest]
fn no_match_is_a_value_not_an_error(article: Value) {
    assert_eq!(pipe!(article, find().arg("table")), Ok(Value::None));
}

#[rstest]
fn stage_after_a_missing_node_reports_the_kind(article: Value) {
    let error = pipe!(article, find().arg("table"), get_text()).expect_err("none is not a node");

    assert_eq!(
        error,
        SoupError::ArgumentType {
            function: "get_text",
            argument: "#0".to_owned(),
            expected: "a node",
            found: "none",
        }
    );
}

#[rstest]
fn first_error_short_circuits(article: Value) {
    let ran = std::rc::Rc::new(std::cell::Cell::new(false));
    let witness = {
        let ran = std::rc::Rc::clone(&ran);
        Pipeable::new("witness", 1, move |_| {
            ran.set(true);
            Ok(Value::None)
        })
    };

    let result = pipe!(article, select().arg("p["), witness);

    assert!(matches!(result, Err(SoupError::Selector { .. })));
    assert!(!ran.get());
}

#[rstest]
fn overflowing_a_stage_is_an_arity_error(article: Value) {
    let error = pipe!(article, find().arg("p").arg("extra")).expect_err("three arguments");

    assert!(matches!(error, SoupError::Arity(ref arity) if arity.function == "find"));
}
