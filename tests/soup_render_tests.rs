//! Serialization and encoding through the pipeable wrappers.

use composable_soup::compose::{Value, pipe};
use composable_soup::error::SoupError;
use composable_soup::soup::{
    decode, decode_contents, encode, encode_contents, find, parse, prettify,
};
use rstest::{fixture, rstest};

#[fixture]
fn menu() -> Value {
    pipe!(
        r#"<ul class="menu"><li>Caf&eacute; &amp; cr&egrave;me</li><li>&#9749; Espresso</li></ul>"#,
        parse(),
        find().arg("ul")
    )
    .expect("menu exists")
}

// =============================================================================
// Encoding
// =============================================================================

#[rstest]
fn unencodable_characters_become_character_references(menu: Value) {
    let bytes = pipe(menu, &encode().with("encoding", "ascii")).expect("never raises");

    let expected: &[u8] =
        b"<ul class=\"menu\"><li>Caf&#233; &amp; cr&#232;me</li><li>&#9749; Espresso</li></ul>";
    assert_eq!(bytes.as_bytes(), Some(expected));
    assert!(bytes.as_bytes().is_some_and(<[u8]>::is_ascii));
}

#[rstest]
fn ascii_output_is_seven_bit() {
    let bytes = pipe!(
        "<p>caf\u{e9}</p>",
        parse(),
        find().arg("p"),
        encode_contents().with("encoding", "ascii")
    );

    assert_eq!(bytes, Ok(Value::Bytes(b"caf&#233;".to_vec())));
}

#[rstest]
fn labels_without_an_encoder_are_rejected(menu: Value) {
    let error = pipe(menu, &encode().with("encoding", "iso-2022-kr")).expect_err("no encoder");

    assert_eq!(error, SoupError::UnknownEncoding("iso-2022-kr".to_owned()));
}

#[rstest]
fn utf8_is_the_default_encoding(menu: Value) {
    let bytes = pipe(menu.clone(), &encode_contents()).expect("encodes");
    let text = pipe(menu, &decode_contents()).expect("decodes");

    assert_eq!(bytes.as_bytes(), text.as_text().map(str::as_bytes));
}

#[rstest]
#[case::replace("replace", b"<li>? Espresso</li>".to_vec())]
#[case::ignore("ignore", b"<li> Espresso</li>".to_vec())]
fn lossy_strategies(menu: Value, #[case] errors: &str, #[case] expected: Vec<u8>) {
    let last_item = pipe!(
        menu,
        find().arg("li").with("string", "\u{2615} Espresso"),
        encode().with("encoding", "ascii").with("errors", errors)
    );

    assert_eq!(last_item, Ok(Value::Bytes(expected)));
}

#[rstest]
fn strict_strategy_reports_the_character(menu: Value) {
    let error = pipe(menu, &encode().with("encoding", "ascii").with("errors", "strict"))
        .expect_err("the first accented letter is outside ascii");

    assert!(matches!(
        error,
        SoupError::Encoding {
            encoding: "ascii",
            character: '\u{e9}'
        }
    ));
}

#[rstest]
fn unknown_encodings_are_errors(menu: Value) {
    let error = pipe(menu, &encode().with("encoding", "klingon")).expect_err("no such codec");

    assert_eq!(error, SoupError::UnknownEncoding("klingon".to_owned()));
}

#[rstest]
fn utf16_output_has_no_byte_order_mark() {
    let bytes = pipe!("<b>hi</b>", parse(), find().arg("b"), encode_contents().with("encoding", "utf-16le"));

    assert_eq!(bytes, Ok(Value::Bytes(vec![b'h', 0, b'i', 0])));
}

// =============================================================================
// Decoding
// =============================================================================

#[rstest]
#[case::minimal("minimal", "<li>Caf\u{e9} &amp; cr\u{e8}me</li>")]
#[case::html5("html5", "<li>Caf\u{e9} &amp; cr\u{e8}me</li>")]
#[case::verbatim("none", "<li>Caf\u{e9} & cr\u{e8}me</li>")]
fn formatters_choose_escaping(menu: Value, #[case] formatter: &str, #[case] expected: &str) {
    let first_item = pipe!(menu, find().arg("li"), decode().with("formatter", formatter));

    assert_eq!(first_item, Ok(Value::from(expected)));
}

#[rstest]
fn void_elements_follow_the_formatter() {
    let markup = pipe!(r#"<p>a<br>b<img alt=""></p>"#, parse(), find().arg("p")).expect("p exists");

    let minimal = pipe(markup.clone(), &decode_contents()).expect("decodes");
    let html5 = pipe(markup, &decode_contents().with("formatter", "html5")).expect("decodes");

    assert_eq!(minimal, Value::from(r#"a<br/>b<img alt=""/>"#));
    assert_eq!(html5, Value::from("a<br>b<img alt>"));
}

#[rstest]
fn fragments_render_without_a_wrapper() {
    let fragment = pipe("<em>x</em> y", &parse().with("fragment", true)).expect("parses");

    assert_eq!(pipe(fragment, &decode()), Ok(Value::from("<em>x</em> y")));
}

// =============================================================================
// Pretty Printing
// =============================================================================

#[rstest]
fn prettify_puts_each_tag_on_its_own_line(menu: Value) {
    let pretty = pipe(menu, &prettify()).expect("renders");

    assert_eq!(
        pretty,
        Value::from(
            "<ul class=\"menu\">\n <li>\n  Caf\u{e9} &amp; cr\u{e8}me\n </li>\n <li>\n  \u{2615} Espresso\n </li>\n</ul>\n"
        )
    );
}

#[rstest]
fn prettify_with_an_encoding_returns_bytes(menu: Value) {
    let pretty = pipe(menu, &prettify().with("encoding", "ascii")).expect("renders");

    assert!(
        pretty
            .as_bytes()
            .is_some_and(|bytes| bytes.windows(7).any(|window| window == b"&#9749;"))
    );
}

#[rstest]
fn preformatted_text_is_left_alone() {
    let block = pipe!("<pre>  keep\n  this</pre>", parse(), find().arg("pre"), prettify())
        .expect("renders");

    assert_eq!(block, Value::from("<pre>  keep\n  this</pre>\n"));
}
