use super::*;

#[test]
fn strings_are_json_escaped() {
    assert_eq!(js_string("a\"b"), r#""a\"b""#);
    assert_eq!(js_string("</script>"), r#""\u003c/script>""#);
    assert_eq!(
        js_string_array(&["/a-1.png".to_owned(), "/a-2.png".to_owned()]),
        r#"["/a-1.png", "/a-2.png"]"#
    );
}

#[test]
fn numbers_print_without_trailing_zeros() {
    assert_eq!(js_number_array(&[50.0, 33.3333, 100.0]), "[50, 33.3333, 100]");
    assert_eq!(json_number_array(&[12.5, 100.0]), "[12.5,100]");
}

#[test]
fn attributes_escape_their_quote() {
    assert_eq!(escape_attr(r#"it's "x" & <y>"#, '\''), r#"it&#39;s "x" &amp; &lt;y>"#);
    assert_eq!(escape_attr(r#"it's "x""#, '"'), "it's &quot;x&quot;");
}

#[test]
fn fill_replaces_every_occurrence() {
    assert_eq!(fill("__A__-__B__-__A__", &[("A", "1"), ("B", "2")]), "1-2-1");
}

#[test]
fn fill_does_not_rescan_values() {
    assert_eq!(fill("__A__ __B__", &[("A", "__B__"), ("B", "x")]), "__B__ x");
    assert_eq!(fill("a__b __C__", &[("C", "c")]), "a__b c");
}
