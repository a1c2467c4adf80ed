use chrono::NaiveDate;
use postmatter::{parse, Metadata, Post, Value};
use proptest::{collection, prelude::*};

fn key() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{1,10}(\\.[A-Za-z0-9_-]{1,6}){0,2}"
}

// quotes, backslashes, control characters and non-ASCII included
fn text() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        r#"["\\'#=\[\]\t\r\n\x00\x7F\x{85}éü字🦀 a-z]{0,16}"#,
    ]
}

fn value() -> impl Strategy<Value = Value> {
    prop_oneof![
        text().prop_map(Value::String),
        collection::vec(text(), 0..4).prop_map(Value::List),
        (1i32..=9999, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| {
            Value::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
        }),
    ]
}

fn body() -> impl Strategy<Value = String> {
    collection::vec(
        prop_oneof![
            Just("+++\n".to_string()),
            Just("+++".to_string()),
            "[^\n]{0,20}\n",
            any::<String>(),
        ],
        0..6,
    )
    .prop_map(|parts| parts.concat())
}

fn post() -> impl Strategy<Value = Post> {
    (collection::btree_map(key(), value(), 0..6), body())
        .prop_map(|(metadata, body)| Post::new(metadata, body))
}

proptest! {
    #[test]
    fn test_written_posts_parse_back(post in post()) {
        prop_assert_eq!(parse(&post.to_front_matter()), Ok(post));
    }

    #[test]
    fn test_keys_and_body_survive_loose_formatting(
        metadata in collection::btree_map(key(), value(), 0..6),
        body in body(),
        padding in collection::vec((" {0,3}", " {0,3}", prop::bool::ANY), 6),
    ) {
        let mut text = String::from("+++\n");
        for ((key, value), (before, after, blank)) in metadata.iter().zip(&padding) {
            if *blank {
                text.push_str("\n# comment\n");
            }
            text.push_str(&format!("{key}{before}={after}{value}\n"));
        }
        text.push_str("+++\n");
        text.push_str(&body);

        let post = parse(&text).unwrap();
        let keys: Vec<_> = post.metadata().keys().collect();
        let expected: Vec<_> = metadata.keys().collect();
        prop_assert_eq!(keys, expected);
        prop_assert_eq!(post.metadata(), &metadata);
        prop_assert_eq!(post.body(), body.as_str());
    }

    #[test]
    fn test_parsing_is_deterministic(text in any::<String>()) {
        prop_assert_eq!(parse(&text), parse(&text));
    }
}

#[test]
fn test_body_after_closing_marker_is_byte_identical() {
    let body = "\r\n+++\r\n  indented\t\n\u{feff}trailing";
    let post = parse(&format!("+++\nk = \"v\"\n+++\n{body}")).unwrap();
    assert_eq!(post.body(), body);
    assert_eq!(post.metadata(), &Metadata::from([("k".to_string(), "v".into())]));
}
