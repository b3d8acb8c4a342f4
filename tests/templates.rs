use pgph::{
    Format, Placeholder, PlaceholderError, QueryPart, Style, Template, count_placeholders,
    escape, escape_owned, escaped_len, placeholder_strerror, search_placeholders,
};

fn parts(input: &[u8]) -> Vec<QueryPart<'_>> {
    let count = count_placeholders(input).unwrap();
    let mut out = vec![QueryPart::default(); count];
    let written = search_placeholders(&mut out, input).unwrap();
    assert_eq!(written, count);
    out
}

#[test]
fn positional_example() {
    let query = b"select %s from %s %% %b";
    assert_eq!(count_placeholders(query), Ok(3));
    assert_eq!(Template::parse(query).unwrap().style(), Style::Positional);

    let mut out = vec![0u8; escaped_len(query).unwrap()];
    escape(&mut out, query).unwrap();
    assert_eq!(out, b"select %s from %s % %b");
}

#[test]
fn keyword_example() {
    let query = b"%(k1) %% and %% %(k2) where %(k3)";
    assert_eq!(count_placeholders(query), Ok(3));

    let names: Vec<_> = parts(query)
        .iter()
        .map(|p| p.placeholder().name().unwrap())
        .collect();
    assert_eq!(names, vec![&b"k1"[..], b"k2", b"k3"]);
}

#[test]
fn mixed_example() {
    assert_eq!(
        count_placeholders(b"mixed %(keyword) and %s positional %b"),
        Err(PlaceholderError::MixedPlaceholders)
    );
}

#[test]
fn escapes_never_count() {
    let cases: [(&[u8], &[u8], usize); 4] = [
        (b"%%", b"%", 1),
        (b"%%%%", b"%%", 2),
        (b"a %% b %% c", b"a % b % c", 2),
        (b"%%s %%(x)", b"%s %(x)", 2),
    ];
    for (query, collapsed, pairs) in cases {
        assert_eq!(count_placeholders(query), Ok(0));
        assert_eq!(escaped_len(query).unwrap(), query.len() - pairs);
        assert_eq!(&escape_owned(query).unwrap()[..], collapsed);
    }
}

#[test]
fn unterminated_keyword() {
    for query in [&b"%("[..], b"select %(", b"select %(name"] {
        assert!(matches!(
            count_placeholders(query),
            Err(PlaceholderError::UnclosedKeyword { .. })
        ));
    }
}

#[test]
fn escape_owned_without_pairs_is_identical() {
    let query = b"select * from t where a = %s";
    let copy = escape_owned(query).unwrap();
    assert_eq!(copy.len(), query.len());
    assert_eq!(&copy[..], &query[..]);
}

#[test]
fn positional_indices_strictly_increase() {
    let query = b"insert into t values (%s, %t, %b, %s)";
    let indices: Vec<_> = parts(query)
        .iter()
        .map(|p| p.placeholder().index().unwrap())
        .collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
}

#[test]
fn builder_overflow_leaves_rest_untouched() {
    let query = b"%s %s %s";
    let mut out = [QueryPart::default(); 3];
    assert_eq!(
        search_placeholders(&mut out[..1], query),
        Err(PlaceholderError::BufferOverflow)
    );
    assert_eq!(
        out[0].placeholder(),
        Placeholder::Positional {
            index: 0,
            format: Format::Auto
        }
    );
    assert_eq!(out[1], QueryPart::default());
}

#[test]
fn every_error_has_a_description() {
    for code in -7..=-1 {
        assert_ne!(placeholder_strerror(code), "Unrecognized return code");
    }
    assert_eq!(placeholder_strerror(-100), "Unrecognized return code");
}

#[test]
fn template_round_trips_through_postgres() {
    let template = Template::parse(b"update t set v = %(v) where id = %(id) and v <> %(v)").unwrap();
    let pg = template.to_postgres().unwrap();
    assert_eq!(
        &pg.text()[..],
        b"update t set v = $1 where id = $2 and v <> $1"
    );
    assert_eq!(pg.params().len(), 2);
}
