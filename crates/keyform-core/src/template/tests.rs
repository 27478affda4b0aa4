use crate::{
    MAX_TEMPLATE_PLACEHOLDERS,
    record::Record,
    template::{Interpolated, KeyTemplate, Segment, TemplateError},
    value::Value,
};
use proptest::prelude::*;

fn compile(source: &str) -> KeyTemplate {
    KeyTemplate::compile(source).expect("template should compile")
}

#[test]
fn compiles_literals_and_placeholders_in_order() {
    let template = compile("USER#{{ id }}#ORG#{{org}}");

    assert_eq!(
        template.segments(),
        &[
            Segment::Literal("USER#".to_string()),
            Segment::Placeholder("id".to_string()),
            Segment::Literal("#ORG#".to_string()),
            Segment::Placeholder("org".to_string()),
        ]
    );
    assert_eq!(template.interpolation_set(), &["id", "org"]);
    assert!(template.references("org"));
    assert!(!template.references("name"));
}

#[test]
fn interpolation_set_is_deduplicated() {
    let template = compile("{{id}}#{{id}}#{{a}}");

    assert_eq!(template.interpolation_set(), &["a", "id"]);
}

#[test]
fn literal_template_has_empty_interpolation_set() {
    let template = compile("STATIC");

    assert!(template.is_literal());
    assert_eq!(
        template.interpolate(&Record::new()),
        Interpolated::Value("STATIC".to_string())
    );
}

#[test]
fn rejects_malformed_templates() {
    assert_eq!(
        KeyTemplate::compile("USER#{{id"),
        Err(TemplateError::Unterminated { offset: 5 })
    );
    assert_eq!(
        KeyTemplate::compile("USER#{{  }}"),
        Err(TemplateError::EmptyPlaceholder { offset: 5 })
    );
    assert_eq!(
        KeyTemplate::compile("USER}}#{{id}}"),
        Err(TemplateError::UnexpectedClose { offset: 4 })
    );
    assert!(matches!(
        KeyTemplate::compile("{{a b}}"),
        Err(TemplateError::InvalidPlaceholder { .. })
    ));
}

#[test]
fn rejects_too_many_placeholders() {
    let source: String = (0..=MAX_TEMPLATE_PLACEHOLDERS)
        .map(|i| format!("{{{{a{i}}}}}"))
        .collect();

    assert!(matches!(
        KeyTemplate::compile(&source),
        Err(TemplateError::TooManyPlaceholders { .. })
    ));
}

#[test]
fn interpolates_when_every_attribute_is_defined() {
    let template = compile("USER#STATUS#{{status}}#{{count}}");
    let source = Record::new().with("status", "inactive").with("count", 3i64);

    assert_eq!(
        template.interpolate(&source),
        Interpolated::Value("USER#STATUS#inactive#3".to_string())
    );
}

#[test]
fn omits_when_any_attribute_is_missing_or_null() {
    let template = compile("USER#{{name}}#{{id}}");

    let missing = Record::new().with("id", "1");
    assert_eq!(template.interpolate(&missing), Interpolated::Omitted);

    let null = Record::new().with("id", "1").with("name", Value::Null);
    assert_eq!(template.interpolate(&null), Interpolated::Omitted);
}

proptest! {
    #[test]
    fn interpolation_is_deterministic(id in "[a-z0-9]{1,12}", n in any::<i64>()) {
        let template = compile("A#{{id}}#B#{{n}}");
        let source = Record::new().with("id", id.as_str()).with("n", n);

        let first = template.interpolate(&source);
        let second = template.interpolate(&source.clone());

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first, Interpolated::Value(format!("A#{id}#B#{n}")));
    }
}
