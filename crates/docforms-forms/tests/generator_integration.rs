//! Integration tests for the descriptor -> form field -> cleaned value pipeline.
//!
//! These tests exercise generation and cleaning together, covering:
//! 1. Strict and lenient generation across every supported kind
//! 2. Handler resolution through ancestors and aliases
//! 3. Cleaning submitted data through generated fields
//! 4. Whole-document form generation

use std::collections::BTreeMap;
use std::sync::Arc;

use docforms_core::{FormData, Settings};
use docforms_document::{
    DocumentMeta, DocumentType, FieldDescriptor, FieldKind, InMemoryManager, ObjectId,
    QueryManager, Value,
};
use docforms_forms::fields::field_choices;
use docforms_forms::{
    clean_from_data, fields_for_document, DocumentFormConfig, DocumentFormFields, FieldOverrides,
    FormFieldDef, FormFieldGenerator, FormFieldType, MongoDefaultFormFieldGenerator,
    MongoFormFieldGenerator, WidgetType,
};

// ============================================================================
// Shared helpers
// ============================================================================

fn oid(n: u8) -> ObjectId {
    ObjectId::from_bytes([n; 12])
}

/// An author collection with two documents.
fn authors() -> DocumentType {
    InMemoryManager::new("author")
        .with_document(oid(1), "Ursula K. Le Guin")
        .with_document(oid(2), "Octavia E. Butler")
        .into_document_type("Author")
}

fn strict(descriptor: &FieldDescriptor) -> FormFieldDef {
    MongoFormFieldGenerator::default()
        .generate(descriptor, &FieldOverrides::default())
        .unwrap()
}

fn lenient(descriptor: &FieldDescriptor) -> FormFieldDef {
    MongoDefaultFormFieldGenerator::default()
        .generate(descriptor, &FieldOverrides::default())
        .unwrap()
}

/// A blog post document exercising every supported kind.
fn post_meta(author: DocumentType) -> DocumentMeta {
    DocumentMeta::new("BlogPost")
        .field(
            FieldDescriptor::new("title", FieldKind::String)
                .required()
                .max_length(120),
        )
        .field(FieldDescriptor::new("body", FieldKind::String))
        .field(
            FieldDescriptor::new("status", FieldKind::String)
                .required()
                .choices([("draft", "Draft"), ("live", "Live")]),
        )
        .field(FieldDescriptor::new("contact", FieldKind::Email))
        .field(FieldDescriptor::new("homepage", FieldKind::Url))
        .field(FieldDescriptor::new("views", FieldKind::Int).min_value(0.0))
        .field(FieldDescriptor::new("score", FieldKind::Float))
        .field(FieldDescriptor::new("price", FieldKind::Decimal).precision(2))
        .field(FieldDescriptor::new("featured", FieldKind::Boolean))
        .field(FieldDescriptor::new("published_at", FieldKind::DateTime))
        .field(FieldDescriptor::new(
            "author",
            FieldKind::reference(author.clone()),
        ))
        .field(FieldDescriptor::new(
            "coauthors",
            FieldKind::list(FieldDescriptor::element(FieldKind::reference(author))),
        ))
        .field(FieldDescriptor::new(
            "tags",
            FieldKind::sorted_list(FieldDescriptor::element(FieldKind::String).max_length(20)),
        ))
        .field(FieldDescriptor::new(
            "ratings",
            FieldKind::map(FieldDescriptor::element(FieldKind::Int)),
        ))
        .field(FieldDescriptor::new("attachment", FieldKind::File))
        .field(FieldDescriptor::new("cover", FieldKind::Image))
}

// ============================================================================
// 1. Generation
// ============================================================================

#[test]
fn test_string_choices_not_required() {
    let descriptor =
        FieldDescriptor::new("grade", FieldKind::String).choices([("a", "A"), ("b", "B")]);
    let field = strict(&descriptor);

    let FormFieldType::TypedChoice { empty_value, .. } = &field.field_type else {
        panic!("expected a typed choice field");
    };
    assert_eq!(*empty_value, Value::Null);
    assert_eq!(
        field_choices(&field),
        [
            (String::new(), "---------".to_string()),
            ("a".to_string(), "A".to_string()),
            ("b".to_string(), "B".to_string()),
        ]
    );
}

#[test]
fn test_choice_bearing_kinds_always_yield_choice_fields() {
    let descriptors = [
        FieldDescriptor::new("s", FieldKind::String)
            .max_length(5)
            .choices([("x", "X")]),
        FieldDescriptor::new("i", FieldKind::Int)
            .min_value(0.0)
            .choices([(1, "One")]),
        FieldDescriptor::new("b", FieldKind::Boolean).choices([(true, "Yes")]),
    ];
    for descriptor in &descriptors {
        assert!(matches!(
            strict(descriptor).field_type,
            FormFieldType::TypedChoice { .. }
        ));
    }
}

#[test]
fn test_list_of_references_shares_query_manager() {
    let author = authors();
    let descriptor = FieldDescriptor::new(
        "coauthors",
        FieldKind::list(FieldDescriptor::element(FieldKind::reference(author.clone()))),
    );
    let field = strict(&descriptor);

    let FormFieldType::DocumentMultipleChoice { queryset } = &field.field_type else {
        panic!("expected a document multiple choice field");
    };
    assert!(author.same_manager(queryset));
    assert!(Arc::ptr_eq(queryset, &author.objects));
}

#[test]
fn test_every_supported_kind_has_documented_target() {
    let meta = post_meta(authors());
    let fields = fields_for_document(
        &DocumentFormConfig::new(meta),
        &MongoFormFieldGenerator::default(),
    )
    .unwrap();
    let types: Vec<&str> = fields.iter().map(|f| f.field_type.type_name()).collect();
    assert_eq!(
        types,
        [
            "CharField",
            "CharField",
            "TypedChoiceField",
            "EmailField",
            "URLField",
            "IntegerField",
            "FloatField",
            "DecimalField",
            "BooleanField",
            "DateTimeField",
            "ReferenceField",
            "DocumentMultipleChoiceField",
            "ListField",
            "MapField",
            "FileField",
            "ImageField",
        ]
    );
}

#[test]
fn test_strict_rejects_unknown_kind_and_lenient_does_not() {
    let kinds = [
        FieldKind::ObjectId,
        FieldKind::Uuid,
        FieldKind::GenericReference,
        FieldKind::Dict,
        FieldKind::Binary,
        FieldKind::GeoPoint,
        FieldKind::EmbeddedDocument {
            document: "Address".into(),
        },
        FieldKind::custom("PointField", FieldKind::GeoPoint),
    ];
    for kind in kinds {
        let descriptor = FieldDescriptor::new("x", kind);
        let err = MongoFormFieldGenerator::default()
            .generate(&descriptor, &FieldOverrides::default())
            .unwrap_err();
        assert!(err.is_unsupported_kind(), "{err}");

        let field = lenient(&descriptor);
        assert!(matches!(field.field_type, FormFieldType::Char { .. }));
    }
}

#[test]
fn test_overrides_win_in_both_generators() {
    let descriptor = FieldDescriptor::new("age", FieldKind::Int)
        .required()
        .min_value(18.0)
        .verbose_name("Age");
    let overrides = FieldOverrides::new()
        .label("Your age")
        .required(false)
        .min_value(21.0)
        .initial(30);

    let generators: [Box<dyn FormFieldGenerator>; 2] = [
        Box::new(MongoFormFieldGenerator::default()),
        Box::new(MongoDefaultFormFieldGenerator::default()),
    ];
    for generator in &generators {
        let field = generator.generate(&descriptor, &overrides).unwrap();
        assert_eq!(field.label, "Your age");
        assert!(!field.required);
        assert_eq!(field.initial, Some(Value::Int(30)));
        assert!(matches!(
            field.field_type,
            FormFieldType::Integer {
                min_value: Some(21),
                ..
            }
        ));
    }
}

// ============================================================================
// 2. Resolution
// ============================================================================

#[test]
fn test_custom_kind_resolves_through_ancestors() {
    let slug = FieldKind::custom("SlugField", FieldKind::String);
    let field = strict(&FieldDescriptor::new("slug", slug).max_length(50));
    assert!(matches!(
        field.field_type,
        FormFieldType::Char {
            max_length: Some(50),
            ..
        }
    ));

    let avatar = FieldKind::custom("AvatarField", FieldKind::Image);
    assert!(matches!(
        strict(&FieldDescriptor::new("avatar", avatar)).field_type,
        FormFieldType::Image
    ));
}

#[test]
fn test_sorted_list_resolves_to_list_handler() {
    let descriptor = FieldDescriptor::new(
        "tags",
        FieldKind::sorted_list(FieldDescriptor::element(FieldKind::String).max_length(20)),
    );
    let FormFieldType::List { item } = &strict(&descriptor).field_type else {
        panic!("expected a list field");
    };
    assert!(matches!(
        item.field_type,
        FormFieldType::Char {
            max_length: Some(20),
            ..
        }
    ));
}

#[test]
fn test_alias_table_from_settings() {
    let mut settings = Settings::default();
    settings
        .kind_aliases
        .insert("geopointfield".into(), "stringfield".into());
    let generator = MongoFormFieldGenerator::from_settings(&settings);

    let field = generator
        .generate(
            &FieldDescriptor::new("where", FieldKind::GeoPoint).max_length(64),
            &FieldOverrides::default(),
        )
        .unwrap();
    assert!(matches!(field.field_type, FormFieldType::Char { .. }));
}

// ============================================================================
// 3. Cleaning generated fields
// ============================================================================

#[test]
fn test_clean_typed_choice_from_data() {
    let field = strict(
        &FieldDescriptor::new("size", FieldKind::Int).choices([(1, "Small"), (2, "Large")]),
    );
    let data = FormData::from_pairs([("size", "2")]);
    assert_eq!(clean_from_data(&field, &data).unwrap(), Value::Int(2));
    assert_eq!(clean_from_data(&field, &FormData::new()).unwrap(), Value::Null);
    assert!(clean_from_data(&field, &FormData::from_pairs([("size", "3")])).is_err());
}

#[test]
fn test_clean_reference_from_data() {
    let field = strict(&FieldDescriptor::new("author", FieldKind::reference(authors())).required());

    let data = FormData::from_pairs([("author", oid(1).to_string())]);
    assert_eq!(
        clean_from_data(&field, &data).unwrap(),
        Value::ObjectId(oid(1))
    );

    let missing = FormData::from_pairs([("author", oid(5).to_string())]);
    assert_eq!(
        clean_from_data(&field, &missing).unwrap_err(),
        ["Select a valid choice. That choice is not one of the available choices."]
    );
    assert_eq!(
        clean_from_data(&field, &FormData::new()).unwrap_err(),
        ["This field is required."]
    );
}

#[test]
fn test_reference_choices_list_documents() {
    let field = strict(&FieldDescriptor::new("author", FieldKind::reference(authors())));
    let choices = field_choices(&field);
    assert_eq!(choices.len(), 3);
    assert_eq!(choices[0], (String::new(), "---------".to_string()));
    assert_eq!(choices[2], (oid(2).to_string(), "Octavia E. Butler".to_string()));
}

#[test]
fn test_clean_multi_reference_from_data() {
    let field = strict(&FieldDescriptor::new(
        "coauthors",
        FieldKind::list(FieldDescriptor::element(FieldKind::reference(authors()))),
    ));
    let data = FormData::from_pairs([
        ("coauthors", oid(2).to_string()),
        ("coauthors", oid(1).to_string()),
    ]);
    assert_eq!(
        clean_from_data(&field, &data).unwrap(),
        Value::List(vec![Value::ObjectId(oid(1)), Value::ObjectId(oid(2))])
    );

    let bad = FormData::from_pairs([("coauthors", "zzz")]);
    assert_eq!(
        clean_from_data(&field, &bad).unwrap_err(),
        ["Select a valid choice. zzz is not one of the available choices."]
    );
}

#[test]
fn test_clean_multiple_choice_list_from_data() {
    let field = strict(&FieldDescriptor::new(
        "colors",
        FieldKind::list(FieldDescriptor::element(FieldKind::String).choices([("r", "Red"), ("g", "Green")])),
    ));
    let data = FormData::from_pairs([("colors", "g")]);
    assert_eq!(
        clean_from_data(&field, &data).unwrap(),
        Value::List(vec![Value::String("g".into())])
    );
}

#[test]
fn test_clean_list_from_data() {
    let field = strict(
        &FieldDescriptor::new(
            "scores",
            FieldKind::list(FieldDescriptor::element(FieldKind::Int).max_value(10.0)),
        )
        .required(),
    );
    assert_eq!(field.widget, WidgetType::List(Box::new(WidgetType::NumberInput)));

    let data = FormData::from_pairs([("scores_0", "3"), ("scores_1", "9")]);
    assert_eq!(
        clean_from_data(&field, &data).unwrap(),
        Value::List(vec![Value::Int(3), Value::Int(9)])
    );

    let data = FormData::from_pairs([("scores_0", "3"), ("scores_1", "11"), ("scores_2", "x")]);
    assert_eq!(
        clean_from_data(&field, &data).unwrap_err(),
        [
            "Ensure this value is less than or equal to 10.",
            "Enter a whole number."
        ]
    );

    assert_eq!(
        clean_from_data(&field, &FormData::new()).unwrap_err(),
        ["This field is required."]
    );
}

#[test]
fn test_clean_map_from_data() {
    let field = strict(&FieldDescriptor::new(
        "ratings",
        FieldKind::map(FieldDescriptor::element(FieldKind::Int)),
    ));
    let data = FormData::from_pairs([
        ("ratings_key_0", "plot"),
        ("ratings_value_0", "4"),
        ("ratings_key_1", "pacing"),
        ("ratings_value_1", "5"),
    ]);
    let mut expected = BTreeMap::new();
    expected.insert("pacing".to_string(), Value::Int(5));
    expected.insert("plot".to_string(), Value::Int(4));
    assert_eq!(clean_from_data(&field, &data).unwrap(), Value::Map(expected));

    assert_eq!(
        clean_from_data(&field, &FormData::new()).unwrap(),
        Value::Map(BTreeMap::new())
    );
}

#[test]
fn test_lenient_fallback_field_cleans_text() {
    let field = lenient(
        &FieldDescriptor::new("token", FieldKind::Uuid)
            .required()
            .max_length(4),
    );
    let ok = FormData::from_pairs([("token", " abcd ")]);
    assert_eq!(
        clean_from_data(&field, &ok).unwrap(),
        Value::String("abcd".into())
    );
    let long = FormData::from_pairs([("token", "abcde")]);
    assert!(clean_from_data(&field, &long).is_err());
}

// ============================================================================
// 4. Document forms
// ============================================================================

#[test]
fn test_document_form_with_overrides_and_selection() {
    let config = DocumentFormConfig::new(post_meta(authors()))
        .with_fields(DocumentFormFields::Include(vec![
            "title".into(),
            "author".into(),
        ]))
        .with_label("author", "Written by")
        .with_widget("title", WidgetType::Textarea);
    let fields = fields_for_document(&config, &MongoDefaultFormFieldGenerator::default()).unwrap();

    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].widget, WidgetType::Textarea);
    assert_eq!(fields[1].label, "Written by");
}

#[test]
fn test_document_form_cleans_submission() {
    let config = DocumentFormConfig::new(post_meta(authors())).with_fields(
        DocumentFormFields::Include(vec!["title".into(), "views".into(), "tags".into()]),
    );
    let fields = fields_for_document(&config, &MongoFormFieldGenerator::default()).unwrap();
    let data = FormData::from_pairs([
        ("title", "Hello"),
        ("views", "12"),
        ("tags_0", "rust"),
        ("tags_1", "forms"),
    ]);

    let cleaned: Vec<Value> = fields
        .iter()
        .map(|field| clean_from_data(field, &data).unwrap())
        .collect();
    assert_eq!(
        cleaned,
        [
            Value::String("Hello".into()),
            Value::Int(12),
            Value::List(vec![
                Value::String("rust".into()),
                Value::String("forms".into())
            ]),
        ]
    );
}

#[test]
fn test_query_manager_is_shared_not_copied() {
    let manager: Arc<dyn QueryManager> =
        Arc::new(InMemoryManager::new("tag").with_document(oid(9), "rust"));
    let tag = DocumentType::new("Tag", manager.clone());
    let field = strict(&FieldDescriptor::new("tag", FieldKind::reference(tag)));
    let FormFieldType::Reference { queryset, .. } = &field.field_type else {
        panic!("expected a reference field");
    };
    assert!(Arc::ptr_eq(queryset, &manager));
    assert_eq!(queryset.count(), 1);
}
