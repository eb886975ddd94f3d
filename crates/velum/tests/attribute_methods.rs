use pretty_assertions::assert_eq;
use velum::schema::PropertyType;
use velum::{doc, Instance, ModelClass, Value};

use std::sync::Arc;

fn post_class() -> Arc<ModelClass> {
    let post = ModelClass::new("Post");
    post.property("title", PropertyType::String);
    post
}

#[test]
fn responds_to_is_accurate_before_any_attribute_access() {
    let class = post_class();
    let post = Instance::new(&class);

    assert!(!class.attribute_methods_generated());
    assert!(post.responds_to("title"));
    assert!(post.responds_to("title="));
    assert!(post.responds_to("title?"));
    assert!(!post.responds_to("subtitle"));
    assert!(class.attribute_methods_generated());
}

#[test]
fn dispatch_covers_reader_writer_and_query() {
    let class = post_class();
    let mut post = Instance::new(&class);

    post.send("title=", vec![Value::from("Hello")]).unwrap();
    assert_eq!(post.send("title", Vec::new()).unwrap(), Value::from("Hello"));
    assert_eq!(post.send("title?", Vec::new()).unwrap(), Value::Bool(true));

    post.set("title", "").unwrap();
    assert!(!post.query("title").unwrap());
    assert_eq!(post.attribute("title").unwrap(), Value::from(""));
}

#[test]
fn unresolved_methods_fail_with_undefined_attribute() {
    let class = post_class();
    let mut post = Instance::new(&class);

    let err = post.send("subtitle", Vec::new()).unwrap_err();
    assert!(err.is_undefined_attribute());
    assert_eq!(
        err.to_string(),
        "undefined attribute method `subtitle` for model Post"
    );
}

#[test]
fn properties_declared_after_generation_regenerate_accessors() {
    let class = post_class();
    let mut post = Instance::new(&class);

    // force generation
    assert_eq!(post.send("title", Vec::new()).unwrap(), Value::Null);
    assert!(class.attribute_methods_generated());

    class.property("body", PropertyType::String);
    assert!(!class.attribute_methods_generated());

    // no manual reset needed: the next dispatch regenerates
    post.set("body", "text").unwrap();
    assert_eq!(post.attribute("body").unwrap(), Value::from("text"));
}

#[test]
fn constructing_with_undeclared_attributes_fails() {
    let class = post_class();

    let err = Instance::new_with(&class, doc! { "bogus" => 1_i64 }).unwrap_err();
    assert!(err.is_undefined_attribute());
}

#[test]
fn public_document_hides_internal_properties() {
    let tag = ModelClass::new("Tag");
    let class = post_class();
    class.has_many("tags", &tag);

    let mut post = Instance::new(&class);
    post.set("title", "visible").unwrap();

    let full = post.to_document();
    assert!(full.get("_id").is_some());
    assert!(full.get("tag_ids").is_some());

    let public = post.to_public_document();
    assert_eq!(public.get("id"), Some(&Value::from(post.id())));
    assert_eq!(public.get("title"), Some(&Value::from("visible")));
    assert!(public.get("tag_ids").is_none());
    assert!(public.get("_id").is_none());
}

#[test]
fn unknown_association_access_is_an_error() {
    let class = post_class();
    let mut post = Instance::new(&class);

    let err = post.documents("comments").unwrap_err();
    assert!(err.is_unknown_association());
    assert_eq!(err.to_string(), "unknown association `comments` for model Post");
}
