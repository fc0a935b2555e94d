//! Whitelist Invariant Tests
//!
//! Node semantics for each schema kind:
//! - allow leaves pass or reject
//! - validators behave the same whether sync or async
//! - array schemas need exactly one node and an array input
//! - object schemas reject undeclared keys unless omitted

use serde_json::json;
use whitelist::schema::{ErrorClass, Options, Schema, Value, WhitelistError, WhitelistResult};
use whitelist::whitelist;

// =============================================================================
// Helper Functions
// =============================================================================

fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}

fn allow_below_fifty(value: Value, options: &Options) -> WhitelistResult<Value> {
    match value.as_i64() {
        Some(n) if n < 50 => Ok(value),
        _ => Err(WhitelistError::rejected("number must be below 50", options.path())),
    }
}

fn allow_below_fifty_async() -> Schema {
    Schema::async_validator(|value: Value, options: Options| async move {
        tokio::task::yield_now().await;
        allow_below_fifty(value, &options)
    })
}

fn omit() -> Options {
    Options::new().omit_disallowed(true)
}

fn omit_all() -> Options {
    Options::new().omit_disallowed(true).omit_undefined(true)
}

// =============================================================================
// Allow Leaf Tests
// =============================================================================

#[tokio::test]
async fn test_false_rejects() {
    let err = whitelist(v(json!(42)), &Schema::from(false), &Options::new())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "value not allowed");
}

#[tokio::test]
async fn test_false_omitted_is_undefined() {
    let out = whitelist(v(json!(42)), &Schema::from(false), &omit()).await.unwrap();
    assert!(out.is_undefined());
}

#[tokio::test]
async fn test_true_returns_input() {
    let out = whitelist(v(json!(42)), &Schema::from(true), &Options::new())
        .await
        .unwrap();
    assert_eq!(out, v(json!(42)));
}

// =============================================================================
// Validator Tests
// =============================================================================

#[tokio::test]
async fn test_sync_validator_rejects() {
    let schema = Schema::validator(allow_below_fifty);
    let err = whitelist(v(json!(50)), &schema, &Options::new()).await.unwrap_err();
    assert_eq!(err.to_string(), "number must be below 50");
}

#[tokio::test]
async fn test_sync_validator_omitted() {
    let schema = Schema::validator(allow_below_fifty);
    let out = whitelist(v(json!(50)), &schema, &omit()).await.unwrap();
    assert!(out.is_undefined());
}

#[tokio::test]
async fn test_sync_validator_result_is_used() {
    let schema = Schema::validator(allow_below_fifty);
    let out = whitelist(v(json!(40)), &schema, &Options::new()).await.unwrap();
    assert_eq!(out, v(json!(40)));
}

#[tokio::test]
async fn test_validator_can_transform() {
    let schema = Schema::object([(
        "email",
        Schema::validator(|value, _| Ok(value.as_str().map(str::to_lowercase).into())),
    )]);
    let out = whitelist(v(json!({"email": "Luke@Tatooine.org"})), &schema, &Options::new())
        .await
        .unwrap();
    assert_eq!(out, v(json!({"email": "luke@tatooine.org"})));
}

#[tokio::test]
async fn test_async_validator_matches_sync() {
    let sync = Schema::validator(allow_below_fifty);
    let deferred = allow_below_fifty_async();

    for input in [40, 50] {
        for opts in [Options::new(), omit()] {
            let a = whitelist(v(json!(input)), &sync, &opts).await;
            let b = whitelist(v(json!(input)), &deferred, &opts).await;
            match (a, b) {
                (Ok(a), Ok(b)) => assert_eq!(a, b),
                (Err(a), Err(b)) => {
                    assert_eq!(a.to_string(), b.to_string());
                    assert_eq!(a.path(), b.path());
                }
                (a, b) => panic!("sync {:?} and async {:?} disagree", a, b),
            }
        }
    }
}

#[tokio::test]
async fn test_foreign_validator_error_swallowed() {
    let schema = Schema::validator(|_, _| {
        Err(WhitelistError::other(std::io::Error::new(
            std::io::ErrorKind::Other,
            "lookup failed",
        )))
    });

    let err = whitelist(v(json!(1)), &schema, &Options::new()).await.unwrap_err();
    assert_eq!(err.to_string(), "lookup failed");

    let out = whitelist(v(json!(1)), &schema, &omit()).await.unwrap();
    assert!(out.is_undefined());
}

// =============================================================================
// Array Schema Tests
// =============================================================================

#[tokio::test]
async fn test_array_schema_arity() {
    for schema in [Schema::Array(vec![]), Schema::Array(vec![true.into(), true.into()])] {
        let err = whitelist(v(json!([42, 1337])), &schema, &omit()).await.unwrap_err();
        assert_eq!(err.to_string(), "allowed array not of length 1");
        assert_eq!(err.class(), ErrorClass::Configuration);
    }
}

#[tokio::test]
async fn test_array_requires_array_input() {
    for input in [json!(42), json!("Darth"), json!({"name": "Darth"})] {
        let err = whitelist(v(input), &Schema::array(true), &Options::new())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "src is not an array");
    }
}

#[tokio::test]
async fn test_array_disallowed_element() {
    let err = whitelist(v(json!([42, 1337])), &Schema::array(false), &Options::new())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "value not allowed");
    assert_eq!(err.path(), Some("[0]"));
}

#[tokio::test]
async fn test_array_allowed() {
    let out = whitelist(v(json!([42, 1337])), &Schema::array(true), &Options::new())
        .await
        .unwrap();
    assert_eq!(out, v(json!([42, 1337])));
}

#[tokio::test]
async fn test_array_omit_undefined_compacts() {
    let schema = Schema::array(Schema::validator(allow_below_fifty));
    let out = whitelist(v(json!([10, 60, 0, 70, 20])), &schema, &omit_all())
        .await
        .unwrap();
    assert_eq!(out, v(json!([10, 0, 20])));

    let out = whitelist(v(json!([10, 60])), &schema, &omit()).await.unwrap();
    assert_eq!(out, Value::Array(vec![v(json!(10)), Value::Undefined]));
}

// =============================================================================
// Object Schema Tests
// =============================================================================

#[tokio::test]
async fn test_object_requires_object_input() {
    let schema = Schema::object([("name", true)]);
    let err = whitelist(v(json!(5)), &schema, &omit()).await.unwrap_err();
    assert_eq!(err.to_string(), "src is not an object");
    assert_eq!(err.class(), ErrorClass::Structure);
}

#[tokio::test]
async fn test_object_extra_keys_rejected() {
    let schema = Schema::object([("name", true)]);
    let err = whitelist(v(json!({"name": "Darth", "age": 5})), &schema, &Options::new())
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "The following field is not allowed: age. Allowed fields: name."
    );
    assert_eq!(err.keys().unwrap(), &["age".to_string()]);
}

#[tokio::test]
async fn test_object_lists_every_extra_key() {
    let schema = Schema::object([("name", true), ("rank", true)]);
    let err = whitelist(
        v(json!({"name": "Darth", "age": 5, "side": "dark"})),
        &schema,
        &Options::new(),
    )
    .await
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "The following fields are not allowed: age, side. Allowed fields: name, rank."
    );
}

#[tokio::test]
async fn test_object_keeps_declared_order() {
    let schema = Schema::object([("zeta", true), ("alpha", true)]);

    let err = whitelist(v(json!({"alpha": 2, "zeta": 1, "beta": 3})), &schema, &Options::new())
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "The following field is not allowed: beta. Allowed fields: zeta, alpha."
    );

    let out = whitelist(v(json!({"alpha": 2, "zeta": 1})), &schema, &Options::new())
        .await
        .unwrap();
    assert_eq!(serde_json::to_string(&out).unwrap(), r#"{"zeta":1,"alpha":2}"#);
}

#[tokio::test]
async fn test_object_disallowed_field_value() {
    let schema = Schema::object([("name", true), ("age", false)]);
    let err = whitelist(v(json!({"name": "Darth", "age": 5})), &schema, &Options::new())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "value not allowed");
    assert_eq!(err.path(), Some("age"));
}

#[tokio::test]
async fn test_object_extra_keys_become_undefined() {
    let schema = Schema::object([("name", true)]);
    let out = whitelist(v(json!({"name": "Darth", "age": 5})), &schema, &omit())
        .await
        .unwrap();
    assert_eq!(
        out,
        Value::object([("name", Value::from("Darth")), ("age", Value::Undefined)])
    );
}

#[tokio::test]
async fn test_object_extra_keys_stripped() {
    let schema = Schema::object([("name", true)]);
    let out = whitelist(v(json!({"name": "Darth", "age": 5})), &schema, &omit_all())
        .await
        .unwrap();
    assert_eq!(out, v(json!({"name": "Darth"})));
}

#[tokio::test]
async fn test_object_allowed() {
    let schema = Schema::object([("name", true), ("age", true)]);
    let out = whitelist(v(json!({"name": "Darth", "age": 5})), &schema, &Options::new())
        .await
        .unwrap();
    assert_eq!(out, v(json!({"name": "Darth", "age": 5})));
}

#[tokio::test]
async fn test_object_omit_undefined_keeps_null() {
    let schema = Schema::object([("name", true), ("title", true), ("age", true)]);
    let out = whitelist(v(json!({"name": "Luke", "title": null})), &schema, &omit_all())
        .await
        .unwrap();
    assert_eq!(out, v(json!({"name": "Luke", "title": null})));
}

// =============================================================================
// Output Tests
// =============================================================================

#[tokio::test]
async fn test_serialized_output_drops_undefined() {
    let schema = Schema::object([("name", true)]);
    let out = whitelist(v(json!({"name": "Darth", "age": 5})), &schema, &omit())
        .await
        .unwrap();
    assert_eq!(serde_json::to_value(&out).unwrap(), json!({"name": "Darth"}));
}

#[tokio::test]
async fn test_whitelist_is_idempotent() {
    let schema = Schema::object([
        ("name", Schema::allow()),
        ("age", Schema::validator(allow_below_fifty)),
        ("tags", Schema::array(true)),
    ]);
    let input = v(json!({"name": "Luke", "age": 25, "tags": ["jedi"], "x": 1}));

    let once = whitelist(input, &schema, &omit_all()).await.unwrap();
    let twice = whitelist(once.clone(), &schema, &omit_all()).await.unwrap();
    assert_eq!(once, twice);
    assert_eq!(once, v(json!({"name": "Luke", "age": 25, "tags": ["jedi"]})));
}
