use pathbind_bind::{Binder, DataSource, MapSource};
use pathbind_convert::Conversions;
use pathbind_reflect::derive::Reflect;

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Endpoint {
    url: String,
    timeout: u32,
    retry: Option<Retry>,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Retry {
    attempts: u8,
}

#[cfg(feature = "serde")]
#[test]
fn loads_from_json() {
    let source: MapSource = serde_json::from_str(
        r#"{ "url": "https://example.com", "timeout": "30", "retry.attempts": "3" }"#,
    )
    .unwrap();

    assert_eq!(source.len(), 3);
    assert!(source.has_child("retry"));

    let endpoint = Binder::<Endpoint>::new(&Conversions::new()).unwrap().build(&source).unwrap();
    assert_eq!(endpoint, Endpoint {
        url: "https://example.com".into(),
        timeout: 30,
        retry: Some(Retry { attempts: 3 }),
    });

    let json = serde_json::to_value(&source).unwrap();
    assert_eq!(json["timeout"], "30");
}

#[test]
fn keys_are_case_sensitive() {
    let source = MapSource::new().with("URL", "x");
    assert!(!source.has("url"));

    let endpoint = Binder::<Endpoint>::new(&Conversions::new()).unwrap().build(&source).unwrap();
    assert_eq!(endpoint, Endpoint::default());
}

#[test]
fn empty_literal_for_strings() {
    let mut endpoint = Endpoint {
        url: "set".into(),
        ..Endpoint::default()
    };
    let source = MapSource::new().with("url", "EMPTY");
    Binder::<Endpoint>::new(&Conversions::new()).unwrap().bind(&source, &mut endpoint);
    assert_eq!(endpoint.url, "");
}
