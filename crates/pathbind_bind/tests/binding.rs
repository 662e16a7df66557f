use pathbind_bind::{BindError, Binder, BinderOptions, ConstructionError, MapSource, MemberKind};
use pathbind_convert::{ConversionError, Conversions};
use pathbind_reflect::derive::Reflect;

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Person {
    name: String,
    age: i32,
}

#[derive(Reflect, Debug, PartialEq, Clone, Copy, Default)]
enum Level {
    #[default]
    Info,
    Warn,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Settings {
    title: String,
    level: Level,
    ratio: f64,
    ports: Vec<u16>,
    limit: Option<u32>,
    enabled: bool,
    #[reflect(readonly)]
    revision: u32,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Company {
    name: String,
    owner: Option<Person>,
    office: Address,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Address {
    city: String,
    zip: u32,
}

#[derive(Reflect, Debug)]
struct NoDefault {
    name: String,
}

fn binder<T: pathbind_reflect::registry::GetTypeMeta + pathbind_reflect::Reflect>() -> Binder<T> {
    Binder::new(&Conversions::new()).unwrap()
}

#[test]
fn missing_keys_keep_defaults() {
    let source = MapSource::new().with("name", "Ada");
    let person = binder::<Person>().build(&source).unwrap();
    assert_eq!(person, Person { name: "Ada".into(), age: 0 });
}

#[test]
fn malformed_value_is_reported_once() {
    let source = MapSource::new().with("name", "Ada").with("age", "thirty");

    let mut failures = Vec::new();
    let person = binder::<Person>()
        .build_with(&source, |member, err| failures.push((member.name(), err.clone())))
        .unwrap();

    assert_eq!(person, Person { name: "Ada".into(), age: 0 });
    assert_eq!(failures.len(), 1);
    let (name, err) = &failures[0];
    assert_eq!(*name, "age");
    assert!(matches!(
        err,
        BindError::Conversion { key, source: ConversionError::Malformed { .. } } if key == "age"
    ));
}

#[test]
fn failed_members_keep_previous_values() {
    let mut settings = Settings {
        title: "old".into(),
        ratio: 0.5,
        ports: vec![1],
        ..Settings::default()
    };

    let source = MapSource::from_iter([
        ("title", "new"),
        ("level", "WARN"),
        ("ratio", "not a number"),
        ("ports", "80, 443"),
        ("limit", "NULL"),
        ("enabled", "bogus"),
        ("revision", "9"),
    ]);

    let failures = binder::<Settings>().try_bind(&source, &mut settings);
    let failed: Vec<_> = failures.iter().map(|(member, _)| member.name()).collect();
    assert_eq!(failed, ["ratio", "enabled"]);

    assert_eq!(settings, Settings {
        title: "new".into(),
        level: Level::Warn,
        ratio: 0.5,
        ports: vec![80, 443],
        limit: None,
        enabled: false,
        revision: 0,
    });
}

#[test]
fn members_in_declaration_order() {
    let binder = binder::<Settings>();
    let names: Vec<_> = binder.members().map(|member| member.name()).collect();
    assert_eq!(names, ["title", "level", "ratio", "ports", "limit", "enabled"]);
    assert!(binder.members().all(|member| member.kind() == MemberKind::Value));
    assert!(binder.members().all(|member| member.owner().is::<Settings>()));
}

#[test]
fn failures_repeat_in_the_same_order() {
    let binder = binder::<Settings>();
    let source = MapSource::from_iter([("enabled", "x"), ("ratio", "y"), ("level", "z")]);

    let run = || {
        let mut names = Vec::new();
        binder.bind_with(&source, &mut Settings::default(), |member, _| names.push(member.name()));
        names
    };
    assert_eq!(run(), ["level", "ratio", "enabled"]);
    assert_eq!(run(), run());
}

#[test]
fn nested_members() {
    let binder = binder::<Company>();
    let kinds: Vec<_> = binder.members().map(|member| (member.name(), member.kind())).collect();
    assert_eq!(kinds, [
        ("name", MemberKind::Value),
        ("owner", MemberKind::Nested),
        ("office", MemberKind::Nested),
    ]);

    let source = MapSource::from_iter([
        ("name", "Analytical Engines"),
        ("owner.name", "Ada"),
        ("owner.age", "36"),
        ("office.city", "London"),
    ]);
    let company = binder.build(&source).unwrap();
    assert_eq!(company, Company {
        name: "Analytical Engines".into(),
        owner: Some(Person { name: "Ada".into(), age: 36 }),
        office: Address { city: "London".into(), zip: 0 },
    });
}

#[test]
fn nested_without_keys_is_left_alone() {
    let binder = binder::<Company>();

    let mut company = Company {
        office: Address { city: "Paris".into(), zip: 75 },
        ..Company::default()
    };
    binder.bind(&MapSource::new().with("owner.unknown", "x"), &mut company);

    assert_eq!(company.owner, None);
    assert_eq!(company.office, Address { city: "Paris".into(), zip: 75 });
}

#[test]
fn nested_failures_carry_full_keys() {
    let source = MapSource::from_iter([("office.zip", "abc"), ("office.city", "Rome")]);

    let mut company = Company::default();
    let failures = binder::<Company>().try_bind(&source, &mut company);

    assert_eq!(company.office.city, "Rome");
    assert_eq!(failures.len(), 1);
    let (member, err) = &failures[0];
    assert_eq!(member.name(), "zip");
    assert!(member.owner().is::<Address>());
    assert_eq!(err.key(), "office.zip");
}

#[test]
fn custom_separator() {
    let options = BinderOptions::default().with_separator("/");
    let binder = Binder::<Company>::with_options(&Conversions::new(), options).unwrap();

    let company = binder.build(&MapSource::new().with("office/zip", "12345")).unwrap();
    assert_eq!(company.office.zip, 12345);
}

#[test]
fn build_requires_a_default_constructor() {
    let binder = binder::<NoDefault>();
    assert!(!binder.can_build());
    assert!(matches!(
        binder.build(&MapSource::new()),
        Err(ConstructionError::NoDefaultConstructor { .. })
    ));

    let mut value = NoDefault { name: String::new() };
    binder.bind(&MapSource::new().with("name", "still binds"), &mut value);
    assert_eq!(value.name, "still binds");
}

#[test]
fn explicit_converters_take_part() {
    let mut conversions = Conversions::new();
    conversions.register::<i32, String, _>(|raw| match raw {
        "thirty" => Ok(30),
        other => other.trim().parse().map_err(|_| format!("`{other}` is not an age")),
    });

    let binder = Binder::<Person>::new(&conversions).unwrap();
    let person = binder.build(&MapSource::new().with("age", "thirty")).unwrap();
    assert_eq!(person.age, 30);
}

#[test]
#[should_panic(expected = "callback failed")]
fn callback_panics_propagate() {
    let source = MapSource::new().with("age", "x");
    binder::<Person>().bind_with(&source, &mut Person::default(), |_, _| panic!("callback failed"));
}
