use core::any::TypeId;
use core::fmt::{self, Display};

use pathbind_reflect::Reflect;
use pathbind_reflect::registry::{GetTypeMeta, TypeMeta, TypeRegistryArc};
use pathbind_utils::{SyncTypeIdMap, TypeIdMap};

use crate::providers::BUILTIN_PROVIDERS;
use crate::{ConversionError, ConversionProvider, Converter, builtin};

/// A registry of string converters keyed by destination type.
///
/// Lookup order for a type:
///
/// 1. Explicit converters, see [`register`](Self::register).
/// 2. User providers in registration order, see [`register_provider`](Self::register_provider).
/// 3. The built-in chain: enums, `Option<T>`, sequences, then
///    [`TypeTraitFromStr`](pathbind_reflect::registry::TypeTraitFromStr).
///
/// Steps 2 and 3 need the type to be known to the shared
/// [`TypeRegistryArc`]. Their outcome, including "no converter", is cached
/// per type. Registration takes `&mut self` and is expected at start-up;
/// lookups are safe from any number of threads.
pub struct Conversions {
    explicit: TypeIdMap<Converter>,
    providers: Vec<Box<dyn ConversionProvider>>,
    registry: TypeRegistryArc,
    resolved: SyncTypeIdMap<Option<Converter>>,
}

impl Conversions {
    /// Conversions with the built-in converters over a fresh registry.
    pub fn new() -> Self {
        Self::with_registry(TypeRegistryArc::default())
    }

    /// Conversions with the built-in converters over a shared registry.
    pub fn with_registry(registry: TypeRegistryArc) -> Self {
        let mut conversions = Self {
            explicit: TypeIdMap::new(),
            providers: Vec::new(),
            registry,
            resolved: SyncTypeIdMap::new(),
        };
        builtin::install(&mut conversions);
        conversions
    }

    #[inline]
    pub fn registry(&self) -> &TypeRegistryArc {
        &self.registry
    }

    /// Registers an explicit converter for `T`, replacing any previous one.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathbind_convert::Conversions;
    ///
    /// let mut conversions = Conversions::new();
    /// conversions.register(|raw: &str| match raw {
    ///     "yes" => Ok(true),
    ///     "no" => Ok(false),
    ///     _ => Err("expected `yes` or `no`"),
    /// });
    ///
    /// assert_eq!(conversions.convert_to::<bool>("yes").unwrap(), true);
    /// assert!(conversions.convert_to::<bool>("true").is_err());
    /// assert_eq!(conversions.convert_to::<Vec<bool>>("no,yes").unwrap(), [false, true]);
    /// ```
    pub fn register<T, E, F>(&mut self, parse: F)
    where
        T: GetTypeMeta + Reflect,
        E: Display,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    {
        self.registry.write().register::<T>();
        self.register_converter(Converter::typed(parse));
    }

    /// Registers a converter under its own target type.
    pub fn register_converter(&mut self, converter: Converter) {
        log::debug!("registered converter for `{}`", converter.target());
        self.explicit.insert(converter.target().id(), converter);
        self.resolved = SyncTypeIdMap::new();
    }

    /// Appends a provider, consulted before the built-in chain.
    pub fn register_provider(&mut self, provider: impl ConversionProvider) {
        self.providers.push(Box::new(provider));
        self.resolved = SyncTypeIdMap::new();
    }

    /// Makes `T` and its dependencies known to the provider chain.
    ///
    /// Returns `false` if `T` was already registered.
    #[inline]
    pub fn register_type<T: GetTypeMeta>(&self) -> bool {
        self.registry.write().register::<T>()
    }

    /// The converter for a type, or `None` if it is not convertible.
    pub fn find_converter(&self, type_id: TypeId) -> Option<Converter> {
        if let Some(converter) = self.explicit.get(type_id) {
            return Some(converter.clone());
        }
        if let Some(resolved) = self.resolved.get(type_id) {
            return resolved;
        }

        // Unknown types are not cached, they may be registered later.
        let Some(meta) = self.registry.read().get(type_id).cloned() else {
            log::trace!("no type meta for {type_id:?}");
            return None;
        };

        let converter = self.resolve(&meta);
        self.resolved.get_or_insert_with(type_id, || converter)
    }

    /// The converter for `T`, registering `T` on first use.
    pub fn find<T: GetTypeMeta>(&self) -> Option<Converter> {
        let type_id = TypeId::of::<T>();
        if !self.explicit.contains(type_id) && !self.registry.read().contains(type_id) {
            self.register_type::<T>();
        }
        self.find_converter(type_id)
    }

    #[inline]
    pub fn has(&self, type_id: TypeId) -> bool {
        self.find_converter(type_id).is_some()
    }

    pub fn convert(&self, type_id: TypeId, raw: &str) -> Result<Box<dyn Reflect>, ConversionError> {
        match self.find_converter(type_id) {
            Some(converter) => converter.convert(raw),
            None => Err(ConversionError::NoConverter {
                target: self.describe(type_id),
            }),
        }
    }

    /// Converts to `T`, registering `T` on first use.
    pub fn convert_to<T: GetTypeMeta + Reflect>(&self, raw: &str) -> Result<T, ConversionError> {
        match self.find::<T>() {
            Some(converter) => converter.convert_to::<T>(raw),
            None => Err(ConversionError::NoConverter {
                target: T::type_path().to_owned(),
            }),
        }
    }

    fn resolve(&self, meta: &TypeMeta) -> Option<Converter> {
        let user = self.providers.iter().map(|provider| &**provider);
        let found = user
            .chain(BUILTIN_PROVIDERS.iter().copied())
            .find_map(|provider| provider.converter_for(meta, self));

        match &found {
            Some(_) => log::debug!("resolved converter for `{}`", meta.ty()),
            None => log::debug!("`{}` has no converter", meta.ty()),
        }
        found
    }

    fn describe(&self, type_id: TypeId) -> String {
        match self.registry.read().get_type_info(type_id) {
            Some(info) => info.type_path().to_owned(),
            None => format!("{type_id:?}"),
        }
    }
}

impl Default for Conversions {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Conversions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conversions")
            .field("explicit", &self.explicit.len())
            .field("providers", &self.providers.len())
            .field("resolved", &self.resolved.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::any::TypeId;
    use core::str::FromStr;

    use pathbind_reflect::derive::Reflect;
    use pathbind_reflect::info::TypePath;
    use pathbind_reflect::registry::TypeMeta;

    use crate::{ConversionError, ConversionProvider, Conversions, Converter};

    #[derive(Reflect, Debug, PartialEq, Clone, Copy)]
    enum Color {
        Red,
        DarkBlue,
    }

    #[derive(Reflect, Debug, PartialEq)]
    #[reflect(from_str)]
    struct Celsius {
        degrees: i32,
    }

    impl FromStr for Celsius {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            let degrees = s.strip_suffix("C").ok_or("missing unit")?;
            degrees
                .parse()
                .map(|degrees| Self { degrees })
                .map_err(|_| String::from("bad number"))
        }
    }

    #[derive(Reflect)]
    struct Handle {
        _id: u32,
    }

    #[test]
    fn enums_ignore_case() {
        let conversions = Conversions::new();
        assert_eq!(conversions.convert_to::<Color>("darkblue").unwrap(), Color::DarkBlue);
        assert_eq!(conversions.convert_to::<Color>("RED").unwrap(), Color::Red);
        assert!(matches!(
            conversions.convert_to::<Color>("green"),
            Err(ConversionError::Malformed { .. })
        ));
    }

    #[test]
    fn nullable_literal() {
        let conversions = Conversions::new();
        assert_eq!(conversions.convert_to::<Option<i32>>("NULL").unwrap(), None);
        assert_eq!(conversions.convert_to::<Option<i32>>("5").unwrap(), Some(5));
        assert_eq!(conversions.convert_to::<Option<Color>>("red").unwrap(), Some(Color::Red));
        assert!(conversions.convert_to::<Option<i32>>("null").is_err());
    }

    #[test]
    fn sequences() {
        let conversions = Conversions::new();
        assert_eq!(conversions.convert_to::<Vec<i32>>("1, 2 ,3").unwrap(), [1, 2, 3]);
        assert_eq!(conversions.convert_to::<Vec<String>>("").unwrap(), [""]);
        assert_eq!(conversions.convert_to::<[u8; 2]>("4,5").unwrap(), [4, 5]);
        assert!(conversions.convert_to::<[u8; 2]>("4,5,6").is_err());

        let err = conversions.convert_to::<Vec<u8>>("1,x").unwrap_err();
        assert!(matches!(err, ConversionError::Element { index: 1, .. }));
    }

    #[test]
    fn from_str_trait() {
        let conversions = Conversions::new();
        assert_eq!(conversions.convert_to::<Celsius>("21C").unwrap(), Celsius { degrees: 21 });

        let err = conversions.convert_to::<Celsius>("21").unwrap_err();
        let expected = format!("cannot convert `21` to `{}`: missing unit", Celsius::type_path());
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn unconvertible() {
        let conversions = Conversions::new();
        assert!(conversions.find::<Handle>().is_none());
        assert!(matches!(
            conversions.convert_to::<Handle>("1"),
            Err(ConversionError::NoConverter { .. })
        ));
        assert!(!conversions.has(TypeId::of::<Vec<Handle>>()));
        assert!(matches!(
            conversions.convert(TypeId::of::<Vec<Handle>>(), "1"),
            Err(ConversionError::NoConverter { .. })
        ));
    }

    #[test]
    fn lookup_is_idempotent() {
        let conversions = Conversions::new();
        conversions.register_type::<Vec<Color>>();

        let first = conversions.find_converter(TypeId::of::<Vec<Color>>()).unwrap();
        let second = conversions.find_converter(TypeId::of::<Vec<Color>>()).unwrap();
        assert_eq!(first.target(), second.target());
        assert_eq!(
            first.convert_to::<Vec<Color>>("red").unwrap(),
            second.convert_to::<Vec<Color>>("red").unwrap()
        );
    }

    #[test]
    fn explicit_registration_replaces_resolved() {
        let mut conversions = Conversions::new();
        assert_eq!(conversions.convert_to::<Color>("red").unwrap(), Color::Red);

        conversions.register(|raw: &str| match raw {
            "r" => Ok(Color::Red),
            _ => Err("only `r`"),
        });
        assert_eq!(conversions.convert_to::<Color>("r").unwrap(), Color::Red);
        assert!(conversions.convert_to::<Color>("red").is_err());
    }

    struct AlwaysBlue;

    impl ConversionProvider for AlwaysBlue {
        fn converter_for(&self, meta: &TypeMeta, _: &Conversions) -> Option<Converter> {
            meta.ty()
                .is::<Color>()
                .then(|| Converter::typed(|_: &str| Ok::<_, String>(Color::DarkBlue)))
        }
    }

    #[test]
    fn user_providers_precede_builtin() {
        let mut conversions = Conversions::new();
        conversions.register_provider(AlwaysBlue);
        assert_eq!(conversions.convert_to::<Color>("red").unwrap(), Color::DarkBlue);
        assert_eq!(conversions.convert_to::<Vec<Color>>("red,red").unwrap(), [
            Color::DarkBlue,
            Color::DarkBlue
        ]);
    }

    #[test]
    fn concurrent_lookup() {
        let conversions = Conversions::new();
        conversions.register_type::<Vec<Option<Color>>>();

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let values = conversions
                        .convert_to::<Vec<Option<Color>>>("red,NULL")
                        .unwrap();
                    assert_eq!(values, [Some(Color::Red), None]);
                });
            }
        });
    }
}
