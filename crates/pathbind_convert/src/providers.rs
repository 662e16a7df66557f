use pathbind_reflect::registry::{TypeMeta, TypeTraitFromStr};

use crate::{ConversionError, Conversions, Converter, NULL_LITERAL};

/// Builds converters for types without an explicit registration.
///
/// Providers are consulted in order; the first one returning `Some` wins and
/// its converter is cached for the type.
///
/// # Examples
///
/// ```
/// use pathbind_convert::{ConversionProvider, Conversions, Converter};
/// use pathbind_reflect::registry::TypeMeta;
///
/// /// Accepts `0x` prefixed hex for `u32`.
/// struct Hex;
///
/// impl ConversionProvider for Hex {
///     fn converter_for(&self, meta: &TypeMeta, _: &Conversions) -> Option<Converter> {
///         meta.ty().is::<u32>().then(|| {
///             Converter::typed(|raw: &str| u32::from_str_radix(raw.trim_start_matches("0x"), 16))
///         })
///     }
/// }
///
/// let mut conversions = Conversions::new();
/// conversions.register_provider(Hex);
///
/// // explicit registrations still take precedence
/// assert_eq!(conversions.convert_to::<u32>("10").unwrap(), 10);
/// ```
pub trait ConversionProvider: Send + Sync + 'static {
    fn converter_for(&self, meta: &TypeMeta, conversions: &Conversions) -> Option<Converter>;
}

/// The built-in chain, consulted after user providers.
pub(crate) static BUILTIN_PROVIDERS: [&dyn ConversionProvider; 4] = [
    &EnumProvider,
    &NullableProvider,
    &SequenceProvider,
    &FromStrProvider,
];

// -----------------------------------------------------------------------------
// EnumProvider

/// Unit enums, matching variant names case-insensitively.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumProvider;

impl ConversionProvider for EnumProvider {
    fn converter_for(&self, meta: &TypeMeta, _: &Conversions) -> Option<Converter> {
        let info = meta.info().as_enum()?;
        let target = *info.ty();

        Some(Converter::new(target, move |raw| {
            let trimmed = raw.trim();
            info.index_of_ignore_case(trimmed)
                .and_then(|index| info.from_index(index))
                .ok_or_else(|| {
                    ConversionError::malformed(
                        target.path(),
                        raw,
                        format_args!("expected one of {:?}", info.variants()),
                    )
                })
        }))
    }
}

// -----------------------------------------------------------------------------
// NullableProvider

/// `Option<T>` where `T` is convertible.
///
/// [`NULL_LITERAL`] becomes `None`; anything else is converted as `T`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullableProvider;

impl ConversionProvider for NullableProvider {
    fn converter_for(&self, meta: &TypeMeta, conversions: &Conversions) -> Option<Converter> {
        let info = meta.info().as_nullable()?;
        let inner = conversions.find_converter(info.inner().id())?;

        Some(Converter::new(*info.ty(), move |raw| {
            if raw == NULL_LITERAL {
                return Ok(info.none());
            }
            info.some(inner.convert(raw)?)
                .map_err(|value| ConversionError::TargetMismatch {
                    expected: info.inner().path(),
                    found: value.reflect_type_path(),
                })
        }))
    }
}

// -----------------------------------------------------------------------------
// SequenceProvider

/// `Vec<T>` and `[T; N]` where `T` is convertible.
///
/// The raw string is split on `,` and every element is trimmed. Empty
/// elements are kept, so `""` is a one-element sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceProvider;

impl ConversionProvider for SequenceProvider {
    fn converter_for(&self, meta: &TypeMeta, conversions: &Conversions) -> Option<Converter> {
        let info = meta.info().as_list()?;
        let item = conversions.find_converter(info.item().id())?;
        let target = *info.ty();

        Some(Converter::new(target, move |raw| {
            let items = raw
                .split(',')
                .map(str::trim)
                .enumerate()
                .map(|(index, element)| {
                    item.convert(element)
                        .map_err(|err| ConversionError::Element {
                            index,
                            source: Box::new(err),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            if let Some(capacity) = info.capacity()
                && capacity != items.len()
            {
                return Err(ConversionError::malformed(
                    target.path(),
                    raw,
                    format_args!("expected {capacity} elements, found {}", items.len()),
                ));
            }

            info.from_items(items).ok_or_else(|| {
                ConversionError::malformed(target.path(), raw, "elements do not fit the sequence")
            })
        }))
    }
}

// -----------------------------------------------------------------------------
// FromStrProvider

/// Types registered with a [`TypeTraitFromStr`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FromStrProvider;

impl ConversionProvider for FromStrProvider {
    fn converter_for(&self, meta: &TypeMeta, _: &Conversions) -> Option<Converter> {
        let from_str = meta.get_trait::<TypeTraitFromStr>()?.clone();
        let target = *meta.ty();

        Some(Converter::new(target, move |raw| {
            from_str
                .parse(raw)
                .map_err(|message| ConversionError::malformed(target.path(), raw, message))
        }))
    }
}
