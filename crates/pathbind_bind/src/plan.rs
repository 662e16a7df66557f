use pathbind_convert::{Conversions, Converter};
use pathbind_reflect::Reflect;
use pathbind_reflect::info::{NullableInfo, StructInfo, TypeInfo};
use pathbind_reflect::ops::{ReflectMut, Struct};
use pathbind_reflect::registry::TypeTraitDefault;

use crate::{
    BindError, BinderOptions, ConstructionError, DataSource, MemberDescriptor, MemberKind,
    PrefixedSource,
};

/// Failed members in the order they were visited.
pub(crate) type Failures = Vec<(MemberDescriptor, BindError)>;

// -----------------------------------------------------------------------------
// BindPlan

/// The bindable members of one struct, resolved up front.
pub(crate) struct BindPlan {
    members: Box<[BoundMember]>,
    separator: &'static str,
}

struct BoundMember {
    descriptor: MemberDescriptor,
    action: Action,
}

enum Action {
    Value(Converter),
    Nested {
        plan: BindPlan,
        fresh: TypeTraitDefault,
        wrap: Option<&'static NullableInfo>,
    },
}

impl BindPlan {
    pub(crate) fn compile(
        info: &'static TypeInfo,
        conversions: &Conversions,
        options: &BinderOptions,
    ) -> Result<Self, ConstructionError> {
        let owner = info.as_struct().ok_or(ConstructionError::NotAStruct {
            ty: info.type_path(),
        })?;

        let plan = Self::compile_struct(owner, conversions, options);
        log::debug!(
            "compiled binder for `{}` with {} member(s)",
            info.type_path(),
            plan.members.len()
        );
        Ok(plan)
    }

    fn compile_struct(
        owner: &'static StructInfo,
        conversions: &Conversions,
        options: &BinderOptions,
    ) -> Self {
        let mut members = Vec::with_capacity(owner.field_len());

        for (index, field) in owner.iter().enumerate() {
            if !field.is_writable() {
                log::debug!("skipping `{}.{}`: read-only", owner.ty().name(), field.name());
                continue;
            }

            let Some((kind, action)) =
                Self::compile_member(field.type_info(), conversions, options)
            else {
                log::debug!(
                    "skipping `{}.{}`: no converter for `{}`",
                    owner.ty().name(),
                    field.name(),
                    field.ty().path()
                );
                continue;
            };

            members.push(BoundMember {
                descriptor: MemberDescriptor::new(field.name(), index, *owner.ty(), *field.ty(), kind),
                action,
            });
        }

        Self {
            members: members.into_boxed_slice(),
            separator: options.separator,
        }
    }

    fn compile_member(
        value: &'static TypeInfo,
        conversions: &Conversions,
        options: &BinderOptions,
    ) -> Option<(MemberKind, Action)> {
        if let Some(converter) = conversions.find_converter(value.type_id()) {
            return Some((MemberKind::Value, Action::Value(converter)));
        }

        if !options.nested {
            return None;
        }

        let (wrap, inner) = match value.as_nullable() {
            Some(nullable) => (Some(nullable), nullable.inner_info()),
            None => (None, value),
        };
        let owner = inner.as_struct()?;

        let fresh = conversions
            .registry()
            .read()
            .get_type_trait::<TypeTraitDefault>(inner.type_id())
            .cloned()?;

        let plan = Self::compile_struct(owner, conversions, options);

        Some((MemberKind::Nested, Action::Nested { plan, fresh, wrap }))
    }

    #[inline]
    pub(crate) fn descriptors(&self) -> impl Iterator<Item = &MemberDescriptor> {
        self.members.iter().map(|member| &member.descriptor)
    }

    /// Whether `source` holds a key for any member, nested ones included.
    fn any_present(&self, source: &dyn DataSource) -> bool {
        self.members.iter().any(|member| {
            let name = member.descriptor.name();
            match &member.action {
                Action::Value(_) => source.has(name),
                Action::Nested { plan, .. } => {
                    plan.any_present(&PrefixedSource::with_separator(source, name, self.separator))
                }
            }
        })
    }

    /// Binds every member present in `source`, collecting failures.
    ///
    /// `path` is the key prefix of `source` in the outermost source.
    pub(crate) fn bind(
        &self,
        source: &dyn DataSource,
        target: &mut dyn Reflect,
        path: &str,
        failures: &mut Failures,
    ) {
        let ReflectMut::Struct(target) = target.reflect_mut() else {
            unreachable!("bind plans are only compiled for structs");
        };

        for member in &self.members {
            let name = member.descriptor.name();
            let key = || self.join(path, name);

            let result = match &member.action {
                Action::Value(converter) => {
                    if !source.has(name) {
                        continue;
                    }
                    let Some(raw) = source.get(name) else {
                        continue;
                    };
                    converter
                        .convert(&raw)
                        .map_err(|err| BindError::Conversion {
                            key: key(),
                            source: err,
                        })
                        .and_then(|value| assign(target, &member.descriptor, value, key))
                }
                Action::Nested { plan, fresh, wrap } => {
                    let child = PrefixedSource::with_separator(source, name, self.separator);
                    if !plan.any_present(&child) {
                        continue;
                    }

                    let mut value = fresh.default();
                    plan.bind(&child, &mut *value, &key(), failures);

                    let value = match wrap {
                        Some(nullable) => nullable.some(value).map_err(|value| BindError::Assign {
                            key: key(),
                            expected: member.descriptor.value_type().path(),
                            found: value.reflect_type_path(),
                        }),
                        None => Ok(value),
                    };
                    value.and_then(|value| assign(target, &member.descriptor, value, key))
                }
            };

            if let Err(err) = result {
                failures.push((member.descriptor.clone(), err));
            }
        }
    }

    fn join(&self, path: &str, name: &str) -> String {
        if path.is_empty() {
            name.to_owned()
        } else {
            format!("{path}{}{name}", self.separator)
        }
    }
}

fn assign(
    target: &mut dyn Struct,
    member: &MemberDescriptor,
    value: Box<dyn Reflect>,
    key: impl FnOnce() -> String,
) -> Result<(), BindError> {
    let Some(slot) = target.field_at_mut(member.index()) else {
        unreachable!("`{member}` is a field of the bound struct");
    };

    slot.set(value).map_err(|value| BindError::Assign {
        key: key(),
        expected: member.value_type().path(),
        found: value.reflect_type_path(),
    })
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use pathbind_convert::Conversions;
    use pathbind_reflect::derive::Reflect;
    use pathbind_reflect::info::Typed;

    use super::BindPlan;
    use crate::{BinderOptions, ConstructionError, MemberKind};

    #[derive(Reflect, Default)]
    #[reflect(default)]
    struct Outer {
        label: String,
        inner: Option<Inner>,
        fixed: Inner,
        #[reflect(readonly)]
        version: u32,
    }

    #[derive(Reflect, Default)]
    #[reflect(default)]
    struct Inner {
        weight: f32,
        tags: Vec<String>,
    }

    #[derive(Reflect)]
    struct Raw {
        _inner: Inner,
    }

    #[derive(Reflect)]
    struct Holder {
        raw: Raw,
        count: usize,
    }

    #[test]
    fn member_discovery() {
        let conversions = Conversions::new();
        conversions.register_type::<Outer>();

        let plan = BindPlan::compile(Outer::type_info(), &conversions, &BinderOptions::default()).unwrap();
        let kinds: Vec<_> = plan.descriptors().map(|d| (d.name(), d.index(), d.kind())).collect();
        assert_eq!(kinds, [
            ("label", 0, MemberKind::Value),
            ("inner", 1, MemberKind::Nested),
            ("fixed", 2, MemberKind::Nested),
        ]);

        let Some(super::Action::Nested { plan: inner, wrap, .. }) = plan.members.get(1).map(|m| &m.action) else {
            panic!("expected a nested member");
        };
        assert!(wrap.is_some());
        let names: Vec<_> = inner.descriptors().map(|d| d.name()).collect();
        assert_eq!(names, ["weight", "tags"]);
    }

    #[test]
    fn nested_needs_a_default_constructor() {
        let conversions = Conversions::new();
        conversions.register_type::<Holder>();

        let plan = BindPlan::compile(Holder::type_info(), &conversions, &BinderOptions::default()).unwrap();
        let names: Vec<_> = plan.descriptors().map(|d| d.name()).collect();
        assert_eq!(names, ["count"]);
    }

    #[test]
    fn nesting_can_be_disabled() {
        let conversions = Conversions::new();
        conversions.register_type::<Outer>();

        let options = BinderOptions::default().with_nested(false);
        let plan = BindPlan::compile(Outer::type_info(), &conversions, &options).unwrap();
        assert_eq!(plan.descriptors().count(), 1);
    }

    #[test]
    fn only_structs() {
        let conversions = Conversions::new();
        assert!(matches!(
            BindPlan::compile(<Vec<u8>>::type_info(), &conversions, &BinderOptions::default()),
            Err(ConstructionError::NotAStruct { .. })
        ));
    }
}
