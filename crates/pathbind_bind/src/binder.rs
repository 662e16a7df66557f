use core::any::TypeId;
use core::fmt;
use core::marker::PhantomData;
use std::sync::Arc;

use pathbind_convert::Conversions;
use pathbind_reflect::Reflect;
use pathbind_reflect::registry::{GetTypeMeta, TypeTraitDefault};

use crate::plan::BindPlan;
use crate::{BindError, BinderOptions, ConstructionError, DataSource, MemberDescriptor};

/// Assigns the members of a `T` from a [`DataSource`].
///
/// Built once per type: every externally writable field whose type has a
/// converter becomes a value member, and every field of a struct type with
/// a default constructor (or an `Option` of one) becomes a nested member
/// bound from the keys under its name.
///
/// Binding never stops at a failed member. Each member is converted and
/// assigned independently; failures are collected and reported afterwards
/// in declaration order, and the failed members keep their previous values.
/// Members without a key in the source are left untouched.
///
/// # Examples
///
/// ```
/// use pathbind_bind::{Binder, MapSource};
/// use pathbind_convert::Conversions;
/// use pathbind_reflect::derive::Reflect;
///
/// #[derive(Reflect, Default, Debug, PartialEq)]
/// #[reflect(default)]
/// struct Person {
///     name: String,
///     age: i32,
/// }
///
/// let binder = Binder::<Person>::new(&Conversions::new()).unwrap();
///
/// let source = MapSource::from_iter([("name", "Ada"), ("age", "thirty")]);
/// let mut failed = Vec::new();
/// let person = binder
///     .build_with(&source, |member, _| failed.push(member.name()))
///     .unwrap();
///
/// assert_eq!(person, Person { name: "Ada".into(), age: 0 });
/// assert_eq!(failed, ["age"]);
/// ```
pub struct Binder<T> {
    plan: Arc<BindPlan>,
    construct: Option<TypeTraitDefault>,
    marker: PhantomData<fn() -> T>,
}

impl<T: GetTypeMeta + Reflect> Binder<T> {
    #[inline]
    pub fn new(conversions: &Conversions) -> Result<Self, ConstructionError> {
        Self::with_options(conversions, BinderOptions::default())
    }

    /// Compiles the binder, registering `T` and its field types with the
    /// registry of `conversions`.
    ///
    /// # Errors
    ///
    /// `T` is not a struct with named fields.
    pub fn with_options(conversions: &Conversions, options: BinderOptions) -> Result<Self, ConstructionError> {
        conversions.register_type::<T>();
        let plan = BindPlan::compile(T::type_info(), conversions, &options)?;

        let construct = conversions
            .registry()
            .read()
            .get_type_trait::<TypeTraitDefault>(TypeId::of::<T>())
            .cloned();

        Ok(Self {
            plan: Arc::new(plan),
            construct,
            marker: PhantomData,
        })
    }

    /// Bound members in declaration order.
    pub fn members(&self) -> impl Iterator<Item = &MemberDescriptor> {
        self.plan.descriptors()
    }

    /// Whether [`build`](Self::build) can create a `T`.
    #[inline]
    pub fn can_build(&self) -> bool {
        self.construct.is_some()
    }

    /// Binds `source` into `target`, logging failed members.
    pub fn bind(&self, source: &dyn DataSource, target: &mut T) {
        self.bind_with(source, target, log_failure);
    }

    /// Binds `source` into `target`, then calls `on_error` for each failed
    /// member.
    ///
    /// `on_error` runs after every member has been processed and is not
    /// guarded: a panic inside it propagates.
    pub fn bind_with(
        &self,
        source: &dyn DataSource,
        target: &mut T,
        mut on_error: impl FnMut(&MemberDescriptor, &BindError),
    ) {
        for (member, err) in self.try_bind(source, target) {
            on_error(&member, &err);
        }
    }

    /// Binds `source` into `target`, returning the failed members.
    pub fn try_bind(&self, source: &dyn DataSource, target: &mut T) -> Vec<(MemberDescriptor, BindError)> {
        let mut failures = Vec::new();
        self.plan.bind(source, target.as_reflect_mut(), "", &mut failures);
        failures
    }

    /// Creates a default `T` and binds `source` into it, logging failed
    /// members.
    ///
    /// # Errors
    ///
    /// `T` has no default constructor, see [`can_build`](Self::can_build).
    pub fn build(&self, source: &dyn DataSource) -> Result<T, ConstructionError> {
        self.build_with(source, log_failure)
    }

    /// Like [`build`](Self::build), reporting failed members to `on_error`.
    pub fn build_with(
        &self,
        source: &dyn DataSource,
        on_error: impl FnMut(&MemberDescriptor, &BindError),
    ) -> Result<T, ConstructionError> {
        let construct = self.construct.as_ref().ok_or(ConstructionError::NoDefaultConstructor {
            ty: T::type_path(),
        })?;

        let Ok(mut target) = construct.default().take::<T>() else {
            unreachable!("the default constructor of `{}` built another type", T::type_path());
        };
        self.bind_with(source, &mut target, on_error);
        Ok(target)
    }
}

fn log_failure(member: &MemberDescriptor, err: &BindError) {
    log::warn!("failed to bind `{member}`: {err}");
}

impl<T> Clone for Binder<T> {
    fn clone(&self) -> Self {
        Self {
            plan: Arc::clone(&self.plan),
            construct: self.construct.clone(),
            marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Binder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binder")
            .field("members", &self.plan.descriptors().map(MemberDescriptor::name).collect::<Vec<_>>())
            .field("can_build", &self.construct.is_some())
            .finish()
    }
}
