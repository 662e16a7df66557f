use std::fmt;
use std::sync::Arc;

use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed};

/// Type-erased method body: receiver, optional argument, owned result.
///
/// Returns `None` when the receiver or argument has an unexpected type.
pub type MethodFn =
    Arc<dyn Fn(&dyn Reflect, Option<&dyn Reflect>) -> Option<Box<dyn Reflect>> + Send + Sync>;

#[inline]
fn method_fn<F>(f: F) -> MethodFn
where
    F: Fn(&dyn Reflect, Option<&dyn Reflect>) -> Option<Box<dyn Reflect>> + Send + Sync + 'static,
{
    Arc::new(f)
}

// -----------------------------------------------------------------------------
// ArgInfo

/// The single argument of a one-argument method.
#[derive(Clone, Debug)]
pub struct ArgInfo {
    ty: Type,
    type_info: fn() -> &'static TypeInfo,
}

impl ArgInfo {
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }
}

// -----------------------------------------------------------------------------
// MethodInfo

/// A callable method taking `&self` and at most one owned argument.
///
/// Methods always produce owned values.
///
/// # Examples
///
/// ```
/// use pathbind_reflect::{Reflect, derive::Reflect, info::Typed};
///
/// #[derive(Reflect)]
/// #[reflect(method(total), method(scaled, arg))]
/// struct Order {
///     price: u32,
///     count: u32,
/// }
///
/// impl Order {
///     fn total(&self) -> u32 { self.price * self.count }
///     fn scaled(&self, by: u32) -> u32 { self.total() * by }
/// }
///
/// let order = Order { price: 3, count: 4 };
/// let info = Order::type_info().as_struct().unwrap();
///
/// let total = info.method("total").unwrap().invoke(&order, None).unwrap();
/// assert_eq!(total.downcast_ref::<u32>(), Some(&12));
///
/// let scaled = info.method("scaled").unwrap().invoke(&order, Some(&2_u32 as &dyn Reflect)).unwrap();
/// assert_eq!(scaled.downcast_ref::<u32>(), Some(&24));
/// ```
#[derive(Clone)]
pub struct MethodInfo {
    name: &'static str,
    owner: Type,
    ret: Type,
    ret_info: fn() -> &'static TypeInfo,
    arg: Option<ArgInfo>,
    func: MethodFn,
}

impl MethodInfo {
    /// A method `fn(&self) -> R`.
    pub fn zero_arg<T, R>(name: &'static str, f: fn(&T) -> R) -> Self
    where
        T: Reflect + TypePath,
        R: Reflect + Typed,
    {
        Self {
            name,
            owner: Type::of::<T>(),
            ret: Type::of::<R>(),
            ret_info: R::type_info,
            arg: None,
            func: method_fn(move |this, _| {
                let this = this.downcast_ref::<T>()?;
                Some(Box::new(f(this)) as Box<dyn Reflect>)
            }),
        }
    }

    /// A method `fn(&self, A) -> R`.
    ///
    /// The argument is cloned out of the supplied value on each call.
    pub fn one_arg<T, A, R>(name: &'static str, f: fn(&T, A) -> R) -> Self
    where
        T: Reflect + TypePath,
        A: Reflect + Typed + Clone,
        R: Reflect + Typed,
    {
        Self {
            name,
            owner: Type::of::<T>(),
            ret: Type::of::<R>(),
            ret_info: R::type_info,
            arg: Some(ArgInfo {
                ty: Type::of::<A>(),
                type_info: A::type_info,
            }),
            func: method_fn(move |this, arg| {
                let this = this.downcast_ref::<T>()?;
                let arg = arg?.downcast_ref::<A>()?.clone();
                Some(Box::new(f(this, arg)) as Box<dyn Reflect>)
            }),
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn owner(&self) -> &Type {
        &self.owner
    }

    #[inline]
    pub const fn return_type(&self) -> &Type {
        &self.ret
    }

    #[inline]
    pub fn return_info(&self) -> &'static TypeInfo {
        (self.ret_info)()
    }

    #[inline]
    pub const fn argument(&self) -> Option<&ArgInfo> {
        self.arg.as_ref()
    }

    #[inline]
    pub const fn arity(&self) -> usize {
        if self.arg.is_some() { 1 } else { 0 }
    }

    #[inline]
    pub fn func(&self) -> &MethodFn {
        &self.func
    }

    /// Calls the method, returning `None` on a receiver or argument of the
    /// wrong type.
    #[inline]
    pub fn invoke(&self, this: &dyn Reflect, arg: Option<&dyn Reflect>) -> Option<Box<dyn Reflect>> {
        (self.func)(this, arg)
    }
}

impl fmt::Debug for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodInfo")
            .field("name", &self.name)
            .field("owner", &self.owner)
            .field("arg", &self.arg.as_ref().map(ArgInfo::ty))
            .field("ret", &self.ret)
            .finish_non_exhaustive()
    }
}
