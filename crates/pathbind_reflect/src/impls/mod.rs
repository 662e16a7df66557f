//! Reflection for std types.

mod array;
mod opaque;
mod option;
mod vec;
