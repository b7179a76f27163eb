//! Payload shapes
//!
//! A shape names the Rust type a response payload decodes into and carries a
//! readable description of it for decode errors. A payload is either a plain
//! type or a container (list or string-keyed map) of an element type.

use std::collections::HashMap;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;

/// The expected shape of a response payload.
pub trait Shape {
    type Output: DeserializeOwned;

    fn describe() -> String;
}

/// A container a payload element can be wrapped in.
pub trait ContainerKind {
    type Of<T: DeserializeOwned>: DeserializeOwned;

    const NAME: &'static str;
}

/// JSON array, decoded into a `Vec`.
pub struct List;

/// JSON object with arbitrary keys, decoded into a `HashMap<String, _>`.
pub struct Map;

impl ContainerKind for List {
    type Of<T: DeserializeOwned> = Vec<T>;

    const NAME: &'static str = "list";
}

impl ContainerKind for Map {
    type Of<T: DeserializeOwned> = HashMap<String, T>;

    const NAME: &'static str = "map";
}

/// A payload decoded directly into `T`.
pub struct Plain<T>(PhantomData<fn() -> T>);

/// A payload decoded into container `C` of elements `T`.
pub struct Container<C, T>(PhantomData<fn() -> (C, T)>);

pub type ListOf<T> = Container<List, T>;
pub type MapOf<T> = Container<Map, T>;

impl<T: DeserializeOwned> Shape for Plain<T> {
    type Output = T;

    fn describe() -> String {
        short_type_name::<T>()
    }
}

impl<C: ContainerKind, T: DeserializeOwned> Shape for Container<C, T> {
    type Output = C::Of<T>;

    fn describe() -> String {
        format!("{} of {}", C::NAME, short_type_name::<T>())
    }
}

/// `std::any::type_name` without module paths, e.g. `Vec<Lock>`.
pub(crate) fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();

    for ch in full.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            segment.push(ch);
        } else {
            out.push_str(last_path_segment(&segment));
            segment.clear();
            out.push(ch);
        }
    }
    out.push_str(last_path_segment(&segment));
    out
}

fn last_path_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}
