//! Key extraction and key comparison strategies for ordered containers.
//!
//! An ordered container never compares stored values directly. It asks a
//! [`KeyOfValue`] for the key of each value and a [`Compare`] for the
//! order between two keys.

use std::{cmp::Ordering, fmt, marker::PhantomData};

pub trait KeyOfValue {
    type Value;
    type Key: ?Sized;
    fn key<'a>(&self, value: &'a Self::Value) -> &'a Self::Key;
}

/// A strict weak order over `K`.
pub trait Compare<K: ?Sized> {
    fn less(&self, lhs: &K, rhs: &K) -> bool;

    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        if self.less(lhs, rhs) {
            Ordering::Less
        } else if self.less(rhs, lhs) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
    fn equiv(&self, lhs: &K, rhs: &K) -> bool {
        !self.less(lhs, rhs) && !self.less(rhs, lhs)
    }
}

/// The value is its own key, as in sets.
pub struct Identity<T>(PhantomData<fn(&T) -> &T>);

/// The key is the first component of a pair, as in maps.
pub struct First<K, V>(PhantomData<fn(&(K, V)) -> &K>);

impl<T> Identity<T> {
    pub fn new() -> Self { Self(PhantomData) }
}

impl<K, V> First<K, V> {
    pub fn new() -> Self { Self(PhantomData) }
}

impl<T> KeyOfValue for Identity<T> {
    type Value = T;
    type Key = T;
    fn key<'a>(&self, value: &'a T) -> &'a T { value }
}

impl<K, V> KeyOfValue for First<K, V> {
    type Value = (K, V);
    type Key = K;
    fn key<'a>(&self, value: &'a (K, V)) -> &'a K { &value.0 }
}

// Derives would put bounds on `T`, `K` and `V`.
macro_rules! impl_marker_traits {
    ( $( $name:ident[$($gen:ident),*] ),* ) => { $(
        impl<$($gen),*> Clone for $name<$($gen),*> {
            fn clone(&self) -> Self { Self::new() }
        }
        impl<$($gen),*> Copy for $name<$($gen),*> {}
        impl<$($gen),*> Default for $name<$($gen),*> {
            fn default() -> Self { Self::new() }
        }
        impl<$($gen),*> fmt::Debug for $name<$($gen),*> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(stringify!($name))
            }
        }
    )* };
}

impl_marker_traits! { Identity[T], First[K, V] }

/// Ascending order given by [`Ord`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Less;

/// Descending order given by [`Ord`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Greater;

/// Order given by a closure returning whether `lhs` precedes `rhs`.
#[derive(Clone, Copy, Default)]
pub struct ByFn<F>(pub F);

impl<K: Ord + ?Sized> Compare<K> for Less {
    fn less(&self, lhs: &K, rhs: &K) -> bool { lhs < rhs }
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering { lhs.cmp(rhs) }
}

impl<K: Ord + ?Sized> Compare<K> for Greater {
    fn less(&self, lhs: &K, rhs: &K) -> bool { lhs > rhs }
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering { rhs.cmp(lhs) }
}

impl<K: ?Sized, F: Fn(&K, &K) -> bool> Compare<K> for ByFn<F> {
    fn less(&self, lhs: &K, rhs: &K) -> bool { (self.0)(lhs, rhs) }
}

impl<F> fmt::Debug for ByFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ByFn(..)")
    }
}

#[test]
fn key_extraction() {
    let id = Identity::<i32>::new();
    assert_eq!(id.key(&3), &3);

    let first = First::<&str, i32>::default();
    assert_eq!(first.key(&("a", 1)), &"a");
}

#[test]
fn comparators() {
    assert!(Less.less(&1, &2));
    assert!(!Less.less(&2, &2));
    assert_eq!(Compare::<i32>::compare(&Less, &2, &1), Ordering::Greater);

    assert!(Greater.less(&2, &1));
    assert_eq!(Compare::<i32>::compare(&Greater, &2, &1), Ordering::Less);

    let by_len = ByFn(|a: &str, b: &str| a.len() < b.len());
    assert!(by_len.less("ab", "abc"));
    assert!(by_len.equiv("ab", "cd"));
    assert_eq!(by_len.compare("abcd", "x"), Ordering::Greater);
}
