//! Truncating a result stream.

use std::iter::Take;

/// Iterator returned by [`limit`] and [`LimitExt::limit`].
///
/// Pulls at most `n` items from the inner iterator and never asks it for
/// more once the limit is reached.
#[derive(Debug, Clone)]
pub struct Limit<I> {
    inner: Inner<I>,
}

#[derive(Debug, Clone)]
enum Inner<I> {
    All(I),
    First(Take<I>),
}

/// Cap `iter` at `n` items.
///
/// `None` or `Some(0)` passes everything through unchanged.
pub fn limit<I: IntoIterator>(iter: I, n: Option<usize>) -> Limit<I::IntoIter> {
    let iter = iter.into_iter();
    let inner = match n {
        Some(n) if n > 0 => Inner::First(iter.take(n)),
        _ => Inner::All(iter),
    };
    Limit { inner }
}

impl<I: Iterator> Iterator for Limit<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        match &mut self.inner {
            Inner::All(iter) => iter.next(),
            Inner::First(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Inner::All(iter) => iter.size_hint(),
            Inner::First(iter) => iter.size_hint(),
        }
    }
}

pub trait LimitExt: Iterator + Sized {
    fn limit(self, n: Option<usize>) -> Limit<Self> {
        limit(self, n)
    }
}

impl<I: Iterator> LimitExt for I {}
