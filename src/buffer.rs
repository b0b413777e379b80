// src/buffer.rs

//! Bounded most-recent-first buffer.
//!
//! Keeps the `capacity` most recently inserted elements. Inserting into a
//! full buffer drops the oldest element first. Iteration runs newest to
//! oldest.

use std::collections::VecDeque;
use std::collections::vec_deque;

use crate::error::{AppError, Result};

/// A deque that keeps at most `capacity` elements, newest at the front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecencyBuffer<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> RecencyBuffer<T> {
    /// Create an empty buffer holding at most `capacity` elements.
    ///
    /// Fails with [`AppError::InvalidCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity < 1 {
            return Err(AppError::InvalidCapacity { capacity });
        }
        Ok(Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Insert `item` as the newest element.
    ///
    /// Returns the evicted oldest element when the buffer was already full.
    pub fn insert(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() >= self.capacity {
            self.items.pop_back()
        } else {
            None
        };
        self.items.push_front(item);
        evicted
    }

    /// Iterate from newest to oldest.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.items.iter(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The most recently inserted element.
    pub fn newest(&self) -> Option<&T> {
        self.items.front()
    }

    /// The oldest element still retained.
    pub fn oldest(&self) -> Option<&T> {
        self.items.back()
    }
}

impl<T: Clone> RecencyBuffer<T> {
    /// Copy the contents out, newest first.
    pub fn snapshot(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}

/// Borrowing iterator over a [`RecencyBuffer`], newest first.
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    inner: vec_deque::Iter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a RecencyBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for RecencyBuffer<T> {
    type Item = T;
    type IntoIter = vec_deque::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<T> Extend<T> for RecencyBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}
