//! AVL-tree collections and a manually grown sequence for Rust.
//!
//! This crate provides:
//!
//! - [`AvlTree`] - a self-balancing binary search tree whose nodes live in an arena and
//!   are re-linked, never moved, by rotations
//! - [`AvlMap`] - an ordered map over an [`AvlTree`] with
//!   [`get_or_default`](AvlMap::get_or_default) and ordered enumeration
//! - [`Sequence`] - a contiguous sequence that grows its single heap block by doubling,
//!   with bounds-checked [`at`](Sequence::at) and random-access [`Cursor`]s
//! - [`algorithm`] - [`linear_search`](algorithm::linear_search) and
//!   [`quicksort`](algorithm::quicksort) over any [`RandomAccess`](algorithm::RandomAccess)
//!   container
//!
//! # Example
//!
//! ```
//! use avl_collections::{AvlMap, Sequence, algorithm};
//!
//! let mut scores = AvlMap::new();
//! *scores.get_or_default("Math") = 90;
//! *scores.get_or_default("Science") = 85;
//! assert!(scores.contains("Math"));
//! assert_eq!(*scores.get_or_default("Art"), 0);
//!
//! let mut values = Sequence::from([3, 1, 2]);
//! let (first, last) = (values.begin(), values.end());
//! algorithm::quicksort(&mut values, first, last);
//! assert_eq!(values.as_slice(), &[1, 2, 3]);
//! assert!(values.at(3).is_err());
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`
//! - **O(log n) insert and lookup** - Heights are cached per node and every insertion
//!   rebalances its path
//! - **Explicit growth** - [`Sequence`] capacity goes 0, 2, 4, 8, ... and reallocation is
//!   logged through `tracing`
//!
//! # Logging
//!
//! Rotations are emitted as `trace` events on the `avl_collections::tree` target and
//! sequence reallocations as `debug` events on `avl_collections::sequence`. No subscriber
//! is installed by the crate.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
// NOTE: `Sequence` manages its own uninitialised block, which needs unsafe code.
// #![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod raw;

pub mod algorithm;
pub mod avl_map;
pub mod avl_tree;
pub mod sequence;

pub use avl_map::AvlMap;
pub use avl_tree::AvlTree;
pub use error::OutOfRange;
pub use sequence::{Cursor, Sequence};
