//! Core HTML tokenizing primitives
//!
//! This module contains the building blocks the tree builder consumes:
//! - Scanner: SIMD-accelerated delimiter detection using memchr
//! - Tokenizer: pull-style HTML token extraction
//! - Entities: character reference decoding with Cow (zero-copy when possible)
//! - Attributes: attribute parsing and extraction
//! - Tags: the `Tag` enumeration and `TagSet` bitset

pub mod attributes;
pub mod entities;
pub mod scanner;
pub mod tags;
pub mod tokenizer;
