//! Object-declaration literals: `name(arg0,arg1,...)` functor expressions.

pub mod tokenizer;

pub use tokenizer::{compose, tokenize};
