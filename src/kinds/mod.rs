//! The concrete processor kinds and their static constructor table.
//!
//! Adding a kind means adding a variant to [`Kind`], a module here, and a
//! constructor arm below. Nothing is discovered at runtime.

use std::sync::Arc;

use crate::{Kind, ProcessorRef};

mod currency;
mod empty;
mod float;
mod integer;
mod number;
mod untyped;
mod words;


pub(crate) fn construct(kind: Kind) -> ProcessorRef {
    match kind {
        Kind::Empty => Arc::new(empty::EmptyValue),
        Kind::Untyped => Arc::new(untyped::UntypedValue::new()),
        Kind::Words => Arc::new(words::WordsValue::new()),
        Kind::Integer => Arc::new(integer::IntegerValue::new()),
        Kind::Float => Arc::new(float::FloatValue::new()),
        Kind::Currency => Arc::new(currency::CurrencyValue::new()),
    }
}
