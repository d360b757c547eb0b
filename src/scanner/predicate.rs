// src/scanner/predicate.rs
use crate::record::TraceHeader;

/// Caller policy deciding whether a valid record belongs in the index.
///
/// Any `Fn(&TraceHeader) -> bool` closure is a predicate; captured state plays the role
/// of the predicate's context.
pub trait AcceptRecord {
    fn accept(&self, header: &TraceHeader) -> bool;
}

impl<F> AcceptRecord for F
where
    F: Fn(&TraceHeader) -> bool,
{
    fn accept(&self, header: &TraceHeader) -> bool {
        self(header)
    }
}
