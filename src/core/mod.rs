//! Core types and traits for the aggregation engine.

mod error;
mod extractor;
mod file_set;
mod record;

pub use error::{Error, Result};
pub use extractor::FactExtractor;
pub use file_set::FileSet;
pub use record::{
    BuiltinOverride, CallKind, ConstantInfo, CrossFileCall, DeclScope, ExternalResource,
    GroupInfo, MethodInfo, NodeReference, ObjectMethodCall, PropertyInfo, SignalConnection,
    SignalInfo, StructuralRecord, Visibility,
};
