//! Rust code generation modules.

pub mod adapters;
pub mod encoders;
pub mod records;
pub mod types;

pub use adapters::{AdapterGenerator, FieldRepr, ReprKind};
pub use encoders::EncoderGenerator;
pub use records::RecordGenerator;
pub use types::TypeExpr;
