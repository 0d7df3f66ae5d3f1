pub mod canonical;
pub mod error;
pub mod member;

pub use canonical::CanonicalType;
pub use error::{DocweaveError, Result};
pub use member::{
    AccessMode, ComponentCategory, Member, ParamKind, ParamRecord, PortUsage, SourceKind,
};
