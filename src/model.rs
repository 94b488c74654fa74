//! Typed records mirroring the Hotmart JSON payloads, plus the predicates and accessors that
//! operate on already-fetched data.

pub mod common;
pub mod page;
pub mod student;
pub mod subscription;

pub use common::*;
pub use page::*;
pub use student::*;
pub use subscription::*;
