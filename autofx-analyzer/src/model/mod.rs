//! Semantic model of an analysed package

pub mod function;
pub mod method;
pub mod package;
pub mod signature;
pub mod types;

pub use function::{Function, Visibility};
pub use method::{Method, MethodArena, MethodId, TypeId};
pub use package::Package;
pub use signature::{Parameter, Signature};
pub use types::{ConcreteType, InterfaceType};
