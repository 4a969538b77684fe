mod builtin;
pub mod eval;

pub use builtin::SUPPORTED_FUNCTIONS;
