pub(crate) mod error;
pub(crate) mod slr;
pub(crate) mod table;
