//! Application runtime composition modules.

pub(crate) mod console;
pub(crate) mod runtime;
pub(crate) mod terminal;
pub(crate) mod validation;
