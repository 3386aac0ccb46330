pub(crate) mod components;
pub(crate) mod generator;
pub(crate) mod js;
pub(crate) mod runtime;
pub(crate) mod script;
