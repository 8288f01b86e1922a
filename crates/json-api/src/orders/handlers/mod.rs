//! Order Handlers

pub(crate) mod all;
pub(crate) mod cancel;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod status;
