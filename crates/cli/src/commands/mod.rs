pub(crate) mod actions;
pub(crate) mod assistant;
pub(crate) mod delegations;
pub(crate) mod prefs;
pub(crate) mod services;
pub(crate) mod stats;
pub(crate) mod validate;
