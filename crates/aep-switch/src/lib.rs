//! aep-switch
//!
//! Per-app exploit-protection switch resolution.
//!
//! Given a switch, a user, an app and the app's package state, compute:
//! - the effective value
//! - whether it is the process-wide default or an explicit override
//! - if the user cannot change it, why
//!
//! Deterministic, pure logic. No IO, no clock, no global state: the default
//! store and the device capabilities are passed in by the caller.

mod engine;
mod store;
mod table;
mod types;

pub use engine::{
    default_value, find_immutability, is_supported, resolve, resolve_for_package, resolve_many,
};
pub use store::{DefaultStore, InMemoryDefaultStore, InMemoryOverrideStore, OverrideStore};
pub use table::{
    switch_def, switch_for_setting, DefaultSettingId, HardwareGate, Polarity, Predicate,
    SettingScope, SwitchDef,
};
pub use types::*;
