//! Stores the resolver reads from.
//!
//! Both are passed in explicitly; there is no ambient/global state. The
//! in-memory implementations are what the CLI and the scenario tests use.

use crate::{DefaultSettingId, PackageState, SettingScope, UserId};
use std::collections::BTreeMap;

/// Per-(package, user) package state, mutated by the app-info screen.
pub trait OverrideStore {
    fn get(&self, package: &str, user: UserId) -> Option<PackageState>;

    /// Apply `f` to the (possibly fresh) state and store the result.
    fn edit(&mut self, package: &str, user: UserId, f: &mut dyn FnMut(&mut PackageState));
}

/// Process-wide default settings.
pub trait DefaultStore {
    fn get(&self, setting: DefaultSettingId, user: UserId) -> bool;
    fn set(&mut self, setting: DefaultSettingId, user: UserId, value: bool);
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InMemoryOverrideStore {
    states: BTreeMap<(String, UserId), PackageState>,
}

impl InMemoryOverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl OverrideStore for InMemoryOverrideStore {
    fn get(&self, package: &str, user: UserId) -> Option<PackageState> {
        self.states.get(&(package.to_string(), user)).cloned()
    }

    fn edit(&mut self, package: &str, user: UserId, f: &mut dyn FnMut(&mut PackageState)) {
        let key = (package.to_string(), user);
        let mut st = self.states.remove(&key).unwrap_or_default();
        f(&mut st);
        // Keep the map minimal: an all-default record is the same as no record.
        if !st.is_empty() {
            self.states.insert(key, st);
        }
    }
}

/// Global settings are keyed with `None`, per-user settings with the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InMemoryDefaultStore {
    values: BTreeMap<(DefaultSettingId, Option<UserId>), bool>,
}

impl InMemoryDefaultStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(setting: DefaultSettingId, user: UserId) -> (DefaultSettingId, Option<UserId>) {
        match setting.scope() {
            SettingScope::Global => (setting, None),
            SettingScope::PerUser => (setting, Some(user)),
        }
    }

    /// True if the setting has been written for this scope.
    pub fn is_set(&self, setting: DefaultSettingId, user: UserId) -> bool {
        self.values.contains_key(&Self::key(setting, user))
    }
}

impl DefaultStore for InMemoryDefaultStore {
    fn get(&self, setting: DefaultSettingId, user: UserId) -> bool {
        self.values
            .get(&Self::key(setting, user))
            .copied()
            .unwrap_or_else(|| setting.fallback())
    }

    fn set(&mut self, setting: DefaultSettingId, user: UserId, value: bool) {
        self.values.insert(Self::key(setting, user), value);
    }
}
