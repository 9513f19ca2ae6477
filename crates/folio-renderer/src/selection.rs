//! Selector group selection state.
//!
//! A [`SelectionStore`] maps selection keys (`queryGroupKey`s such as
//! `"language"`) to panel ids. It belongs to a rendering session: one reader's
//! browsing context, or one site build.
//!
//! A [`SelectorSession`] drives the groups rendered in that session. Each
//! registered group resolves its active panel from the store, and selecting a
//! panel in one group propagates to every other group sharing its key that
//! declares a panel with the same id.

use std::collections::BTreeMap;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::{Lint, LintKind, SelectorGroup};

/// Characters left unescaped in query strings.
const QUERY_UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Persisted selections keyed by selection key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SelectionStore {
    selections: BTreeMap<String, String>,
}

impl SelectionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store from a URL query string such as `language=dart&auth-store=keychain`.
    ///
    /// A leading `?` is ignored, `+` decodes to a space, and pairs without a
    /// value or with an empty key are skipped. Later pairs win.
    ///
    /// ```
    /// use folio_renderer::SelectionStore;
    ///
    /// let store = SelectionStore::from_query("?language=dart&platform=mac%20os");
    /// assert_eq!(store.get("language"), Some("dart"));
    /// assert_eq!(store.get("platform"), Some("mac os"));
    /// ```
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut store = Self::new();

        for pair in query.split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            let key = decode_component(key);
            let value = decode_component(value);
            if !key.is_empty() && !value.is_empty() {
                store.selections.insert(key, value);
            }
        }

        store
    }

    /// Encode the store as a URL query string (without the leading `?`).
    #[must_use]
    pub fn to_query(&self) -> String {
        self.selections
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(key, QUERY_UNRESERVED),
                    utf8_percent_encode(value, QUERY_UNRESERVED)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Stored panel id for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.selections.get(key).map(String::as_str)
    }

    /// Record a selection. Returns `true` if the stored value changed.
    pub fn set(&mut self, key: impl Into<String>, panel_id: impl Into<String>) -> bool {
        let panel_id = panel_id.into();
        let key = key.into();
        if self.get(&key) == Some(panel_id.as_str()) {
            return false;
        }
        self.selections.insert(key, panel_id);
        true
    }

    /// Forget the selection for a key.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.selections.remove(key)
    }

    /// Iterate over `(key, panel_id)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.selections
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SelectionStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            selections: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

fn decode_component(s: &str) -> String {
    let spaced = s.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Handle to a group registered with a [`SelectorSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GroupId(usize);

impl GroupId {
    /// Registration order within the session (0-based).
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Error returned by [`SelectorSession::select`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    /// The group handle does not belong to this session.
    #[error("unknown selector group #{0}")]
    UnknownGroup(usize),
    /// The group has no panel with the requested id.
    #[error("selector group has no panel '{0}'")]
    UnknownPanel(String),
}

/// Selection state of one registered group.
#[derive(Debug)]
struct GroupState {
    key: Option<String>,
    panel_ids: Vec<String>,
    active: Option<usize>,
}

impl GroupState {
    fn position(&self, panel_id: &str) -> Option<usize> {
        self.panel_ids.iter().position(|id| id == panel_id)
    }
}

/// Selection controller for the selector groups of one rendering session.
///
/// # Example
///
/// ```
/// use folio_renderer::{Panel, SelectionStore, SelectorGroup, SelectorSession};
///
/// let group = |ids: &[&str]| SelectorGroup {
///     key: Some("language".to_owned()),
///     default_panel: None,
///     panels: ids.iter().map(|id| Panel::new(*id, *id, Vec::new())).collect(),
/// };
///
/// let mut session = SelectorSession::new(SelectionStore::new());
/// let web = session.register(&group(&["js", "dart"]));
/// let mobile = session.register(&group(&["js", "kotlin"]));
///
/// session.select(web, "dart").unwrap();
/// assert_eq!(session.active(web), Some("dart"));
/// assert_eq!(session.active(mobile), Some("js"));
/// assert_eq!(session.store().get("language"), Some("dart"));
/// ```
#[derive(Debug, Default)]
pub struct SelectorSession {
    store: SelectionStore,
    groups: Vec<GroupState>,
    lints: Vec<Lint>,
}

impl SelectorSession {
    /// Create a session over a selection store.
    #[must_use]
    pub fn new(store: SelectionStore) -> Self {
        Self {
            store,
            groups: Vec::new(),
            lints: Vec::new(),
        }
    }

    /// Register a group and resolve its initial panel.
    ///
    /// Resolution order:
    /// 1. the stored selection for the group's key, if this group declares it;
    /// 2. the group's default panel;
    /// 3. the first declared panel (with a lint when the default was unknown).
    ///
    /// Empty groups register with no active panel. Registration never writes
    /// to the store.
    pub fn register(&mut self, group: &SelectorGroup) -> GroupId {
        let mut panel_ids: Vec<String> = Vec::with_capacity(group.panels.len());
        for panel in &group.panels {
            if !panel_ids.contains(&panel.id) {
                panel_ids.push(panel.id.clone());
            }
        }

        let mut state = GroupState {
            key: group.key.clone(),
            panel_ids,
            active: None,
        };

        if state.panel_ids.is_empty() {
            self.lints.push(Lint::new(
                LintKind::EmptySelectorGroup,
                format!("selector group{} declares no panels", describe_key(group)),
            ));
        } else {
            state.active = Some(self.initial_panel(&state, group));
        }

        let id = GroupId(self.groups.len());
        self.groups.push(state);
        id
    }

    fn initial_panel(&mut self, state: &GroupState, group: &SelectorGroup) -> usize {
        let stored = state
            .key
            .as_deref()
            .and_then(|key| self.store.get(key))
            .and_then(|panel_id| state.position(panel_id));
        if let Some(idx) = stored {
            return idx;
        }

        match group.default_panel.as_deref() {
            Some(default) => state.position(default).unwrap_or_else(|| {
                self.lints.push(Lint::new(
                    LintKind::UnknownDefaultPanel,
                    format!(
                        "selector group{} default panel '{default}' is not declared; using '{}'",
                        describe_key(group),
                        state.panel_ids[0]
                    ),
                ));
                0
            }),
            None => 0,
        }
    }

    /// Select a panel in a group.
    ///
    /// Makes `panel_id` active, records it in the store under the group's key,
    /// and switches every other group with the same key that declares a panel
    /// with that id. Groups without the id keep their current panel.
    ///
    /// Returns `Ok(false)` without touching any state when the panel is already
    /// active or the group is empty.
    ///
    /// This holds even when the active panel came from the group's default
    /// while the store names another panel: re-selecting it neither writes
    /// the store nor switches other groups. Select a different panel first to
    /// broadcast.
    pub fn select(&mut self, group: GroupId, panel_id: &str) -> Result<bool, SelectError> {
        let state = self
            .groups
            .get_mut(group.0)
            .ok_or(SelectError::UnknownGroup(group.0))?;

        if state.panel_ids.is_empty() {
            return Ok(false);
        }

        let idx = state
            .position(panel_id)
            .ok_or_else(|| SelectError::UnknownPanel(panel_id.to_owned()))?;

        if state.active == Some(idx) {
            return Ok(false);
        }
        state.active = Some(idx);

        let Some(key) = state.key.clone() else {
            return Ok(true);
        };

        self.store.set(key.as_str(), panel_id);

        for (other_idx, other) in self.groups.iter_mut().enumerate() {
            if other_idx == group.0 || other.key.as_deref() != Some(key.as_str()) {
                continue;
            }
            if let Some(pos) = other.position(panel_id) {
                other.active = Some(pos);
            }
        }

        Ok(true)
    }

    /// Active panel id of a group, or `None` for empty or unknown groups.
    #[must_use]
    pub fn active(&self, group: GroupId) -> Option<&str> {
        let state = self.groups.get(group.0)?;
        state.active.map(|idx| state.panel_ids[idx].as_str())
    }

    /// Selection key of a registered group.
    #[must_use]
    pub fn key(&self, group: GroupId) -> Option<&str> {
        self.groups.get(group.0)?.key.as_deref()
    }

    /// Handles of all registered groups, in registration order.
    pub fn groups(&self) -> impl Iterator<Item = GroupId> + use<> {
        (0..self.groups.len()).map(GroupId)
    }

    /// The session's selection store.
    #[must_use]
    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    /// Consume the session, returning the store for use by later sessions.
    #[must_use]
    pub fn into_store(self) -> SelectionStore {
        self.store
    }

    /// Lints recorded since the last call to [`take_lints`](Self::take_lints).
    #[must_use]
    pub fn lints(&self) -> &[Lint] {
        &self.lints
    }

    /// Drain recorded lints.
    pub fn take_lints(&mut self) -> Vec<Lint> {
        std::mem::take(&mut self.lints)
    }
}

fn describe_key(group: &SelectorGroup) -> String {
    group
        .key
        .as_deref()
        .map(|key| format!(" '{key}'"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::Panel;

    fn group(key: Option<&str>, default: Option<&str>, ids: &[&str]) -> SelectorGroup {
        SelectorGroup {
            key: key.map(str::to_owned),
            default_panel: default.map(str::to_owned),
            panels: ids
                .iter()
                .map(|id| Panel::new(*id, id.to_uppercase(), Vec::new()))
                .collect(),
        }
    }

    fn language(ids: &[&str]) -> SelectorGroup {
        group(Some("language"), None, ids)
    }

    #[test]
    fn test_initial_uses_default() {
        let mut session = SelectorSession::default();
        let id = session.register(&group(Some("language"), Some("dart"), &["js", "dart"]));

        assert_eq!(session.active(id), Some("dart"));
        assert!(session.lints().is_empty());
    }

    #[test]
    fn test_initial_without_default_uses_first() {
        let mut session = SelectorSession::default();
        let id = session.register(&language(&["js", "dart"]));

        assert_eq!(session.active(id), Some("js"));
        assert!(session.lints().is_empty());
    }

    #[test]
    fn test_initial_adopts_stored_selection() {
        let store: SelectionStore = [("language", "dart")].into_iter().collect();
        let mut session = SelectorSession::new(store);
        let id = session.register(&group(Some("language"), Some("js"), &["js", "dart"]));

        assert_eq!(session.active(id), Some("dart"));
    }

    #[test]
    fn test_stale_stored_selection_falls_back_silently() {
        let store: SelectionStore = [("language", "swift")].into_iter().collect();
        let mut session = SelectorSession::new(store);
        let id = session.register(&group(Some("language"), Some("dart"), &["js", "dart"]));

        assert_eq!(session.active(id), Some("dart"));
        assert!(session.lints().is_empty());
        assert_eq!(session.store().get("language"), Some("swift"));
    }

    #[test]
    fn test_unknown_default_falls_back_to_first_declared() {
        let mut session = SelectorSession::default();
        let id = session.register(&group(None, Some("x"), &["a", "b"]));

        assert_eq!(session.active(id), Some("a"));
        assert_eq!(session.lints().len(), 1);
        assert_eq!(session.lints()[0].kind, LintKind::UnknownDefaultPanel);
    }

    #[test]
    fn test_exactly_one_active_panel_after_register() {
        let groups = [
            group(Some("language"), Some("b"), &["a", "b", "c"]),
            group(None, Some("zzz"), &["a"]),
            group(Some("other"), None, &["c", "a"]),
        ];
        let store: SelectionStore = [("language", "c")].into_iter().collect();
        let mut session = SelectorSession::new(store);

        for g in &groups {
            let id = session.register(g);
            let active = session.active(id).unwrap();
            assert!(g.contains(active));
        }
    }

    #[test]
    fn test_empty_group() {
        let mut session = SelectorSession::default();
        let id = session.register(&language(&[]));

        assert_eq!(session.active(id), None);
        assert_eq!(session.select(id, "js"), Ok(false));
        assert!(session.store().is_empty());
        assert_eq!(session.lints()[0].kind, LintKind::EmptySelectorGroup);
    }

    #[test]
    fn test_select_writes_store() {
        let mut session = SelectorSession::default();
        let id = session.register(&language(&["js", "dart"]));

        assert_eq!(session.select(id, "dart"), Ok(true));
        assert_eq!(session.active(id), Some("dart"));
        assert_eq!(session.store().get("language"), Some("dart"));
    }

    #[test]
    fn test_select_active_panel_is_idempotent() {
        let store: SelectionStore = [("language", "js")].into_iter().collect();
        let mut session = SelectorSession::new(store.clone());
        let id = session.register(&language(&["js", "dart"]));

        assert_eq!(session.select(id, "js"), Ok(false));
        assert_eq!(session.active(id), Some("js"));
        assert_eq!(session.store(), &store);
    }

    #[test]
    fn test_reselecting_default_panel_does_not_broadcast() {
        let store: SelectionStore = [("language", "kotlin")].into_iter().collect();
        let mut session = SelectorSession::new(store);
        let web = session.register(&group(Some("language"), Some("dart"), &["js", "dart"]));
        let mobile = session.register(&language(&["kotlin", "dart"]));

        assert_eq!(session.select(web, "dart"), Ok(false));
        assert_eq!(session.store().get("language"), Some("kotlin"));
        assert_eq!(session.active(mobile), Some("kotlin"));

        assert_eq!(session.select(web, "js"), Ok(true));
        assert_eq!(session.select(web, "dart"), Ok(true));
        assert_eq!(session.store().get("language"), Some("dart"));
        assert_eq!(session.active(mobile), Some("dart"));
    }

    #[test]
    fn test_cross_group_sync() {
        let mut session = SelectorSession::default();
        let g1 = session.register(&group(Some("language"), Some("dart"), &["js", "dart"]));
        let g2 = session.register(&group(Some("language"), Some("kotlin"), &["js", "kotlin"]));

        session.select(g1, "js").unwrap();
        assert_eq!(session.active(g2), Some("js"));

        session.select(g1, "dart").unwrap();
        assert_eq!(session.active(g1), Some("dart"));
        assert_eq!(session.active(g2), Some("js"));
        assert_eq!(session.store().get("language"), Some("dart"));
    }

    #[test]
    fn test_sync_ignores_other_keys_and_keyless_groups() {
        let mut session = SelectorSession::default();
        let g1 = session.register(&language(&["js", "dart"]));
        let other = session.register(&group(Some("auth-store"), None, &["memory", "js"]));
        let keyless = session.register(&group(None, None, &["dart", "js"]));

        session.select(g1, "dart").unwrap();
        session.select(g1, "js").unwrap();

        assert_eq!(session.active(other), Some("memory"));
        assert_eq!(session.active(keyless), Some("dart"));
    }

    #[test]
    fn test_keyless_group_does_not_touch_store() {
        let mut session = SelectorSession::default();
        let id = session.register(&group(None, None, &["a", "b"]));

        assert_eq!(session.select(id, "b"), Ok(true));
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_select_unknown_panel_is_rejected() {
        let mut session = SelectorSession::default();
        let id = session.register(&language(&["js", "dart"]));

        assert_eq!(
            session.select(id, "JS"),
            Err(SelectError::UnknownPanel("JS".to_owned()))
        );
        assert_eq!(session.active(id), Some("js"));
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_select_unknown_group() {
        let mut session = SelectorSession::default();
        assert_eq!(
            session.select(GroupId(3), "js"),
            Err(SelectError::UnknownGroup(3))
        );
    }

    #[test]
    fn test_duplicate_ids_resolve_to_first() {
        let mut session = SelectorSession::default();
        let id = session.register(&language(&["js", "dart", "js"]));

        session.select(id, "dart").unwrap();
        session.select(id, "js").unwrap();
        assert_eq!(session.active(id), Some("js"));
    }

    #[test]
    fn test_store_carries_across_sessions() {
        let mut first = SelectorSession::default();
        let id = first.register(&language(&["js", "dart"]));
        first.select(id, "dart").unwrap();

        let mut second = SelectorSession::new(first.into_store());
        let id = second.register(&language(&["kotlin", "dart"]));
        assert_eq!(second.active(id), Some("dart"));
    }

    #[test]
    fn test_take_lints_drains() {
        let mut session = SelectorSession::default();
        session.register(&language(&[]));

        assert_eq!(session.take_lints().len(), 1);
        assert!(session.lints().is_empty());
    }

    #[test]
    fn test_query_round_trip_escapes() {
        let store: SelectionStore = [("auth-store", "key chain"), ("language", "c#")]
            .into_iter()
            .collect();

        assert_eq!(store.to_query(), "auth-store=key%20chain&language=c%23");
        assert_eq!(SelectionStore::from_query(&store.to_query()), store);
    }

    #[test]
    fn test_from_query_skips_malformed_pairs() {
        let store =
            SelectionStore::from_query("language=js&flag&=x&empty=&platform=mac+os&language=dart");

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("language"), Some("dart"));
        assert_eq!(store.get("platform"), Some("mac os"));
    }

    #[test]
    fn test_set_reports_change() {
        let mut store = SelectionStore::new();
        assert!(store.set("language", "js"));
        assert!(!store.set("language", "js"));
        assert!(store.set("language", "dart"));
        assert_eq!(store.remove("language").as_deref(), Some("dart"));
    }
}
