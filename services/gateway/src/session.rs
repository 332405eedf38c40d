use dashmap::DashMap;
use types::account::Account;
use types::ids::SessionId;

/// In-memory session → selected account bindings
///
/// Last write wins. Entries live until the process exits.
// TODO: bound growth with an idle-TTL sweep once session lifetimes are agreed with the frontend.
pub struct SessionStore {
    selections: DashMap<SessionId, Account>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            selections: DashMap::new(),
        }
    }

    pub fn put(&self, session: SessionId, account: Account) {
        self.selections.insert(session, account);
    }

    pub fn get(&self, session: &SessionId) -> Option<Account> {
        self.selections.get(session).map(|entry| entry.value().clone())
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.selections.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
