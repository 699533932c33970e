use url::Url;
use url::form_urlencoded;

use crate::config::TOKEN_QUERY_PARAM;

use super::storage::SessionStorage;
use super::token_store::TokenStore;

/// The slice of the browser's history API the sync step needs.
pub trait BrowserHistory {
    /// Current location as path, query and fragment (e.g. `/?token=abc`).
    fn current_location(&self) -> String;

    /// Swap the visible location without navigating or adding a history entry.
    fn replace(&mut self, location: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// A token arrived on the redirect and was moved into the store.
    Claimed,
    /// No token on the URL; the store was initialised from session storage.
    Restored,
}

/// Run once per page load after the callback redirect.
///
/// If the location carries the one-shot token parameter, the token is stored
/// and the parameter removed via `history.replace`. Otherwise the store is
/// initialised from session storage. Running it again after the parameter
/// was consumed is harmless.
pub fn sync_token_from_location<S, H>(store: &TokenStore<S>, history: &mut H) -> SyncOutcome
where
    S: SessionStorage,
    H: BrowserHistory,
{
    let location = history.current_location();
    let Some((token, cleaned)) = take_token_param(&location) else {
        store.init();
        return SyncOutcome::Restored;
    };

    history.replace(&cleaned);

    if token.is_empty() {
        store.init();
        return SyncOutcome::Restored;
    }

    store.set_token(&token);
    tracing::debug!("Auth token moved from redirect into the client store");
    SyncOutcome::Claimed
}

/// Split the token parameter off `location`, returning it and the location
/// without it. `None` when there is no such parameter.
fn take_token_param(location: &str) -> Option<(String, String)> {
    // Any absolute base works; only path, query and fragment are kept.
    let base = Url::parse("http://localhost/").ok()?;
    let url = base.join(location).ok()?;

    let mut token = None;
    let mut remaining = form_urlencoded::Serializer::new(String::new());
    let mut kept = 0;
    for (key, value) in url.query_pairs() {
        if key == TOKEN_QUERY_PARAM && token.is_none() {
            token = Some(value.into_owned());
        } else if key != TOKEN_QUERY_PARAM {
            remaining.append_pair(&key, &value);
            kept += 1;
        }
    }
    let token = token?;

    let mut cleaned = url.path().to_string();
    if kept > 0 {
        cleaned.push('?');
        cleaned.push_str(&remaining.finish());
    }
    if let Some(fragment) = url.fragment() {
        cleaned.push('#');
        cleaned.push_str(fragment);
    }
    Some((token, cleaned))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemorySessionStorage, UnavailableStorage};

    #[derive(Default)]
    struct FakeHistory {
        location: String,
        replaced: Vec<String>,
    }

    impl FakeHistory {
        fn at(location: &str) -> Self {
            Self {
                location: location.to_string(),
                replaced: Vec::new(),
            }
        }
    }

    impl BrowserHistory for FakeHistory {
        fn current_location(&self) -> String {
            self.location.clone()
        }

        fn replace(&mut self, location: &str) {
            self.location = location.to_string();
            self.replaced.push(location.to_string());
        }
    }

    #[test]
    fn test_claims_token_and_cleans_url() {
        let store = TokenStore::new(MemorySessionStorage::new());
        let mut history = FakeHistory::at("/?token=a%2Bb%2Fc%3Dd");

        let outcome = sync_token_from_location(&store, &mut history);

        assert_eq!(outcome, SyncOutcome::Claimed);
        assert_eq!(store.get_token().as_deref(), Some("a+b/c=d"));
        assert_eq!(history.replaced, vec!["/".to_string()]);
    }

    #[test]
    fn test_keeps_other_params_and_fragment() {
        let store = TokenStore::new(MemorySessionStorage::new());
        let mut history = FakeHistory::at("/dashboard?tab=2&token=t0k&x=y#top");

        sync_token_from_location(&store, &mut history);

        assert_eq!(history.location, "/dashboard?tab=2&x=y#top");
        assert_eq!(store.get_token().as_deref(), Some("t0k"));
    }

    #[test]
    fn test_without_param_initialises_from_storage() {
        let storage = MemorySessionStorage::new();
        storage.set_item("access_token", "earlier").unwrap();
        let store = TokenStore::new(storage);
        let mut history = FakeHistory::at("/");

        let outcome = sync_token_from_location(&store, &mut history);

        assert_eq!(outcome, SyncOutcome::Restored);
        assert!(history.replaced.is_empty());
        assert_eq!(store.get_token().as_deref(), Some("earlier"));
    }

    #[test]
    fn test_second_mount_is_idempotent() {
        let store = TokenStore::new(MemorySessionStorage::new());
        let mut history = FakeHistory::at("/?token=once");

        assert_eq!(
            sync_token_from_location(&store, &mut history),
            SyncOutcome::Claimed
        );
        assert_eq!(
            sync_token_from_location(&store, &mut history),
            SyncOutcome::Restored
        );

        assert_eq!(store.get_token().as_deref(), Some("once"));
        assert_eq!(history.replaced.len(), 1);
    }

    #[test]
    fn test_second_mount_without_storage_keeps_claimed_token() {
        let store = TokenStore::new(UnavailableStorage);
        let mut history = FakeHistory::at("/?token=once");

        assert_eq!(
            sync_token_from_location(&store, &mut history),
            SyncOutcome::Claimed
        );
        assert_eq!(store.get_token().as_deref(), Some("once"));

        assert_eq!(
            sync_token_from_location(&store, &mut history),
            SyncOutcome::Restored
        );
        assert_eq!(store.get_token().as_deref(), Some("once"));
        assert_eq!(history.location, "/");
    }

    #[test]
    fn test_empty_token_param_is_stripped_not_stored() {
        let store = TokenStore::new(MemorySessionStorage::new());
        let mut history = FakeHistory::at("/?token=");

        let outcome = sync_token_from_location(&store, &mut history);

        assert_eq!(outcome, SyncOutcome::Restored);
        assert_eq!(history.location, "/");
        assert_eq!(store.get_token(), None);
    }
}
