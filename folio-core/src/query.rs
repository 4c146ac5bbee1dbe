//! URL query state with change notification.

use std::borrow::Cow;

use log::debug;

/// Read/write access to URL query parameters.
pub trait QueryStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn clear(&mut self, key: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A key whose value changed, with the value now stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryChange {
    pub key: String,
    pub value: Option<String>,
}

type Listener = Box<dyn FnMut(&QueryChange)>;

/// In-memory query parameters, parsed from and serialized to a search string.
#[derive(Default)]
pub struct QueryState {
    pairs: Vec<(String, String)>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `?a=1&b=two%20words`. The leading `?` is optional; later
    /// duplicates of a key are dropped.
    pub fn parse(search: &str) -> Self {
        let mut state = Self::new();
        let search = search.strip_prefix('?').unwrap_or(search);
        for pair in search.split('&').filter(|pair| !pair.is_empty()) {
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode(raw_key);
            if key.is_empty() || state.position(&key).is_some() {
                continue;
            }
            state.pairs.push((key, decode(raw_value)));
        }
        state
    }

    pub fn to_query_string(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }
        let joined = self
            .pairs
            .iter()
            .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        format!("?{joined}")
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&QueryChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.pairs.iter().position(|(existing, _)| existing == key)
    }

    fn notify(&mut self, key: &str, value: Option<String>) {
        debug!("query {key} -> {value:?}");
        let change = QueryChange {
            key: key.to_string(),
            value,
        };
        for (_, listener) in self.listeners.iter_mut() {
            listener(&change);
        }
    }
}

impl QueryStore for QueryState {
    fn get(&self, key: &str) -> Option<String> {
        self.position(key).map(|index| self.pairs[index].1.clone())
    }

    fn set(&mut self, key: &str, value: &str) {
        match self.position(key) {
            Some(index) if self.pairs[index].1 == value => return,
            Some(index) => self.pairs[index].1 = value.to_string(),
            None => self.pairs.push((key.to_string(), value.to_string())),
        }
        self.notify(key, Some(value.to_string()));
    }

    fn clear(&mut self, key: &str) {
        let Some(index) = self.position(key) else {
            return;
        };
        self.pairs.remove(index);
        self.notify(key, None);
    }
}

fn decode(raw: &str) -> String {
    let spaced: Cow<'_, str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    urlencoding::decode(&spaced)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| spaced.to_string())
}
