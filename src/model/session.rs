use crate::model::Transaction;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};

/// Who is signed in, and the bearer token used to talk to the wallet API.
///
/// The session is passed explicitly to whatever needs it. The transaction cache holds the list
/// the server last returned from a delete; it is never written to disk.
#[derive(Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Session {
    name: String,
    email: String,
    token: String,
    #[serde(skip)]
    transactions: Vec<Transaction>,
}

impl Session {
    pub fn new(name: impl Into<String>, email: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            token: token.into(),
            transactions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// True when there is no token to authenticate with.
    pub fn is_signed_out(&self) -> bool {
        self.token.is_empty()
    }

    pub(crate) fn set_transactions(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
    }

    /// Forgets the identity, the token and the cached transactions.
    pub(crate) fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.token.clear();
        self.transactions.clear();
    }
}

impl Debug for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("token", &"<redacted>")
            .field("transactions", &self.transactions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, TransactionType};

    #[test]
    fn test_clear() {
        let mut session = Session::new("Ana", "ana@example.com", "abc123");
        session.set_transactions(vec![Transaction::new(
            "1",
            TransactionType::Income,
            Amount::default(),
            "",
            "",
        )]);
        assert!(!session.is_signed_out());
        session.clear();
        assert_eq!(session, Session::default());
        assert!(session.is_signed_out());
    }

    #[test]
    fn test_debug_hides_token() {
        let session = Session::new("Ana", "ana@example.com", "super-secret");
        let debug = format!("{session:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("Ana"));
    }

    #[test]
    fn test_transactions_are_not_serialized() {
        let mut session = Session::new("Ana", "ana@example.com", "t");
        session.set_transactions(vec![Transaction::default()]);
        let json = serde_json::to_string(&session).unwrap();
        assert!(!json.contains("transactions"));
        let back: Session = serde_json::from_str(&json).unwrap();
        assert!(back.transactions().is_empty());
    }
}
