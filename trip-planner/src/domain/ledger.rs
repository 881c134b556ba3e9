//! Per-stop expense ledgers.
//!
//! Each stop keeps an itemized list of what was actually spent there.
//! Lines are append-only values: the only way to change one is to remove
//! it and add a replacement. A ledger also holds at most one staged
//! draft, the name/amount pair being composed before it is committed.

use serde::Serialize;

/// One itemized expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseLine {
    name: String,
    amount: u64,
}

impl ExpenseLine {
    /// Returns the expense name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the amount spent.
    pub fn amount(&self) -> u64 {
        self.amount
    }
}

/// A staged, not yet committed expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseDraft {
    pub name: String,
    pub amount: u64,
}

/// The itemized expenses of a single stop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExpenseLedger {
    lines: Vec<ExpenseLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    draft: Option<ExpenseDraft>,
}

impl ExpenseLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an expense line.
    ///
    /// Blank names and zero amounts are ignored, as is any amount that
    /// would push the total past `u64::MAX`. A successful add clears any
    /// staged draft. Returns whether a line was appended.
    ///
    /// ```
    /// use trip_planner::domain::ExpenseLedger;
    ///
    /// let mut ledger = ExpenseLedger::new();
    /// assert!(ledger.add("Matcha", 600));
    /// assert!(!ledger.add("", 100));
    /// assert!(!ledger.add("Tea", 0));
    /// assert_eq!(ledger.total(), 600);
    /// ```
    pub fn add(&mut self, name: &str, amount: u64) -> bool {
        let name = name.trim();
        if name.is_empty() || amount == 0 {
            return false;
        }
        if self.total().checked_add(amount).is_none() {
            return false;
        }
        self.lines.push(ExpenseLine {
            name: name.to_string(),
            amount,
        });
        self.draft = None;
        true
    }

    /// Remove the line at `index`, if there is one.
    pub fn remove(&mut self, index: usize) -> Option<ExpenseLine> {
        if index < self.lines.len() {
            Some(self.lines.remove(index))
        } else {
            None
        }
    }

    /// Sum of all line amounts; 0 when there are no lines.
    pub fn total(&self) -> u64 {
        self.lines
            .iter()
            .fold(0, |total, line| total.saturating_add(line.amount))
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[ExpenseLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Stage a draft, replacing any draft already staged.
    pub fn stage(&mut self, name: impl Into<String>, amount: u64) {
        self.draft = Some(ExpenseDraft {
            name: name.into(),
            amount,
        });
    }

    /// The currently staged draft.
    pub fn draft(&self) -> Option<&ExpenseDraft> {
        self.draft.as_ref()
    }

    /// Commit the staged draft as a new line.
    ///
    /// An invalid draft stays staged so it can be corrected; nothing is
    /// added. Returns whether a line was appended.
    pub fn commit_draft(&mut self) -> bool {
        match self.draft.clone() {
            Some(draft) => self.add(&draft.name, draft.amount),
            None => false,
        }
    }

    /// Drop the staged draft without committing it.
    pub fn discard_draft(&mut self) {
        self.draft = None;
    }

    /// Remove every line, returning how many there were. A staged draft
    /// is kept.
    pub fn clear(&mut self) -> usize {
        let removed = self.lines.len();
        self.lines.clear();
        removed
    }
}
