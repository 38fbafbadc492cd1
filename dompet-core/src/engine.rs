//! Text in, reply out.

use crate::command::Command;
use crate::extract::interpret;
use crate::finance::FinancialSnapshot;
use crate::responder::render;

/// Supplies the user's financial state on demand.
///
/// Only consulted for intents that need it, so callers can defer ledger
/// reads until they are known to be required.
pub trait SnapshotProvider {
    fn snapshot(&self, user_id: &str) -> Option<FinancialSnapshot>;
}

impl<F> SnapshotProvider for F
where
    F: Fn(&str) -> Option<FinancialSnapshot>,
{
    fn snapshot(&self, user_id: &str) -> Option<FinancialSnapshot> {
        self(user_id)
    }
}

/// A provider that never has data
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSnapshot;

impl SnapshotProvider for NoSnapshot {
    fn snapshot(&self, _user_id: &str) -> Option<FinancialSnapshot> {
        None
    }
}

/// Classify, extract and render one message.
pub fn process(user_id: &str, raw_text: &str, provider: impl SnapshotProvider) -> String {
    respond(user_id, &interpret(raw_text), &provider)
}

/// Render an already extracted command, fetching a snapshot only if needed.
pub fn respond<P: SnapshotProvider + ?Sized>(user_id: &str, command: &Command, provider: &P) -> String {
    let snapshot = if command.needs_snapshot() {
        provider.snapshot(user_id)
    } else {
        None
    };
    render(command, snapshot.as_ref())
}
