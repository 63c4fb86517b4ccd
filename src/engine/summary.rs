use std::io;
use std::io::Write;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::models::{Batch, ValidatedTransaction};
use crate::types::{Address, ChainId};

/// Per-sender totals shown to the operator before anything is sent.
///
/// Amounts are only summed for display; the transactions keep the original text.
#[derive(Debug, Default, PartialEq)]
pub struct TransferSummary {
    pub count: usize,
    /// Senders in the order they first appear.
    pub totals: Vec<(Address, Decimal)>,
    /// Amounts that are not plain decimals, left for the CLI to judge.
    pub unparsed: Vec<(Address, String)>
}

impl TransferSummary {
    pub fn new(transactions: &[ValidatedTransaction]) -> Self {
        let mut summary = TransferSummary {
            count: transactions.len(),
            ..TransferSummary::default()
        };

        for transaction in transactions {
            let Some(amount) = parse_plain_decimal(&transaction.amount) else {
                summary.unparsed.push((transaction.source.clone(), transaction.amount.clone()));
                continue;
            };

            match summary.totals.iter_mut().find(|(source, _)| *source == transaction.source) {
                Some((_, total)) => *total = total.saturating_add(amount),
                None => summary.totals.push((transaction.source.clone(), amount))
            }
        }

        summary
    }
}

/// Only plain `[-]digits[.digits]` amounts are summed, exponents and other notations are not.
fn parse_plain_decimal(amount: &str) -> Option<Decimal> {
    let digits = amount.strip_prefix('-').unwrap_or(amount);
    let is_plain = !digits.is_empty()
        && digits.bytes().all(|byte| byte.is_ascii_digit() || byte == b'.')
        && digits.bytes().filter(|byte| *byte == b'.').count() <= 1;

    if !is_plain {
        return None;
    }

    Decimal::from_str(amount).ok()
}

/// Writes the pre-send review: every transaction (secrets masked), the target and the totals.
pub fn write_summary<W: Write>(output: &mut W, transactions: &[ValidatedTransaction], node: &str, chain_id: Option<ChainId>) -> io::Result<()> {
    let review = Batch { index: 0, transactions: transactions.to_vec() };
    let summary = TransferSummary::new(transactions);

    writeln!(output, "Transactions to send:")?;
    writeln!(output, "{}", review.redacted_json()?)?;
    writeln!(output, "Transaction Count: {}", summary.count)?;
    writeln!(output, "Node/Endpoint: {node}")?;

    if let Some(chain_id) = chain_id {
        writeln!(output, "Chain-ID: {chain_id}")?;
    }

    for (source, total) in &summary.totals {
        writeln!(output, "Total from {source}: {total}")?;
    }

    for (source, amount) in &summary.unparsed {
        writeln!(output, "Unrecognized amount from {source}: {amount}")?;
    }

    output.flush()
}
