//! Turn a [`Classification`] into a typed [`Command`].

use std::sync::LazyLock;

use regex::Regex;

use crate::amount::{parse_amount, try_parse_amount};
use crate::categorizer::{categorize, is_generic};
use crate::command::{Command, Entry};
use crate::intent::{Classification, FieldOrder, IntentTag, classify};

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d[\d.,]*").expect("number pattern must compile"));

static DARI_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bdari\s+(\w+)").expect("dari pattern must compile"));

const ARTICLES: &[&str] = &["a", "an", "the", "sebuah", "satu", "seunit"];
const PRICE_WORDS: &[&str] = &[
    "seharga", "harga", "harganya", "senilai", "for", "at", "rp", "rp.", "idr",
];
const BUY_VERBS: &[&str] = &["buy", "beli", "purchase", "membeli"];

/// Classify and extract in one step
pub fn interpret(text: &str) -> Command {
    let text = text.trim();
    extract(&classify(text), text)
}

/// Build the command for an already classified, trimmed message
pub fn extract(classification: &Classification, text: &str) -> Command {
    let c = classification;
    match c.tag {
        IntentTag::About => Command::About,
        IntentTag::Capability => Command::Capability,
        IntentTag::Thanks => Command::Thanks,
        IntentTag::Goodbye => Command::Goodbye,
        IntentTag::Stats => Command::Stats,
        IntentTag::Report => Command::Report,
        IntentTag::Help => Command::Help,
        IntentTag::BudgetAdvice => Command::BudgetAdvice,
        IntentTag::Balance => Command::Balance,
        IntentTag::Income => Command::Income(entry(c, text)),
        IntentTag::Expense => Command::Expense(entry(c, text)),
        IntentTag::Delete => match c.group(1).and_then(|id| id.parse::<i64>().ok()) {
            Some(transaction_id) => Command::Delete { transaction_id },
            None => unknown(text),
        },
        IntentTag::PurchasePlanning => purchase(c, text),
        IntentTag::Unknown => unknown(text),
    }
}

fn unknown(text: &str) -> Command {
    Command::Unknown {
        original_text: text.trim().to_string(),
    }
}

fn entry(c: &Classification, text: &str) -> Entry {
    let (amount, category, description) = match c.order {
        FieldOrder::CategoryFirst => (c.group(2), c.group(1), c.group(3)),
        FieldOrder::AmountFirst | FieldOrder::ReceiptVerb | FieldOrder::Positional => {
            (c.group(1), c.group(2), c.group(3))
        }
    };

    let amount = parse_amount(amount.unwrap_or_default());
    let description = description.unwrap_or_default().trim().to_string();
    let mut category = category
        .map(str::to_lowercase)
        .unwrap_or_else(|| "lainnya".to_string());

    if c.order == FieldOrder::ReceiptVerb {
        if let Some(caps) = DARI_CLAUSE.captures(text) {
            category = caps[1].to_lowercase();
        }
    }

    if is_generic(&category) {
        category = categorize(&description, amount).to_string();
    }

    Entry {
        amount,
        category,
        description,
    }
}

fn purchase(c: &Classification, text: &str) -> Command {
    let mut price = NUMBER
        .find_iter(text)
        .filter_map(|m| try_parse_amount(m.as_str()))
        .fold(0.0, f64::max);
    if let Some(quoted) = c.group(2).and_then(try_parse_amount) {
        price = quoted;
    }

    let mut item = clean_item(c.group(1).unwrap_or_default());
    if item.chars().count() <= 2 {
        item = item_after_buy_verb(text).unwrap_or_else(|| "item".to_string());
    }

    Command::PurchasePlanning { item, price }
}

/// Lower-case, drop leading articles and trailing price words
fn clean_item(raw: &str) -> String {
    let lower = raw.to_lowercase();
    let mut words: Vec<&str> = lower.split_whitespace().collect();

    while words.first().is_some_and(|w| ARTICLES.contains(w)) {
        words.remove(0);
    }
    while words.last().is_some_and(|w| PRICE_WORDS.contains(w)) {
        words.pop();
    }

    words.join(" ")
}

fn item_after_buy_verb(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();
    let verb = words.iter().position(|w| BUY_VERBS.contains(w))?;

    words[verb + 1..]
        .iter()
        .filter(|w| !ARTICLES.contains(w))
        .find(|w| !w.chars().all(|ch| ch.is_ascii_digit() || ch == '.' || ch == ','))
        .map(|w| w.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_of(cmd: Command) -> Entry {
        match cmd {
            Command::Income(e) | Command::Expense(e) => e,
            other => panic!("expected an entry, got {other:?}"),
        }
    }

    #[test]
    fn test_income_pronoun_form() {
        let cmd = interpret("saya dapat gaji 6250000 dari kantor");
        assert_eq!(cmd.tag(), IntentTag::Income);
        let e = entry_of(cmd);
        assert_eq!(e.amount, 6_250_000.0);
        assert_eq!(e.category, "gaji");
        assert_eq!(e.description, "kantor");
    }

    #[test]
    fn test_income_command_form() {
        let e = entry_of(interpret("!income 5000000 gaji bonus akhir tahun"));
        assert_eq!(e.amount, 5_000_000.0);
        assert_eq!(e.category, "gaji");
        assert_eq!(e.description, "bonus akhir tahun");
    }

    #[test]
    fn test_income_receipt_verb_forms() {
        let e = entry_of(interpret("dapat 1000000 freelance"));
        assert_eq!(e.amount, 1_000_000.0);
        assert_eq!(e.category, "freelance");

        // category re-read from the "dari" clause
        let e = entry_of(interpret("terima 750000 dari investasi saham"));
        assert_eq!(e.amount, 750_000.0);
        assert_eq!(e.category, "investasi");

        let e = entry_of(interpret("dapat 500000"));
        assert_eq!(e.category, "lainnya");

        let e = entry_of(interpret("saya dapat 500000 dari freelance"));
        assert_eq!(e.amount, 500_000.0);
        assert_eq!(e.category, "freelance");
    }

    #[test]
    fn test_income_synonym_verb() {
        let e = entry_of(interpret("saya meraih gaji 2000000"));
        assert_eq!(e.amount, 2_000_000.0);
        assert_eq!(e.category, "gaji");
        assert_eq!(e.description, "");
    }

    #[test]
    fn test_expense_command_form() {
        let cmd = interpret("!expense 50000 makanan lunch dengan teman");
        assert_eq!(cmd.tag(), IntentTag::Expense);
        let e = entry_of(cmd);
        assert_eq!(e.amount, 50_000.0);
        assert_eq!(e.category, "makanan");
        assert_eq!(e.description, "lunch dengan teman");
    }

    #[test]
    fn test_expense_natural_forms() {
        let e = entry_of(interpret("saya habis 75000 untuk transport"));
        assert_eq!(e.amount, 75_000.0);
        assert_eq!(e.category, "transport");

        let e = entry_of(interpret("beli makanan 25000"));
        assert_eq!(e.category, "makanan");
        assert_eq!(e.amount, 25_000.0);

        let e = entry_of(interpret("saya belanja 200000 baju"));
        assert_eq!(e.amount, 200_000.0);
        assert_eq!(e.category, "baju");
    }

    #[test]
    fn test_category_first_after_pronoun() {
        let e = entry_of(interpret("saya beli bensin 30000"));
        assert_eq!(e.category, "bensin");
        assert_eq!(e.amount, 30_000.0);
    }

    #[test]
    fn test_generic_category_is_auto_categorized() {
        let e = entry_of(interpret("!expense 30000 pengeluaran bensin motor"));
        assert_eq!(e.category, "transport");

        let e = entry_of(interpret("!income 2000000 uang"));
        assert_eq!(e.category, "gaji");
    }

    #[test]
    fn test_explicit_category_is_kept() {
        // "mobil" is a transport keyword, but the user named the category
        let e = entry_of(interpret("!expense 100000 mobil cuci mobil"));
        assert_eq!(e.category, "mobil");
    }

    #[test]
    fn test_separated_amounts() {
        let e = entry_of(interpret("saya dapat gaji 5.000.000 dari kantor"));
        assert_eq!(e.amount, 5_000_000.0);
        let e = entry_of(interpret("!expense 1,500,000 tagihan listrik"));
        assert_eq!(e.amount, 1_500_000.0);
    }

    #[test]
    fn test_zero_amount_not_clamped() {
        let e = entry_of(interpret("saya dapat gaji 0 dari kantor"));
        assert_eq!(e.amount, 0.0);
    }

    #[test]
    fn test_delete() {
        assert_eq!(interpret("!delete 123"), Command::Delete { transaction_id: 123 });
        assert_eq!(
            interpret("hapus transaksi 456"),
            Command::Delete { transaction_id: 456 }
        );
    }

    #[test]
    fn test_delete_id_out_of_range_is_unknown() {
        assert_eq!(
            interpret("hapus 1234567890123456789012"),
            Command::Unknown {
                original_text: "hapus 1234567890123456789012".to_string()
            }
        );
        assert_eq!(
            interpret("!delete 9223372036854775807"),
            Command::Delete {
                transaction_id: i64::MAX
            }
        );
    }

    #[test]
    fn test_purchase_items_and_prices() {
        let cases = [
            ("I want to buy a car 30000000", "car", 30_000_000.0),
            ("saya mau beli laptop 15000000", "laptop", 15_000_000.0),
            ("I want to buy a house 500000000", "house", 500_000_000.0),
            ("saya ingin beli motor 25000000", "motor", 25_000_000.0),
            ("rencana beli motor 25000000", "motor", 25_000_000.0),
            ("analisis beli rumah 500000000", "rumah", 500_000_000.0),
            ("mau beli laptop gaming seharga 20.000.000", "laptop gaming", 20_000_000.0),
        ];
        for (text, item, price) in cases {
            assert_eq!(
                interpret(text),
                Command::PurchasePlanning {
                    item: item.to_string(),
                    price
                },
                "{text}"
            );
        }
    }

    #[test]
    fn test_short_item_falls_back_to_word_after_verb() {
        assert_eq!(clean_item("a tv"), "tv");
        assert_eq!(item_after_buy_verb("mau beli 2 tv"), Some("tv".to_string()));
        assert_eq!(item_after_buy_verb("beli 5000"), None);
        assert_eq!(item_after_buy_verb("tidak ada kata kerja"), None);
    }

    #[test]
    fn test_clean_item_strips_price_words() {
        assert_eq!(clean_item("The Sofa seharga"), "sofa");
        assert_eq!(clean_item("sepeda for"), "sepeda");
    }

    #[test]
    fn test_unknown_keeps_trimmed_text() {
        assert_eq!(
            interpret("  hello world random text  "),
            Command::Unknown {
                original_text: "hello world random text".to_string()
            }
        );
    }
}
