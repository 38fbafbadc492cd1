//! Ordered, rule-based intent classification.
//!
//! The classifier walks a fixed precedence table of [`Slot`]s. Each slot owns
//! a handful of regex alternatives (command form, natural Indonesian form,
//! English form, ...). The first slot with a matching alternative wins and no
//! later slot is tried; [`Slot::Unknown`] matches everything.
//!
//! Matching is case-insensitive. Most alternatives are substring matches;
//! stats, report and balance phrases are anchored to the whole trimmed input
//! so they do not fire inside longer sentences.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The closed set of things a message can mean
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum IntentTag {
    About,
    Capability,
    Thanks,
    Goodbye,
    Stats,
    Report,
    Help,
    BudgetAdvice,
    Delete,
    PurchasePlanning,
    Income,
    Expense,
    Balance,
    Unknown,
}

impl IntentTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentTag::About => "about",
            IntentTag::Capability => "capability",
            IntentTag::Thanks => "thanks",
            IntentTag::Goodbye => "goodbye",
            IntentTag::Stats => "stats",
            IntentTag::Report => "report",
            IntentTag::Help => "help",
            IntentTag::BudgetAdvice => "budgetAdvice",
            IntentTag::Delete => "delete",
            IntentTag::PurchasePlanning => "purchasePlanning",
            IntentTag::Income => "income",
            IntentTag::Expense => "expense",
            IntentTag::Balance => "balance",
            IntentTag::Unknown => "unknown",
        }
    }

    /// Intents whose reply depends on the user's ledger
    pub fn needs_snapshot(&self) -> bool {
        matches!(
            self,
            IntentTag::Balance
                | IntentTag::Report
                | IntentTag::Stats
                | IntentTag::BudgetAdvice
                | IntentTag::PurchasePlanning
                | IntentTag::Income
                | IntentTag::Expense
        )
    }
}

/// Precedence slots, highest first. `Help` appears twice: the first pass is
/// skipped for budget-flavoured text so budget requests reach
/// [`Slot::BudgetAdvice`] first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    About,
    Capability,
    Goodbye,
    Thanks,
    Stats,
    Report,
    HelpFirstPass,
    BudgetAdvice,
    HelpSecondPass,
    Delete,
    PurchasePlanning,
    Income,
    Expense,
    Balance,
    Unknown,
}

impl Slot {
    pub const PRECEDENCE: [Slot; 15] = [
        Slot::About,
        Slot::Capability,
        Slot::Goodbye,
        Slot::Thanks,
        Slot::Stats,
        Slot::Report,
        Slot::HelpFirstPass,
        Slot::BudgetAdvice,
        Slot::HelpSecondPass,
        Slot::Delete,
        Slot::PurchasePlanning,
        Slot::Income,
        Slot::Expense,
        Slot::Balance,
        Slot::Unknown,
    ];

    pub fn tag(&self) -> IntentTag {
        match self {
            Slot::About => IntentTag::About,
            Slot::Capability => IntentTag::Capability,
            Slot::Goodbye => IntentTag::Goodbye,
            Slot::Thanks => IntentTag::Thanks,
            Slot::Stats => IntentTag::Stats,
            Slot::Report => IntentTag::Report,
            Slot::HelpFirstPass | Slot::HelpSecondPass => IntentTag::Help,
            Slot::BudgetAdvice => IntentTag::BudgetAdvice,
            Slot::Delete => IntentTag::Delete,
            Slot::PurchasePlanning => IntentTag::PurchasePlanning,
            Slot::Income => IntentTag::Income,
            Slot::Expense => IntentTag::Expense,
            Slot::Balance => IntentTag::Balance,
            Slot::Unknown => IntentTag::Unknown,
        }
    }

    fn guard(&self) -> Guard {
        match self {
            Slot::HelpFirstPass => Guard::WithoutBudgetWords,
            _ => Guard::Always,
        }
    }

    fn alternatives(&self) -> &'static [(&'static str, FieldOrder)] {
        match self {
            Slot::About => ABOUT,
            Slot::Capability => CAPABILITY,
            Slot::Goodbye => GOODBYE,
            Slot::Thanks => THANKS,
            Slot::Stats => STATS,
            Slot::Report => REPORT,
            Slot::HelpFirstPass | Slot::HelpSecondPass => HELP,
            Slot::BudgetAdvice => BUDGET_ADVICE,
            Slot::Delete => DELETE,
            Slot::PurchasePlanning => PURCHASE_PLANNING,
            Slot::Income => INCOME,
            Slot::Expense => EXPENSE,
            Slot::Balance => BALANCE,
            Slot::Unknown => &[],
        }
    }
}

/// How an income/expense alternative lays out its capture groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOrder {
    /// Groups carry no transaction fields (or only one, e.g. delete id)
    Positional,
    /// `(amount, category, description?)`
    AmountFirst,
    /// `(category, amount, description?)`
    CategoryFirst,
    /// `(amount, category?, description?)`, category overridden by the word
    /// after `dari` when present
    ReceiptVerb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Guard {
    Always,
    WithoutBudgetWords,
}

/// Words that push a help request past the first help pass
pub const BUDGET_WORDS: [&str; 4] = ["budget", "anggaran", "create", "buat"];

fn mentions_budget(text: &str) -> bool {
    let lower = text.to_lowercase();
    BUDGET_WORDS.iter().any(|w| lower.contains(w))
}

use FieldOrder::{AmountFirst, CategoryFirst, Positional, ReceiptVerb};

const ABOUT: &[(&str, FieldOrder)] = &[
    (r"(?:siapa|who)\s+(?:kamu|you|bot)", Positional),
    (r"(?:apa|what)\s+(?:nama|name)\s+(?:kamu|you)", Positional),
    (r"(?:kamu|you)\s+(?:siapa|who)", Positional),
    (r"(?:perkenalkan|introduce)\s+(?:diri|yourself)", Positional),
    (r"^(?:hai|hello|hi|halo)[!.]*$", Positional),
    (r"^(?:apa kabar|how are you)[?!.]*$", Positional),
    (r"who\s+are\s+you", Positional),
    (r"what\s+are\s+you", Positional),
];

const CAPABILITY: &[(&str, FieldOrder)] = &[
    (r"(?:apa|what)\s+(?:yang bisa|can you do)", Positional),
    (r"(?:kamu|you)\s+(?:bisa|can)\s+(?:apa|what)", Positional),
    (r"(?:fungsi|function|fitur|feature)\s+(?:apa|what)", Positional),
    (r"(?:kemampuan|capability|abilities)\s+(?:kamu|you)", Positional),
    (r"(?:untuk apa|what for)\s+(?:kamu|you)", Positional),
];

const GOODBYE: &[(&str, FieldOrder)] = &[
    (r"^(?:bye|goodbye|sampai jumpa|dadah|selamat tinggal)[!.]*$", Positional),
    (r"^(?:see you|until next time|sampai nanti)[!.]*$", Positional),
    (r"\b(?:good)?bye[!.\s]*$", Positional),
];

const THANKS: &[(&str, FieldOrder)] = &[
    (r"(?:terima kasih|thank you|thanks|makasih)", Positional),
    (r"(?:bagus|good|mantap|keren|nice)", Positional),
    (r"(?:hebat|great|awesome|amazing)", Positional),
];

const STATS: &[(&str, FieldOrder)] = &[
    (r"^!stats$", Positional),
    (r"^(?:statistik|stats|statistics)(?:\s+(?:saya|aku|keuangan))?[?!.]*$", Positional),
    (r"^(?:lihat|cek|show)\s+(?:statistik|stats)[?!.]*$", Positional),
];

const REPORT: &[(&str, FieldOrder)] = &[
    (r"^!report$", Positional),
    (r"^(?:laporan|report)[?!.]*$", Positional),
    (r"^(?:lihat|show|cek)\s+(?:laporan|report)[?!.]*$", Positional),
    (r"^(?:ringkasan|summary)\s+(?:keuangan|finansial|financial)[?!.]*$", Positional),
    (r"^(?:laporan|report)\s+(?:keuangan|finansial|financial)[?!.]*$", Positional),
    (r"^(?:laporan|report)\s+(?:dan\s+)?(?:saldo|balance)[?!.]*$", Positional),
];

const HELP: &[(&str, FieldOrder)] = &[
    (r"!help", Positional),
    (r"(?:help|bantuan)", Positional),
    (r"(?:gimana|bagaimana|how)\s+(?:cara|way)", Positional),
    (r"(?:apa|what)\s+(?:perintah|command)", Positional),
];

const BUDGET_ADVICE: &[(&str, FieldOrder)] = &[
    (r"!budget", Positional),
    (
        r"(?:bantuan|bantu|tolong|buatkan|buat|bikin|konsultasi|analisis|saran|atur)\s+(?:\w+\s+)?(?:anggaran|budget)",
        Positional,
    ),
    (
        r"(?:saya|aku|gw|gue)\s+(?:mau|ingin|perlu|butuh)\s+(?:\w+\s+)?(?:anggaran|budget)",
        Positional,
    ),
    (r"(?:help|create|make|plan)\b.*\bbudget", Positional),
    (r"budget\s+(?:advice|plan|planning)", Positional),
    (r"^(?:anggaran|budget)(?:\s+(?:saya|aku|bulanan))?[?!.]*$", Positional),
    (r"(?:saran|rencana)\s+keuangan", Positional),
];

const DELETE: &[(&str, FieldOrder)] = &[
    (r"!delete\s+(\d+)", Positional),
    (r"(?:hapus|delete|remove)\s+(?:transaksi\s+)?(\d+)", Positional),
    (r"(?:batalkan|cancel)\s+(?:transaksi\s+)?(\d+)", Positional),
];

// Group 1 is the item phrase, group 2 the quoted price.
const PURCHASE_PLANNING: &[(&str, FieldOrder)] = &[
    (
        r"(?:want|would like|plan(?:ning)?|going)\s+to\s+(?:buy|purchase)\s+(.+?)\s+(?:for\s+|at\s+)?(?:rp\.?\s*)?(\d[\d.,]*)",
        Positional,
    ),
    (
        r"(?:mau|ingin|pengen|pingin|berencana|rencana|analisis|konsultasi)\s+(?:beli|membeli)\s+(.+?)\s+(?:seharga\s+|harga(?:nya)?\s+|senilai\s+)?(?:rp\.?\s*)?(\d[\d.,]*)",
        Positional,
    ),
    (
        r"(?:bisa|mampu|sanggup)\s+(?:beli|membeli)\s+(.+?)\s+(?:seharga\s+|harga(?:nya)?\s+|senilai\s+)?(?:rp\.?\s*)?(\d[\d.,]*)",
        Positional,
    ),
    (
        r"(?:can\s+i\s+afford|should\s+i\s+buy)\s+(.+?)\s+(?:for\s+|at\s+)?(?:rp\.?\s*)?(\d[\d.,]*)",
        Positional,
    ),
];

const INCOME: &[(&str, FieldOrder)] = &[
    // !income 100000 gaji bonus bulan ini
    (r"!income\s+(\d[\d.,]*)\s+(\w+)(?:\s+(.+))?", AmountFirst),
    // saya dapat gaji 5000000 dari kantor
    (
        r"(?:saya|aku|gw|gue)\s+(?:dapat|terima|dapet|menerima|meraih|peroleh)\s+(\w+)\s+(\d[\d.,]*)(?:\s+(?:dari\s+)?(.+))?",
        CategoryFirst,
    ),
    // dapat 500000 freelance
    (
        r"(?:dapat|terima|dapet|menerima|meraih|peroleh)\s+(\d[\d.,]*)(?:\s+(\w+))?(?:\s+(.+))?",
        ReceiptVerb,
    ),
    // pemasukan 1000000 kategori deskripsi
    (r"(?:income|pemasukan|masuk)\s+(\d[\d.,]*)\s+(\w+)(?:\s+(.+))?", AmountFirst),
];

const EXPENSE: &[(&str, FieldOrder)] = &[
    // !expense 50000 makanan makan siang
    (r"!expense\s+(\d[\d.,]*)\s+(\w+)(?:\s+(.+))?", AmountFirst),
    // saya habis 50000 untuk makanan
    (
        r"(?:saya|aku|gw|gue)\s+(?:habis|keluar|bayar|beli|menghabiskan|mengeluarkan|spent|belanja|pakai|gunakan)\s+(\d[\d.,]*)\s+(?:untuk\s+)?(\w+)(?:\s+(.+))?",
        AmountFirst,
    ),
    // keluar 75000 transport
    (
        r"(?:keluar|habis|bayar|beli|expense|pengeluaran|menghabiskan|mengeluarkan|belanja|pakai|gunakan|spent|spend)\s+(\d[\d.,]*)\s+(?:untuk\s+|for\s+)?(\w+)(?:\s+(.+))?",
        AmountFirst,
    ),
    // beli makanan 25000
    (r"(?:beli|bayar|belanja)\s+(\w+)\s+(\d[\d.,]*)(?:\s+(.+))?", CategoryFirst),
];

const BALANCE: &[(&str, FieldOrder)] = &[
    (r"^!balance$", Positional),
    (r"^(?:saldo|balance)(?:\s+(?:saya|aku|gw|gue|ku))?[?!.]*$", Positional),
    (
        r"^(?:cek|lihat|check)\s+(?:saldo|balance|uang)(?:\s+(?:saya|aku|gw|gue))?[?!.]*$",
        Positional,
    ),
    (
        r"^(?:berapa|how much)\s+(?:saldo|uang|money)(?:\s+(?:saya|aku|gw|gue))?[?!.]*$",
        Positional,
    ),
    (r"^(?:saya|aku|gw|gue)\s+(?:punya|ada)\s+(?:berapa|how much)[?!.]*$", Positional),
];

/// Result of classifying one message
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub slot: Slot,
    pub tag: IntentTag,
    /// Index of the alternative that matched within its slot
    pub alternative: usize,
    pub order: FieldOrder,
    /// Capture groups 1..n of the matching alternative
    pub captures: Vec<Option<String>>,
}

impl Classification {
    fn unknown() -> Self {
        Self {
            slot: Slot::Unknown,
            tag: IntentTag::Unknown,
            alternative: 0,
            order: Positional,
            captures: Vec::new(),
        }
    }

    /// 1-based capture group, `None` when absent or empty
    pub fn group(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.captures.get(i))
            .and_then(|g| g.as_deref())
            .filter(|g| !g.is_empty())
    }
}

struct Alternative {
    regex: Regex,
    order: FieldOrder,
}

struct RuleGroup {
    slot: Slot,
    guard: Guard,
    alternatives: Vec<Alternative>,
}

/// The compiled precedence table
pub struct Classifier {
    groups: Vec<RuleGroup>,
}

static CLASSIFIER: LazyLock<Classifier> =
    LazyLock::new(|| Classifier::new().expect("built-in intent patterns must compile"));

impl Classifier {
    pub fn new() -> Result<Self, regex::Error> {
        let mut groups = Vec::with_capacity(Slot::PRECEDENCE.len());
        for slot in Slot::PRECEDENCE {
            let alternatives = slot
                .alternatives()
                .iter()
                .map(|(pattern, order)| {
                    Ok(Alternative {
                        regex: Regex::new(&format!("(?i){pattern}"))?,
                        order: *order,
                    })
                })
                .collect::<Result<Vec<_>, regex::Error>>()?;
            groups.push(RuleGroup {
                slot,
                guard: slot.guard(),
                alternatives,
            });
        }
        Ok(Self { groups })
    }

    /// The process-wide table, compiled on first use
    pub fn global() -> &'static Classifier {
        &CLASSIFIER
    }

    pub fn classify(&self, text: &str) -> Classification {
        let text = text.trim();
        let budget_flavoured = mentions_budget(text);

        for group in &self.groups {
            if group.guard == Guard::WithoutBudgetWords && budget_flavoured {
                continue;
            }
            for (index, alt) in group.alternatives.iter().enumerate() {
                if let Some(caps) = alt.regex.captures(text) {
                    return Classification {
                        slot: group.slot,
                        tag: group.slot.tag(),
                        alternative: index,
                        order: alt.order,
                        captures: caps
                            .iter()
                            .skip(1)
                            .map(|m| m.map(|m| m.as_str().to_string()))
                            .collect(),
                    };
                }
            }
        }

        Classification::unknown()
    }
}

/// Classify with the global table
pub fn classify(text: &str) -> Classification {
    Classifier::global().classify(text)
}
