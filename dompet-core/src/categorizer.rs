//! Deterministic keyword categorization of free-text descriptions.
//!
//! Income keywords are checked before expense keywords, each table in
//! declaration order. First hit wins.

/// Amount above which an unmatched description is assumed to be salary
pub const SALARY_THRESHOLD: f64 = 1_000_000.0;

const INCOME_KEYWORDS: &[(&str, &[&str])] = &[
    ("gaji", &["gaji", "salary", "kantor", "kerja", "office", "pekerjaan", "job"]),
    ("freelance", &["freelance", "projek", "project", "kontrak", "lepas", "sampingan"]),
    ("investasi", &["saham", "reksadana", "dividen", "profit", "trading", "invest"]),
    ("hadiah", &["hadiah", "gift", "bonus", "reward", "prize", "kado", "pemberian"]),
];

const EXPENSE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "makanan",
        &[
            "makan", "food", "nasi", "ayam", "restaurant", "cafe", "snack", "lapar", "kenyang",
            "minuman", "drink",
        ],
    ),
    (
        "transport",
        &[
            "transport", "bensin", "ojek", "taksi", "bus", "kereta", "grab", "gojek", "uber",
            "motor", "mobil",
        ],
    ),
    (
        "hiburan",
        &[
            "film", "movie", "game", "spotify", "netflix", "youtube", "concert", "musik",
            "entertainment",
        ],
    ),
    (
        "belanja",
        &["beli", "shopping", "baju", "sepatu", "elektronik", "gadget", "belanja", "mall", "toko"],
    ),
    (
        "tagihan",
        &[
            "listrik", "air", "internet", "wifi", "telepon", "cicilan", "bayar", "bill",
            "utilities",
        ],
    ),
    (
        "kesehatan",
        &[
            "dokter", "obat", "hospital", "medical", "vitamin", "therapy", "rumah sakit", "clinic",
        ],
    ),
    (
        "pendidikan",
        &["kursus", "buku", "sekolah", "kuliah", "training", "course", "seminar", "workshop"],
    ),
];

/// Placeholder words users type instead of a real category
pub const GENERIC_CATEGORIES: &[&str] =
    &["uang", "dana", "income", "pemasukan", "expense", "pengeluaran"];

pub fn is_generic(category: &str) -> bool {
    GENERIC_CATEGORIES.contains(&category)
}

/// Pick a category for `description`, using `amount` only as a tie-breaker
/// when no keyword matches.
pub fn categorize(description: &str, amount: f64) -> &'static str {
    let desc = description.to_lowercase();

    if let Some(name) = first_match(&desc, INCOME_KEYWORDS) {
        return name;
    }
    if let Some(name) = first_match(&desc, EXPENSE_KEYWORDS) {
        return name;
    }

    if amount > SALARY_THRESHOLD {
        "gaji"
    } else {
        "lainnya"
    }
}

fn first_match(desc: &str, table: &[(&'static str, &[&str])]) -> Option<&'static str> {
    table
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| desc.contains(k)))
        .map(|(name, _)| *name)
}
