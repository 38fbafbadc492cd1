//! Reply templates. Every intent renders to exactly one deterministic
//! Indonesian message; money goes through [`rupiah`].

use std::fmt::Write as _;

use crate::amount::rupiah;
use crate::calculators::{Recommendation, SpendingTier, budget_allocation, purchase_analysis};
use crate::command::{Command, Entry};
use crate::finance::{FinancialSnapshot, Transaction, TransactionKind};
use crate::reflection::reflect;

pub const BOT_NAME: &str = "Dompet";

/// How many transactions the balance reply lists
pub const BALANCE_RECENT_LIMIT: usize = 5;
/// How many transactions the stats reply lists
pub const STATS_RECENT_LIMIT: usize = 3;

pub fn render(command: &Command, snapshot: Option<&FinancialSnapshot>) -> String {
    match command {
        Command::About => about(),
        Command::Capability => capability(),
        Command::Thanks => thanks(),
        Command::Goodbye => goodbye(),
        Command::Help => help(),
        Command::Stats => stats(snapshot),
        Command::Report => report(snapshot),
        Command::Balance => balance(snapshot),
        Command::BudgetAdvice => budget_advice(snapshot),
        Command::PurchasePlanning { item, price } => purchase_planning(item, *price, snapshot),
        Command::Income(entry) => recorded(TransactionKind::Income, entry, snapshot),
        Command::Expense(entry) => recorded(TransactionKind::Expense, entry, snapshot),
        Command::Delete { transaction_id } => delete_done(*transaction_id),
        Command::Unknown { original_text } => unknown(original_text),
    }
}

fn about() -> String {
    format!(
        "👋 Hai! Saya **{BOT_NAME}**, asisten keuangan pribadi kamu.\n\n\
         🤖 **Tentang Saya:**\n\
         • Nama: {BOT_NAME}\n\
         • Fungsi: Membantu mencatat pemasukan dan pengeluaran\n\
         • Bahasa: Indonesia & English\n\n\
         💡 Saya paham bahasa sehari-hari, jadi santai saja ngobrolnya.\n\
         Ketik `!help` untuk melihat semua yang bisa saya lakukan."
    )
}

fn capability() -> String {
    "🚀 **Kemampuan Saya:**\n\n\
     💰 **Manajemen Keuangan:**\n\
     • Catat pemasukan dan pengeluaran\n\
     • Hitung saldo otomatis\n\
     • Buat laporan keuangan per kategori\n\
     • Kategorisasi transaksi otomatis\n\n\
     🧮 **Perencanaan:**\n\
     • Saran anggaran bulanan (dana darurat, tabungan)\n\
     • Analisis sebelum membeli barang\n\n\
     🧠 **Bahasa:**\n\
     • Mengerti bahasa Indonesia & English\n\
     • Paham bahasa gaul (gue/lu, dll)\n\n\
     Ketik `!help` untuk panduan lengkap!"
        .to_string()
}

fn thanks() -> String {
    "😊 Sama-sama! Senang bisa membantu kamu mengelola keuangan.\n\n\
     💪 Kalau ada yang mau ditanyakan atau dicatat lagi, langsung saja bilang.\n\n\
     💡 **Tips**: Rutin catat transaksi harian supaya keuangan lebih terkontrol!"
        .to_string()
}

fn goodbye() -> String {
    "👋 Sampai jumpa! Semoga keuangannya selalu terkontrol.\n\n\
     💰 Jangan lupa terus catat pemasukan dan pengeluarannya ya!"
        .to_string()
}

fn help() -> String {
    format!(
        "🤖 **{BOT_NAME} - Panduan Penggunaan**\n\n\
         **Perintah Utama:**\n\
         • `!income <jumlah> <kategori> <deskripsi>` - Catat pemasukan\n\
         • `!expense <jumlah> <kategori> <deskripsi>` - Catat pengeluaran\n\
         • `!balance` - Lihat saldo\n\
         • `!report` - Laporan per kategori\n\
         • `!stats` - Statistik singkat\n\
         • `!budget` - Saran anggaran\n\
         • `!delete <id>` - Hapus transaksi\n\n\
         **Cara Natural:**\n\
         • \"Saya dapat gaji 5000000 dari kantor\"\n\
         • \"Habis 50000 untuk makanan\"\n\
         • \"Berapa saldo saya?\"\n\
         • \"Saya mau beli laptop 15000000\"\n\n\
         **Kategori:**\n\
         Gaji, Freelance, Investasi, Hadiah, Makanan, Transport, Hiburan, \
         Belanja, Tagihan, Kesehatan, Pendidikan, Lainnya"
    )
}

fn recorded(kind: TransactionKind, entry: &Entry, snapshot: Option<&FinancialSnapshot>) -> String {
    let mut out = match kind {
        TransactionKind::Income => format!(
            "Baik! Saya telah mencatat pemasukan kamu sebesar {} untuk kategori '{}'",
            rupiah(entry.amount),
            entry.category
        ),
        TransactionKind::Expense => format!(
            "Oke! Saya sudah catat pengeluaran kamu sebesar {} untuk kategori '{}'",
            rupiah(entry.amount),
            entry.category
        ),
    };
    if !entry.description.is_empty() {
        let _ = write!(out, " dengan deskripsi '{}'", entry.description);
    }
    out.push('.');

    if let Some(snap) = snapshot {
        let _ = write!(out, "\n💰 Saldo terbaru: {}", rupiah(snap.balance));
        if kind == TransactionKind::Expense && snap.balance < 0.0 {
            out.push_str("\n⚠️ **Perhatian**: Saldo kamu sudah negatif!");
        }
    }
    out
}

fn transaction_line(index: usize, tx: &Transaction) -> String {
    let marker = if tx.is_income() { "💚" } else { "💸" };
    let mut line = format!(
        "\n{index}. {marker} {} - {} (ID {})",
        rupiah(tx.amount),
        tx.category,
        tx.id
    );
    if !tx.description.is_empty() {
        let _ = write!(line, " {}", tx.description);
    }
    line
}

fn balance(snapshot: Option<&FinancialSnapshot>) -> String {
    let Some(snap) = snapshot else {
        return "📭 Kamu belum memiliki transaksi apapun.".to_string();
    };

    let status = if snap.balance >= 0.0 { "positif" } else { "negatif" };
    let mut out = format!(
        "💰 **Ringkasan Keuangan Kamu:**\n\
         • Pemasukan: {}\n\
         • Pengeluaran: {}\n\
         • Saldo: {} ({status})",
        rupiah(snap.total_income),
        rupiah(snap.total_expense),
        rupiah(snap.balance),
    );

    if !snap.recent.is_empty() {
        let shown = snap.recent.len().min(BALANCE_RECENT_LIMIT);
        let _ = write!(out, "\n\n📋 **{shown} Transaksi Terakhir:**");
        for (i, tx) in snap.recent.iter().take(BALANCE_RECENT_LIMIT).enumerate() {
            out.push_str(&transaction_line(i + 1, tx));
        }
    }
    out
}

fn report(snapshot: Option<&FinancialSnapshot>) -> String {
    let Some(snap) = snapshot.filter(|s| !s.categories.is_empty()) else {
        return "📊 Kamu belum memiliki transaksi untuk dilaporkan.".to_string();
    };

    let mut out = format!(
        "📊 **Laporan Keuangan per Kategori:**\n\n\
         💰 **Total Pemasukan**: {}\n\
         💸 **Total Pengeluaran**: {}\n\
         📈 **Saldo**: {}\n",
        rupiah(snap.total_income),
        rupiah(snap.total_expense),
        rupiah(snap.balance),
    );

    let mut income: Vec<(&str, f64)> = Vec::new();
    let mut expense: Vec<(&str, f64)> = Vec::new();
    for (name, totals) in &snap.categories {
        if totals.income > 0.0 {
            income.push((name.as_str(), totals.income));
        }
        if totals.expense > 0.0 {
            expense.push((name.as_str(), totals.expense));
        }
    }

    for (title, mut rows) in [("💚 Pemasukan", income), ("💸 Pengeluaran", expense)] {
        if rows.is_empty() {
            continue;
        }
        // highest first; BTreeMap order breaks ties
        rows.sort_by(|a, b| b.1.total_cmp(&a.1));
        let _ = write!(out, "\n**{title}:**");
        for (name, amount) in rows {
            let _ = write!(out, "\n• {}: {}", title_case(name), rupiah(amount));
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}

fn stats(snapshot: Option<&FinancialSnapshot>) -> String {
    let Some(snap) = snapshot.filter(|s| {
        s.transaction_count > 0
            || !s.recent.is_empty()
            || s.total_income != 0.0
            || s.total_expense != 0.0
    }) else {
        return "📈 Belum ada statistik. Coba catat transaksi pertamamu, misalnya \
                `pemasukan 5000000 gaji`."
            .to_string();
    };

    let mut out = format!(
        "📈 **Statistik Keuangan Kamu:**\n\
         • Jumlah transaksi: {}\n\
         • Total pemasukan: {}\n\
         • Total pengeluaran: {}\n\
         • Saldo: {}",
        snap.transaction_count.max(snap.recent.len()),
        rupiah(snap.total_income),
        rupiah(snap.total_expense),
        rupiah(snap.balance),
    );
    if !snap.recent.is_empty() {
        out.push_str("\n\n🕒 **Terbaru:**");
        for (i, tx) in snap.recent.iter().take(STATS_RECENT_LIMIT).enumerate() {
            out.push_str(&transaction_line(i + 1, tx));
        }
    }
    out
}

fn budget_advice(snapshot: Option<&FinancialSnapshot>) -> String {
    let Some(snap) = snapshot.filter(|s| s.has_income()) else {
        return "💡 **Saran Anggaran**\n\n\
                Saya belum melihat pemasukan yang tercatat, jadi belum bisa menghitung \
                anggaran. Catat data keuangan kamu dulu ya.\n\n\
                📝 Mulai dengan: `pemasukan 5000000 gaji`\n\
                Lalu catat pengeluaran rutin, misalnya `habis 1500000 untuk tagihan`."
            .to_string();
    };

    let b = budget_allocation(snap);
    let mut out = format!(
        "💡 **Saran Anggaran dari {BOT_NAME}**\n\n\
         📊 **Ringkasan Keuangan Bulanan:**\n\
         • Pemasukan: {}\n\
         • Pengeluaran: {} ({:.1}% dari pemasukan)\n\
         • Saldo: {}\n",
        rupiah(snap.total_income),
        rupiah(snap.total_expense),
        b.expense_ratio,
        rupiah(snap.balance),
    );
    if snap.debt_total > 0.0 {
        let _ = writeln!(out, "• Cicilan & tagihan tercatat: {}", rupiah(snap.debt_total));
    }

    let _ = write!(
        out,
        "\n🎯 **Saran Penggunaan:**\n\
         • 🛡️ Dana Darurat (15% pemasukan): {}\n\
         • 🏦 Tabungan (30% saldo): {}\n\
         • 🛍️ Bebas dipakai: {}\n\n",
        rupiah(b.emergency_fund),
        rupiah(b.savings),
        rupiah(b.discretionary),
    );

    out.push_str(match b.tier {
        SpendingTier::Warning => {
            "⚠️ Pengeluaran kamu di atas 80% pemasukan. Kurangi belanja yang tidak \
             penting dan cek lagi tagihan rutin."
        }
        SpendingTier::Moderate => {
            "📌 Pengeluaran kamu di atas 60% pemasukan. Utamakan menabung sebelum \
             belanja keinginan."
        }
        SpendingTier::Healthy => {
            "✅ Pengeluaran kamu sehat. Pertahankan dan maksimalkan tabungan atau \
             investasi."
        }
    });
    out
}

fn purchase_planning(item: &str, price: f64, snapshot: Option<&FinancialSnapshot>) -> String {
    let title = title_case(item);

    let Some(snap) = snapshot.filter(|s| s.has_income()) else {
        return format!(
            "🛒 **Analisis Pembelian: {title}**\n\n\
             • Harga Barang: {}\n\n\
             Saya belum bisa menilai apakah ini terjangkau karena data keuangan kamu \
             belum ada. Catat pemasukan dulu, misalnya `pemasukan 5000000 gaji`, lalu \
             tanya lagi.",
            rupiah(price)
        );
    };

    let a = purchase_analysis(price, snap);
    let mut out = format!(
        "🛒 **Analisis Beli {title}**\n\n\
         • Harga Barang: {}\n\
         • Gaji Bulanan: {}\n\
         • Pengeluaran Bulanan: {}\n\
         • Saldo Sekarang: {}\n\n",
        rupiah(price),
        rupiah(snap.total_income),
        rupiah(snap.total_expense),
        rupiah(snap.balance),
    );

    if a.can_afford_now {
        out.push_str("✅ Saldo kamu cukup untuk membeli sekarang.\n\n");
    } else {
        let _ = write!(
            out,
            "❌ Saldo kamu masih kurang {}.\n\
             • Kemampuan menabung: {} per bulan\n",
            rupiah(a.shortfall),
            rupiah(a.monthly_saving_capacity),
        );
        if let Some(months) = a.months_display() {
            let _ = writeln!(out, "• Perkiraan waktu menabung: {months} bulan");
        }
        out.push('\n');
    }

    out.push_str("🧭 **Pilihan untuk Kamu:**\n");
    if !a.can_afford_now {
        out.push_str("• Tunggu & Nabung sampai dana terkumpul\n");
    }
    if let Some((low, high)) = a.alternative_range() {
        let _ = writeln!(
            out,
            "• Alternatif Lebih Murah: cari di kisaran {} - {}",
            rupiah(low),
            rupiah(high)
        );
    }
    if a.can_afford_now {
        out.push_str("• Beli tunai dari saldo\n");
    }

    out.push_str("\n💡 **Saran Saya:** ");
    out.push_str(match a.recommendation {
        Recommendation::BuyNow => "Silakan beli, dana darurat kamu tetap aman.",
        Recommendation::BuyCarefully => {
            "Bisa dibeli, tapi saldo akan turun di bawah dana darurat. Pertimbangkan baik-baik."
        }
        Recommendation::Reconsider { .. } => {
            "Harganya lebih dari setahun gaji. Sebaiknya pertimbangkan ulang atau pilih \
             yang lebih murah."
        }
        Recommendation::CheaperAlternative { .. } => {
            "Harganya melebihi gaji sebulan. Pilihan yang lebih murah akan lebih ringan."
        }
        Recommendation::SaveFirst => "Sisihkan sebagian gaji tiap bulan dan beli setelah dana cukup.",
    });
    out
}

fn unknown(original: &str) -> String {
    let mut out = format!(
        "Maaf, saya tidak mengerti perintah '{original}'. \
         Ketik `!help` untuk melihat panduan penggunaan."
    );
    let reflected = reflect(original);
    if !reflected.is_empty() {
        let _ = write!(out, "\n\n🤔 Maksud kamu: \"{reflected}\"?");
    }
    out.push_str(
        "\n\n💡 **Atau coba tanyakan:**\n\
         • \"Siapa kamu?\" - Untuk berkenalan\n\
         • \"Apa yang bisa kamu lakukan?\" - Untuk melihat kemampuan saya",
    );
    out
}

/// Rejected income or expense with a non-positive amount
pub fn invalid_amount(kind: TransactionKind) -> String {
    format!("❌ Jumlah {} harus lebih dari 0.", kind.label())
}

pub fn storage_failure() -> String {
    "Maaf, terjadi kesalahan saat memproses perintah Anda. Silakan coba lagi.".to_string()
}

pub fn delete_not_found(id: i64) -> String {
    format!("❌ Transaksi dengan ID {id} tidak ditemukan atau bukan milik kamu.")
}

pub fn delete_failed(id: i64) -> String {
    format!("❌ Gagal menghapus transaksi ID {id}.")
}

pub fn delete_done(id: i64) -> String {
    format!("✅ Transaksi ID {id} berhasil dihapus.")
}

/// Upper-case the first letter of every alphabetic run
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::CategoryTotals;
    use chrono::{TimeZone, Utc};

    fn snapshot() -> FinancialSnapshot {
        FinancialSnapshot::from_totals(6_250_000.0, 4_500_000.0)
    }

    fn tx(id: i64, kind: TransactionKind, amount: f64, category: &str) -> Transaction {
        let ts = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        Transaction::new(id, kind, amount, category, "", ts)
    }

    #[test]
    fn test_income_reply_and_balance() {
        let cmd = Command::Income(Entry::new(5_000_000.0, "gaji", "bonus"));
        let out = render(&cmd, None);
        assert_eq!(
            out,
            "Baik! Saya telah mencatat pemasukan kamu sebesar Rp 5,000,000 untuk kategori 'gaji' dengan deskripsi 'bonus'."
        );

        let snap = FinancialSnapshot::from_totals(5_000_000.0, 0.0);
        assert!(render(&cmd, Some(&snap)).ends_with("Saldo terbaru: Rp 5,000,000"));
    }

    #[test]
    fn test_stats_from_totals_only() {
        let out = render(&Command::Stats, Some(&snapshot()));
        assert!(!out.contains("Belum ada statistik"));
        assert!(out.contains("Total pemasukan: Rp 6,250,000"));
        assert!(!out.contains("Terbaru"));

        let empty = FinancialSnapshot::from_totals(0.0, 0.0);
        assert!(render(&Command::Stats, Some(&empty)).contains("Belum ada statistik"));
    }

    #[test]
    fn test_expense_warns_on_negative_balance() {
        let cmd = Command::Expense(Entry::new(50_000.0, "makanan", ""));
        let snap = FinancialSnapshot::from_totals(0.0, 50_000.0);
        let out = render(&cmd, Some(&snap));
        assert!(out.starts_with("Oke! Saya sudah catat pengeluaran kamu sebesar Rp 50,000"));
        assert!(!out.contains("deskripsi"));
        assert!(out.contains("Saldo terbaru: Rp -50,000"));
        assert!(out.contains("negatif"));
    }

    #[test]
    fn test_balance_lists_at_most_five() {
        let recent: Vec<Transaction> = (1..=7)
            .rev()
            .map(|id| tx(id, TransactionKind::Expense, 1_000.0, "makanan"))
            .collect();
        let snap = snapshot().with_recent(recent);
        let out = render(&Command::Balance, Some(&snap));
        assert!(out.contains("Ringkasan Keuangan Kamu"));
        assert!(out.contains("5 Transaksi Terakhir"));
        assert!(out.contains("(ID 7)"));
        assert!(out.contains("(ID 3)"));
        assert!(!out.contains("(ID 2)"));
    }

    #[test]
    fn test_empty_balance() {
        let out = render(&Command::Balance, Some(&FinancialSnapshot::default()));
        assert!(out.contains("Saldo: Rp 0 (positif)"));
        assert!(!out.contains("Transaksi Terakhir"));
    }

    #[test]
    fn test_report_sorted_and_title_cased() {
        let mut categories = std::collections::BTreeMap::new();
        categories.insert("makanan".to_string(), CategoryTotals { income: 0.0, expense: 100_000.0 });
        categories.insert("transport".to_string(), CategoryTotals { income: 0.0, expense: 300_000.0 });
        categories.insert("gaji".to_string(), CategoryTotals { income: 5_000_000.0, expense: 0.0 });
        let snap = FinancialSnapshot::from_totals(5_000_000.0, 400_000.0).with_categories(categories);

        let out = render(&Command::Report, Some(&snap));
        assert!(out.contains("• Gaji: Rp 5,000,000"));
        let transport = out.find("Transport").unwrap();
        let makanan = out.find("Makanan").unwrap();
        assert!(transport < makanan);

        let empty = render(&Command::Report, Some(&FinancialSnapshot::default()));
        assert!(empty.contains("belum memiliki transaksi untuk dilaporkan"));
    }

    #[test]
    fn test_budget_without_income_asks_for_data() {
        let out = render(&Command::BudgetAdvice, Some(&FinancialSnapshot::default()));
        assert!(out.contains("Saran Anggaran"));
        assert!(out.contains("belum melihat pemasukan"));
        assert!(out.contains("Mulai dengan"));
        assert_eq!(out, render(&Command::BudgetAdvice, None));
    }

    #[test]
    fn test_budget_with_data() {
        let mut snap = snapshot();
        snap.debt_total = 1_500_000.0;
        let out = render(&Command::BudgetAdvice, Some(&snap));
        assert!(out.contains("Ringkasan Keuangan Bulanan"));
        assert!(out.contains("Dana Darurat (15% pemasukan): Rp 937,500"));
        assert!(out.contains("Tabungan (30% saldo): Rp 525,000"));
        assert!(out.contains("Cicilan & tagihan tercatat: Rp 1,500,000"));
        assert!(out.contains("72.0%"));
        assert!(out.contains("di atas 60%"));
    }

    #[test]
    fn test_purchase_reply_contains_figures() {
        let cmd = Command::PurchasePlanning {
            item: "car".to_string(),
            price: 30_000_000.0,
        };
        let out = render(&cmd, Some(&snapshot()));
        assert!(out.contains("Analisis Beli Car"));
        assert!(out.contains("30,000,000"));
        assert!(out.contains("6,250,000"));
        assert!(out.contains("17 bulan"));
        assert!(out.contains("Tunggu & Nabung"));
        assert!(out.contains("Alternatif Lebih Murah"));
        assert!(out.contains("Saran Saya"));
    }

    #[test]
    fn test_purchase_without_data() {
        let cmd = Command::PurchasePlanning {
            item: "laptop gaming".to_string(),
            price: 15_000_000.0,
        };
        let out = render(&cmd, None);
        assert!(out.contains("Analisis Pembelian: Laptop Gaming"));
        assert!(out.contains("data keuangan kamu"));
        assert!(out.contains("Rp 15,000,000"));
    }

    #[test]
    fn test_unknown_reflects_text() {
        let out = render(
            &Command::Unknown {
                original_text: "saya bingung".to_string(),
            },
            None,
        );
        assert!(out.starts_with("Maaf, saya tidak mengerti perintah 'saya bingung'."));
        assert!(out.contains("Maksud kamu: \"kamu bingung\"?"));

        let blank = render(
            &Command::Unknown {
                original_text: String::new(),
            },
            None,
        );
        assert!(!blank.contains("Maksud kamu"));
    }

    #[test]
    fn test_assistant_messages() {
        assert_eq!(
            invalid_amount(TransactionKind::Income),
            "❌ Jumlah pemasukan harus lebih dari 0."
        );
        assert_eq!(delete_done(9), "✅ Transaksi ID 9 berhasil dihapus.");
        assert!(delete_not_found(9).contains("tidak ditemukan"));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("laptop gaming"), "Laptop Gaming");
        assert_eq!(title_case("MAKANAN"), "Makanan");
        assert_eq!(title_case("hp-baru"), "Hp-Baru");
    }
}
