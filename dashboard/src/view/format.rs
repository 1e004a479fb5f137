//! Display formatting for money, dates, and statuses.
//!
//! The shop runs in Indonesian: rupiah amounts use dot-grouped thousands
//! with no decimals (`Rp50.000`), dates follow the `id-ID` locale, and
//! status labels are the ones operators know from the counter.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

const MONTHS_LONG: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

const WEEKDAYS_LONG: [&str; 7] = [
    "Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu", "Minggu",
];

/// Group an absolute integer with dots every three digits.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (index + 3 - offset) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// Format a rupiah amount: `50000` becomes `Rp50.000`, `0` becomes `Rp0`.
#[must_use]
pub fn format_currency(amount: i64) -> String {
    let grouped = group_thousands(amount.unsigned_abs());
    if amount < 0 {
        format!("-Rp{grouped}")
    } else {
        format!("Rp{grouped}")
    }
}

/// Format a plain count with dot thousand separators.
#[must_use]
pub fn format_number(value: u64) -> String {
    group_thousands(value)
}

/// Short date: `19 Jun 2025`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    let month = MONTHS_SHORT[date.month0() as usize];
    format!("{} {} {}", date.day(), month, date.year())
}

/// Long date with weekday: `Kamis, 19 Juni 2025`.
#[must_use]
pub fn format_date_long(date: NaiveDate) -> String {
    let weekday = WEEKDAYS_LONG[date.weekday().num_days_from_monday() as usize];
    let month = MONTHS_LONG[date.month0() as usize];
    format!("{}, {} {} {}", weekday, date.day(), month, date.year())
}

/// Clock time: `14:30`.
#[must_use]
pub fn format_time(timestamp: DateTime<Utc>) -> String {
    format!("{:02}:{:02}", timestamp.hour(), timestamp.minute())
}

/// Short date plus time: `19 Jun 2025 14:30`.
#[must_use]
pub fn format_date_time(timestamp: DateTime<Utc>) -> String {
    format!(
        "{} {}",
        format_date(timestamp.date_naive()),
        format_time(timestamp)
    )
}

/// Relative age of `then` as seen from `now`, falling back to the short
/// date once it is a week old.
#[must_use]
pub fn relative_time(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    if seconds < 60 {
        return "Baru saja".to_owned();
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{minutes} menit yang lalu");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours} jam yang lalu");
    }
    let days = hours / 24;
    if days < 7 {
        return format!("{days} hari yang lalu");
    }
    format_date(then.date_naive())
}

/// Operator-facing label for a booking or payment status key.
#[must_use]
pub fn status_label(status: &str) -> &str {
    match status {
        "pending" => "Menunggu",
        "confirmed" => "Dikonfirmasi",
        "in_progress" => "Sedang Berlangsung",
        "completed" => "Selesai",
        "cancelled" => "Dibatalkan",
        "no_show" => "Tidak Hadir",
        "paid" => "Dibayar",
        "failed" => "Gagal",
        "refunded" => "Dikembalikan",
        other => other,
    }
}

/// CSS badge classes for a status key; unknown keys get the pending look.
#[must_use]
pub fn status_badge_class(status: &str) -> String {
    let colour = match status {
        "confirmed" => "badge-blue",
        "in_progress" => "badge-purple",
        "completed" | "paid" => "badge-green",
        "cancelled" | "failed" => "badge-red",
        "no_show" => "badge-gray",
        _ => "badge-yellow",
    };
    format!("badge {colour}")
}

/// Up to two uppercase initials from a full name.
#[must_use]
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Truncate to `length` characters, appending an ellipsis when cut.
#[must_use]
pub fn truncate(text: &str, length: usize) -> String {
    if text.chars().count() <= length {
        return text.to_owned();
    }
    let cut: String = text.chars().take(length).collect();
    format!("{cut}...")
}

/// Share of `value` in `total` as a whole-number percentage string.
#[must_use]
pub fn percentage(value: u64, total: u64) -> String {
    if total == 0 {
        return "0%".to_owned();
    }
    #[expect(clippy::cast_precision_loss, reason = "counts stay far below 2^52")]
    let share = (value as f64 / total as f64 * 100.0).round();
    format!("{share:.0}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case(0, "Rp0")]
    #[case(500, "Rp500")]
    #[case(50_000, "Rp50.000")]
    #[case(1_250_000, "Rp1.250.000")]
    #[case(-75_000, "-Rp75.000")]
    fn currency_uses_dot_grouped_rupiah(#[case] amount: i64, #[case] expected: &str) {
        assert_eq!(format_currency(amount), expected);
    }

    #[test]
    fn dates_render_in_indonesian() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 19).expect("valid date");
        assert_eq!(format_date(date), "19 Jun 2025");
        assert_eq!(format_date_long(date), "Kamis, 19 Juni 2025");
    }

    #[rstest]
    #[case(30, "Baru saja")]
    #[case(5 * 60, "5 menit yang lalu")]
    #[case(3 * 3600, "3 jam yang lalu")]
    #[case(2 * 86_400, "2 hari yang lalu")]
    fn recent_timestamps_render_relative(#[case] age_seconds: i64, #[case] expected: &str) {
        let now = Utc.with_ymd_and_hms(2025, 6, 19, 12, 0, 0).single().expect("valid");
        let then = now - chrono::Duration::seconds(age_seconds);
        assert_eq!(relative_time(now, then), expected);
    }

    #[test]
    fn old_timestamps_fall_back_to_the_short_date() {
        let now = Utc.with_ymd_and_hms(2025, 6, 19, 12, 0, 0).single().expect("valid");
        let then = now - chrono::Duration::days(10);
        assert_eq!(relative_time(now, then), "9 Jun 2025");
    }

    #[rstest]
    #[case("pending", "Menunggu")]
    #[case("in_progress", "Sedang Berlangsung")]
    #[case("refunded", "Dikembalikan")]
    #[case("mystery", "mystery")]
    fn status_labels_are_indonesian(#[case] status: &str, #[case] expected: &str) {
        assert_eq!(status_label(status), expected);
    }

    #[test]
    fn unknown_statuses_get_the_pending_badge() {
        assert_eq!(status_badge_class("mystery"), "badge badge-yellow");
        assert_eq!(status_badge_class("completed"), "badge badge-green");
    }

    #[rstest]
    #[case("Budi Santoso", "BS")]
    #[case("ayu", "A")]
    #[case("Putu Gede Arya Wijaya", "PG")]
    fn initials_take_at_most_two_letters(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(initials(name), expected);
    }

    #[test]
    fn truncate_appends_an_ellipsis_only_when_cutting() {
        assert_eq!(truncate("pendek", 10), "pendek");
        assert_eq!(truncate("sebuah catatan panjang", 6), "sebuah...");
    }

    #[rstest]
    #[case(0, 0, "0%")]
    #[case(25, 100, "25%")]
    #[case(1, 3, "33%")]
    fn percentages_round_to_whole_numbers(
        #[case] value: u64,
        #[case] total: u64,
        #[case] expected: &str,
    ) {
        assert_eq!(percentage(value, total), expected);
    }
}
