/// Birth-date interpretation for the remedies dashboard.
///
/// Customer dates of birth are stored as a compact 6-digit `MMDDYY` code.
/// No century marker exists in the input, so the full year is inferred with
/// a fixed-threshold heuristic (see [`resolve_century`]). That heuristic is
/// ambiguous by construction for ages spanning both centuries; it is a
/// documented limitation, not something to silently "fix".
///
/// Validation is two-tier: [`validate_format`] is a cheap syntactic gate
/// (it accepts day 31 in any month), while [`resolve`] performs the
/// authoritative calendar construction and rejects impossible dates.
use chrono::{Datelike, Local, NaiveDate};

/// 12-year cyclical zodiac labels, indexed by `(year - 4) mod 12`.
pub const ZODIAC_SIGNS: [&str; 12] = [
    "Rat", "Ox", "Tiger", "Rabbit", "Dragon", "Snake",
    "Horse", "Goat", "Monkey", "Rooster", "Dog", "Pig",
];

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Result of interpreting a birth-date code against a concrete "today".
///
/// Recomputed on every call; `age` is a function of the current date, never
/// a stored fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBirthDate {
    pub age: i32,
    pub year: i32,
    pub zodiac: &'static str,
    pub date: NaiveDate,
}

/// Resolve a 2-digit year suffix to a full 4-digit year.
///
/// Suffixes strictly greater than 50 map to 19XX, the rest to 20XX. Every
/// caller that needs a century MUST route through this function; earlier
/// iterations of the site had a second, divergent inference path in the
/// display formatter.
pub fn resolve_century(year_suffix: u32) -> i32 {
    if year_suffix > 50 {
        1900 + year_suffix as i32
    } else {
        2000 + year_suffix as i32
    }
}

/// Split a code into (month, day, year-suffix), rejecting anything that is
/// not exactly 6 ASCII digits.
fn split_code(code: &str) -> Option<(u32, u32, u32)> {
    if code.len() != 6 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let month = code[0..2].parse().ok()?;
    let day = code[2..4].parse().ok()?;
    let year_suffix = code[4..6].parse().ok()?;

    Some((month, day, year_suffix))
}

/// Interpret a `MMDDYY` code against the current local date.
pub fn resolve(code: &str) -> Option<ResolvedBirthDate> {
    resolve_at(code, Local::now().date_naive())
}

/// Interpret a `MMDDYY` code against an explicit `today`.
///
/// Returns `None` for malformed length, non-digit content, or a
/// calendar-invalid month/day combination. Callers must treat `None` as
/// "cannot display age", never as a fault that aborts rendering.
pub fn resolve_at(code: &str, today: NaiveDate) -> Option<ResolvedBirthDate> {
    let (month, day, year_suffix) = split_code(code)?;
    let year = resolve_century(year_suffix);

    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    let mut age = today.year() - year;
    if (today.month(), today.day()) < (month, day) {
        age -= 1;
    }

    let zodiac = ZODIAC_SIGNS[(year - 4).rem_euclid(12) as usize];

    Some(ResolvedBirthDate {
        age,
        year,
        zodiac,
        date,
    })
}

/// Syntactic format gate: exactly 6 digits, month 1-12, day 1-31.
///
/// Deliberately no days-in-month or leap-year cross-check (day 31 in a
/// 30-day month passes); [`resolve`] is the authoritative calendar check.
pub fn validate_format(code: &str) -> bool {
    match split_code(code) {
        Some((month, day, _)) => (1..=12).contains(&month) && (1..=31).contains(&day),
        None => false,
    }
}

/// Format a code as `"<MonthName> <D>, <YYYY>"` for display.
///
/// Uses the same century rule as [`resolve`], so age and display always
/// agree on the year. Malformed input or an out-of-range month is returned
/// unchanged: display code fails visibly but never crashes a render.
pub fn format_for_display(code: &str) -> String {
    let Some((month, day, year_suffix)) = split_code(code) else {
        return code.to_string();
    };

    if !(1..=12).contains(&month) {
        return code.to_string();
    }

    let name = MONTH_NAMES[(month - 1) as usize];
    format!("{name} {day}, {}", resolve_century(year_suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn resolves_reference_code() {
        let resolved = resolve_at("021590", date(2024, 6, 15)).unwrap();

        assert_eq!(resolved.year, 1990);
        assert_eq!(resolved.age, 34);
        assert_eq!(resolved.zodiac, "Horse");
        assert_eq!(resolved.date, date(1990, 2, 15));
    }

    #[test]
    fn age_decrements_before_birthday() {
        // Birthday is Dec 31; by June the year hasn't been earned yet.
        let resolved = resolve_at("123190", date(2024, 6, 15)).unwrap();
        assert_eq!(resolved.age, 33);
    }

    #[test]
    fn age_counts_on_the_birthday_itself() {
        let resolved = resolve_at("061590", date(2024, 6, 15)).unwrap();
        assert_eq!(resolved.age, 34);
    }

    #[test]
    fn century_threshold_is_strict() {
        assert_eq!(resolve_century(50), 2050);
        assert_eq!(resolve_century(51), 1951);
        assert_eq!(resolve_century(0), 2000);
        assert_eq!(resolve_century(99), 1999);
    }

    #[test]
    fn rejects_wrong_length() {
        let today = date(2024, 6, 15);

        assert_eq!(resolve_at("", today), None);
        assert_eq!(resolve_at("12345", today), None);
        assert_eq!(resolve_at("1234567", today), None);
    }

    #[test]
    fn rejects_non_digit_content() {
        assert_eq!(resolve_at("02a590", date(2024, 6, 15)), None);
        assert_eq!(resolve_at("✓✓✓", date(2024, 6, 15)), None);
    }

    #[test]
    fn rejects_calendar_invalid_dates() {
        let today = date(2024, 6, 15);

        // Month 13.
        assert_eq!(resolve_at("131599", today), None);
        // Day 32.
        assert_eq!(resolve_at("013299", today), None);
        // Feb 30 parses syntactically but is not a real date.
        assert_eq!(resolve_at("023099", today), None);
    }

    #[test]
    fn resolve_is_deterministic_for_fixed_today() {
        let today = date(2024, 6, 15);
        assert_eq!(resolve_at("021590", today), resolve_at("021590", today));
    }

    #[test]
    fn validate_format_accepts_valid_codes() {
        assert!(validate_format("021590"));
        assert!(validate_format("123100"));
    }

    #[test]
    fn validate_format_rejects_month_out_of_range() {
        assert!(!validate_format("131599"));
        assert!(!validate_format("001599"));
    }

    #[test]
    fn validate_format_is_syntactic_only() {
        // Feb 31 is impossible but passes the format gate.
        assert!(validate_format("023199"));
        // The calendar check catches it.
        assert_eq!(resolve_at("023199", date(2024, 6, 15)), None);
    }

    #[test]
    fn validate_format_rejects_malformed_input() {
        assert!(!validate_format(""));
        assert!(!validate_format("12345"));
        assert!(!validate_format("02159a"));
    }

    #[test]
    fn formats_for_display() {
        assert_eq!(format_for_display("021590"), "February 15, 1990");
        assert_eq!(format_for_display("120503"), "December 5, 2003");
    }

    #[test]
    fn display_century_matches_resolve() {
        let resolved = resolve_at("120503", date(2024, 6, 15)).unwrap();
        assert_eq!(resolved.year, 2003);
        assert!(format_for_display("120503").ends_with("2003"));
    }

    #[test]
    fn display_passes_malformed_input_through() {
        assert_eq!(format_for_display("1234"), "1234");
        assert_eq!(format_for_display("131599"), "131599");
        assert_eq!(format_for_display("02x590"), "02x590");
    }

    #[test]
    fn display_is_idempotent_on_passthrough() {
        let once = format_for_display("1234");
        let twice = format_for_display(&once);
        assert_eq!(once, twice);
    }
}
