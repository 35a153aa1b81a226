use chrono::{Datelike, Months, NaiveDate};

/// first day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    // day 1 exists in every month
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap()
}

/// last day of the month containing `date`
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let last = days_in_month(date.year(), date.month());
    NaiveDate::from_ymd_opt(date.year(), date.month(), last).unwrap()
}

/// add calendar months, saturating at the calendar boundary
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// true if both dates fall in the same calendar month
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// whole calendar months between two dates, truncated toward zero.
/// A partial trailing month does not count.
pub fn whole_months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    let mut months =
        (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    if months > 0 && to.day() < from.day() {
        months -= 1;
    } else if months < 0 && to.day() > from.day() {
        months += 1;
    }
    months
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_month_alignment() {
        assert_eq!(month_start(d(2024, 4, 15)), d(2024, 4, 1));
        assert_eq!(month_start(d(2024, 4, 1)), d(2024, 4, 1));
        assert_eq!(month_end(d(2024, 4, 15)), d(2024, 4, 30));
        assert_eq!(month_end(d(2024, 2, 1)), d(2024, 2, 29)); // leap year
        assert_eq!(month_end(d(2023, 2, 10)), d(2023, 2, 28));
        assert_eq!(month_end(d(2024, 12, 31)), d(2024, 12, 31));
    }

    #[test]
    fn test_add_months() {
        assert_eq!(add_months(d(2024, 1, 1), 1), d(2024, 2, 1));
        assert_eq!(add_months(d(2024, 11, 1), 3), d(2025, 2, 1));
        // clamps to the shorter month
        assert_eq!(add_months(d(2024, 1, 31), 1), d(2024, 2, 29));
        assert_eq!(add_months(d(2024, 6, 1), 0), d(2024, 6, 1));
    }

    #[test]
    fn test_whole_months_between() {
        assert_eq!(whole_months_between(d(2024, 1, 1), d(2024, 4, 1)), 3);
        // partial trailing month is truncated
        assert_eq!(whole_months_between(d(2024, 1, 15), d(2024, 4, 10)), 2);
        assert_eq!(whole_months_between(d(2024, 1, 15), d(2024, 4, 15)), 3);
        assert_eq!(whole_months_between(d(2024, 4, 1), d(2024, 4, 30)), 0);
        // negative when the interval runs backwards
        assert_eq!(whole_months_between(d(2024, 6, 1), d(2024, 3, 1)), -3);
        assert_eq!(whole_months_between(d(2024, 6, 10), d(2024, 3, 20)), -2);
    }

    #[test]
    fn test_same_month() {
        assert!(same_month(d(2024, 4, 1), d(2024, 4, 30)));
        assert!(!same_month(d(2024, 4, 30), d(2024, 5, 1)));
        assert!(!same_month(d(2023, 4, 1), d(2024, 4, 1)));
    }
}
