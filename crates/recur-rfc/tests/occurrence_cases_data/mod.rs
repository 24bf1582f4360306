use chrono::{NaiveDate, NaiveDateTime};
use recur_rfc::rfc::rrule::{ExpansionOptions, OccurrenceFinder, RecurrenceRule};

pub struct OccurrenceCase {
    pub name: &'static str,
    pub rule: &'static str,
    pub start: &'static str,
    pub base: Option<&'static str>,
    pub base_count: u32,
    pub amount: usize,
    pub from: Option<&'static str>,
    pub include_start: bool,
    pub expected: &'static [&'static str],
}

pub struct BetweenCase {
    pub name: &'static str,
    pub rule: &'static str,
    pub start: &'static str,
    pub window_start: &'static str,
    pub window_end: &'static str,
    pub expected: &'static [&'static str],
}

#[expect(clippy::too_many_lines)]
pub fn occurrence_cases() -> Vec<OccurrenceCase> {
    vec![
        OccurrenceCase {
            name: "daily_basic",
            rule: "RRULE:FREQ=DAILY",
            start: "2019-01-01",
            base: None,
            base_count: 1,
            amount: 5,
            from: None,
            include_start: true,
            expected: &[
                "2019-01-01",
                "2019-01-02",
                "2019-01-03",
                "2019-01-04",
                "2019-01-05",
            ],
        },
        OccurrenceCase {
            name: "daily_from_date",
            rule: "RRULE:FREQ=DAILY",
            start: "2019-01-01",
            base: None,
            base_count: 1,
            amount: 3,
            from: Some("2019-01-03"),
            include_start: true,
            expected: &[
                "2019-01-03",
                "2019-01-04",
                "2019-01-05",
            ],
        },
        OccurrenceCase {
            name: "daily_interval_3",
            rule: "RRULE:FREQ=DAILY;INTERVAL=3",
            start: "2019-01-01",
            base: None,
            base_count: 1,
            amount: 5,
            from: None,
            include_start: true,
            expected: &[
                "2019-01-01",
                "2019-01-04",
                "2019-01-07",
                "2019-01-10",
                "2019-01-13",
            ],
        },
        OccurrenceCase {
            name: "daily_until",
            rule: "RRULE:FREQ=DAILY;UNTIL=20190103",
            start: "2019-01-01",
            base: None,
            base_count: 1,
            amount: 1000,
            from: None,
            include_start: true,
            expected: &[
                "2019-01-01",
                "2019-01-02",
                "2019-01-03",
            ],
        },
        OccurrenceCase {
            name: "daily_count",
            rule: "RRULE:FREQ=DAILY;COUNT=5",
            start: "2019-01-01",
            base: None,
            base_count: 1,
            amount: 1000,
            from: None,
            include_start: true,
            expected: &[
                "2019-01-01",
                "2019-01-02",
                "2019-01-03",
                "2019-01-04",
                "2019-01-05",
            ],
        },
        OccurrenceCase {
            name: "daily_based_on_count",
            rule: "RRULE:FREQ=DAILY;COUNT=5",
            start: "2019-01-01",
            base: Some("2019-01-03"),
            base_count: 3,
            amount: 1000,
            from: None,
            include_start: true,
            expected: &[
                "2019-01-03",
                "2019-01-04",
                "2019-01-05",
            ],
        },
        OccurrenceCase {
            name: "daily_based_on_count_from_date",
            rule: "RRULE:FREQ=DAILY;COUNT=6",
            start: "2019-01-01",
            base: Some("2019-01-03"),
            base_count: 3,
            amount: 1000,
            from: Some("2019-01-05"),
            include_start: true,
            expected: &[
                "2019-01-05",
                "2019-01-06",
            ],
        },
        OccurrenceCase {
            name: "daily_excluding_start",
            rule: "RRULE:FREQ=DAILY",
            start: "2019-01-01",
            base: None,
            base_count: 1,
            amount: 2,
            from: None,
            include_start: false,
            expected: &[
                "2019-01-02",
                "2019-01-03",
            ],
        },
        OccurrenceCase {
            name: "daily_keeps_time_of_day",
            rule: "RRULE:FREQ=DAILY",
            start: "2020-07-29T07:34:12",
            base: None,
            base_count: 1,
            amount: 3,
            from: None,
            include_start: true,
            expected: &[
                "2020-07-29T07:34:12",
                "2020-07-30T07:34:12",
                "2020-07-31T07:34:12",
            ],
        },
        OccurrenceCase {
            name: "weekly_same_day",
            rule: "RRULE:FREQ=WEEKLY",
            start: "2019-01-01",
            base: None,
            base_count: 1,
            amount: 5,
            from: None,
            include_start: true,
            expected: &[
                "2019-01-01",
                "2019-01-08",
                "2019-01-15",
                "2019-01-22",
                "2019-01-29",
            ],
        },
        OccurrenceCase {
            name: "weekly_set_days",
            rule: "RRULE:FREQ=WEEKLY;BYDAY=SU,MO,WE",
            start: "2019-01-01",
            base: None,
            base_count: 1,
            amount: 5,
            from: None,
            include_start: true,
            expected: &[
                "2019-01-02",
                "2019-01-06",
                "2019-01-07",
                "2019-01-09",
                "2019-01-13",
            ],
        },
        OccurrenceCase {
            name: "weekly_from_date",
            rule: "RRULE:FREQ=WEEKLY;BYDAY=SU",
            start: "2019-01-01",
            base: None,
            base_count: 1,
            amount: 3,
            from: Some("2019-01-05"),
            include_start: true,
            expected: &[
                "2019-01-06",
                "2019-01-13",
                "2019-01-20",
            ],
        },
        OccurrenceCase {
            name: "weekly_every_day_interval_2",
            rule: "RRULE:FREQ=WEEKLY;INTERVAL=2;BYDAY=SU,MO,TU,WE,TH,FR,SA",
            start: "2019-01-01",
            base: None,
            base_count: 1,
            amount: 8,
            from: None,
            include_start: true,
            expected: &[
                "2019-01-01",
                "2019-01-02",
                "2019-01-03",
                "2019-01-04",
                "2019-01-05",
                "2019-01-13",
                "2019-01-14",
                "2019-01-15",
            ],
        },
        OccurrenceCase {
            name: "weekly_interval_3",
            rule: "RRULE:FREQ=WEEKLY;INTERVAL=3",
            start: "2019-01-01",
            base: None,
            base_count: 1,
            amount: 5,
            from: None,
            include_start: true,
            expected: &[
                "2019-01-01",
                "2019-01-22",
                "2019-02-12",
                "2019-03-05",
                "2019-03-26",
            ],
        },
        OccurrenceCase {
            name: "weekly_until",
            rule: "RRULE:FREQ=WEEKLY;UNTIL=20190115",
            start: "2019-01-01",
            base: None,
            base_count: 1,
            amount: 1000,
            from: None,
            include_start: true,
            expected: &[
                "2019-01-01",
                "2019-01-08",
                "2019-01-15",
            ],
        },
        OccurrenceCase {
            name: "weekly_count",
            rule: "RRULE:FREQ=WEEKLY;COUNT=4",
            start: "2019-01-01",
            base: None,
            base_count: 1,
            amount: 1000,
            from: None,
            include_start: true,
            expected: &[
                "2019-01-01",
                "2019-01-08",
                "2019-01-15",
                "2019-01-22",
            ],
        },
        OccurrenceCase {
            name: "weekly_based_on_count",
            rule: "RRULE:FREQ=WEEKLY;COUNT=5",
            start: "2019-01-01",
            base: Some("2019-01-15"),
            base_count: 3,
            amount: 1000,
            from: None,
            include_start: true,
            expected: &[
                "2019-01-15",
                "2019-01-22",
                "2019-01-29",
            ],
        },
        OccurrenceCase {
            name: "weekly_based_on_count_from_date",
            rule: "RRULE:FREQ=WEEKLY;COUNT=5",
            start: "2019-01-01",
            base: Some("2019-01-15"),
            base_count: 3,
            amount: 1000,
            from: Some("2019-01-22"),
            include_start: true,
            expected: &[
                "2019-01-22",
                "2019-01-29",
            ],
        },
        OccurrenceCase {
            name: "weekly_excluding_start",
            rule: "RRULE:FREQ=WEEKLY",
            start: "2019-01-01",
            base: None,
            base_count: 1,
            amount: 2,
            from: None,
            include_start: false,
            expected: &[
                "2019-01-08",
                "2019-01-15",
            ],
        },
        OccurrenceCase {
            name: "weekly_excluding_start_not_an_occurrence",
            rule: "RRULE:FREQ=WEEKLY;BYDAY=WE,TH",
            start: "2019-01-01",
            base: None,
            base_count: 1,
            amount: 2,
            from: None,
            include_start: false,
            expected: &[
                "2019-01-02",
                "2019-01-03",
            ],
        },
        OccurrenceCase {
            name: "monthly_basic",
            rule: "RRULE:FREQ=MONTHLY",
            start: "2019-01-01",
            base: None,
            base_count: 1,
            amount: 5,
            from: None,
            include_start: true,
            expected: &[
                "2019-01-01",
                "2019-02-01",
                "2019-03-01",
                "2019-04-01",
                "2019-05-01",
            ],
        },
        OccurrenceCase {
            name: "monthly_from_date",
            rule: "RRULE:FREQ=MONTHLY",
            start: "2019-01-01",
            base: None,
            base_count: 1,
            amount: 3,
            from: Some("2020-05-05"),
            include_start: true,
            expected: &[
                "2020-06-01",
                "2020-07-01",
                "2020-08-01",
            ],
        },
        OccurrenceCase {
            name: "monthly_31st_interval_3",
            rule: "RRULE:FREQ=MONTHLY;INTERVAL=3",
            start: "2019-01-31",
            base: None,
            base_count: 1,
            amount: 4,
            from: None,
            include_start: true,
            expected: &[
                "2019-01-31",
                "2019-07-31",
                "2019-10-31",
                "2020-01-31",
            ],
        },
        OccurrenceCase {
            name: "monthly_third_tuesday",
            rule: "RRULE:FREQ=MONTHLY;BYDAY=3TU",
            start: "2019-01-15",
            base: None,
            base_count: 1,
            amount: 5,
            from: None,
            include_start: true,
            expected: &[
                "2019-01-15",
                "2019-02-19",
                "2019-03-19",
                "2019-04-16",
                "2019-05-21",
            ],
        },
        OccurrenceCase {
            name: "monthly_last_day",
            rule: "RRULE:FREQ=MONTHLY;BYMONTHDAY=-1",
            start: "2019-01-15",
            base: None,
            base_count: 1,
            amount: 5,
            from: None,
            include_start: true,
            expected: &[
                "2019-01-31",
                "2019-02-28",
                "2019-03-31",
                "2019-04-30",
                "2019-05-31",
            ],
        },
        OccurrenceCase {
            name: "monthly_15th_to_last_day",
            rule: "RRULE:FREQ=MONTHLY;BYMONTHDAY=-15",
            start: "2019-01-01",
            base: None,
            base_count: 1,
            amount: 5,
            from: None,
            include_start: true,
            expected: &[
                "2019-01-17",
                "2019-02-14",
                "2019-03-17",
                "2019-04-16",
                "2019-05-17",
            ],
        },
        OccurrenceCase {
            name: "monthly_last_thursday",
            rule: "RRULE:FREQ=MONTHLY;BYDAY=-1TH",
            start: "2019-01-31",
            base: None,
            base_count: 1,
            amount: 5,
            from: None,
            include_start: true,
            expected: &[
                "2019-01-31",
                "2019-02-28",
                "2019-03-28",
                "2019-04-25",
                "2019-05-30",
            ],
        },
        OccurrenceCase {
            name: "monthly_interval_3",
            rule: "RRULE:FREQ=MONTHLY;INTERVAL=3",
            start: "2019-01-01",
            base: None,
            base_count: 1,
            amount: 5,
            from: None,
            include_start: true,
            expected: &[
                "2019-01-01",
                "2019-04-01",
                "2019-07-01",
                "2019-10-01",
                "2020-01-01",
            ],
        },
        OccurrenceCase {
            name: "monthly_until",
            rule: "RRULE:FREQ=MONTHLY;UNTIL=20190301",
            start: "2019-01-01",
            base: None,
            base_count: 1,
            amount: 1000,
            from: None,
            include_start: true,
            expected: &[
                "2019-01-01",
                "2019-02-01",
                "2019-03-01",
            ],
        },
        OccurrenceCase {
            name: "monthly_count",
            rule: "RRULE:FREQ=MONTHLY;COUNT=5",
            start: "2019-01-01",
            base: None,
            base_count: 1,
            amount: 1000,
            from: None,
            include_start: true,
            expected: &[
                "2019-01-01",
                "2019-02-01",
                "2019-03-01",
                "2019-04-01",
                "2019-05-01",
            ],
        },
        OccurrenceCase {
            name: "monthly_based_on_count",
            rule: "RRULE:FREQ=MONTHLY;COUNT=5",
            start: "2019-01-01",
            base: Some("2019-03-01"),
            base_count: 3,
            amount: 1000,
            from: None,
            include_start: true,
            expected: &[
                "2019-03-01",
                "2019-04-01",
                "2019-05-01",
            ],
        },
        OccurrenceCase {
            name: "monthly_based_on_count_from_date",
            rule: "RRULE:FREQ=MONTHLY;COUNT=6",
            start: "2019-01-01",
            base: Some("2019-03-01"),
            base_count: 3,
            amount: 1000,
            from: Some("2019-05-01"),
            include_start: true,
            expected: &[
                "2019-05-01",
                "2019-06-01",
            ],
        },
        OccurrenceCase {
            name: "monthly_last_day_from_between_occurrences",
            rule: "RRULE:FREQ=MONTHLY;BYMONTHDAY=-1;COUNT=6",
            start: "2019-02-28",
            base: None,
            base_count: 1,
            amount: 3,
            from: Some("2019-03-30"),
            include_start: true,
            expected: &[
                "2019-03-31",
                "2019-04-30",
                "2019-05-31",
            ],
        },
        OccurrenceCase {
            name: "monthly_excluding_start",
            rule: "RRULE:FREQ=MONTHLY",
            start: "2019-01-01",
            base: None,
            base_count: 1,
            amount: 2,
            from: None,
            include_start: false,
            expected: &[
                "2019-02-01",
                "2019-03-01",
            ],
        },
        OccurrenceCase {
            name: "yearly_basic",
            rule: "RRULE:FREQ=YEARLY",
            start: "2019-03-23",
            base: None,
            base_count: 1,
            amount: 5,
            from: None,
            include_start: true,
            expected: &[
                "2019-03-23",
                "2020-03-23",
                "2021-03-23",
                "2022-03-23",
                "2023-03-23",
            ],
        },
        OccurrenceCase {
            name: "yearly_interval_3",
            rule: "RRULE:FREQ=YEARLY;INTERVAL=3",
            start: "2019-01-01",
            base: None,
            base_count: 1,
            amount: 5,
            from: None,
            include_start: true,
            expected: &[
                "2019-01-01",
                "2022-01-01",
                "2025-01-01",
                "2028-01-01",
                "2031-01-01",
            ],
        },
        OccurrenceCase {
            name: "yearly_until",
            rule: "RRULE:FREQ=YEARLY;UNTIL=20210101",
            start: "2019-01-01",
            base: None,
            base_count: 1,
            amount: 1000,
            from: None,
            include_start: true,
            expected: &[
                "2019-01-01",
                "2020-01-01",
                "2021-01-01",
            ],
        },
        OccurrenceCase {
            name: "yearly_count",
            rule: "RRULE:FREQ=YEARLY;COUNT=5",
            start: "2019-01-01",
            base: None,
            base_count: 1,
            amount: 1000,
            from: None,
            include_start: true,
            expected: &[
                "2019-01-01",
                "2020-01-01",
                "2021-01-01",
                "2022-01-01",
                "2023-01-01",
            ],
        },
        OccurrenceCase {
            name: "yearly_based_on_count",
            rule: "RRULE:FREQ=YEARLY;COUNT=5",
            start: "2019-01-01",
            base: Some("2021-01-01"),
            base_count: 3,
            amount: 1000,
            from: None,
            include_start: true,
            expected: &[
                "2021-01-01",
                "2022-01-01",
                "2023-01-01",
            ],
        },
        OccurrenceCase {
            name: "yearly_based_on_count_from_date",
            rule: "RRULE:FREQ=YEARLY;COUNT=5",
            start: "2019-01-01",
            base: Some("2021-01-01"),
            base_count: 3,
            amount: 1000,
            from: Some("2022-01-01"),
            include_start: true,
            expected: &[
                "2022-01-01",
                "2023-01-01",
            ],
        },
        OccurrenceCase {
            name: "yearly_excluding_start",
            rule: "RRULE:FREQ=YEARLY",
            start: "2019-01-01",
            base: None,
            base_count: 1,
            amount: 2,
            from: None,
            include_start: false,
            expected: &[
                "2020-01-01",
                "2021-01-01",
            ],
        },
        OccurrenceCase {
            name: "yearly_excluding_start_based_on",
            rule: "RRULE:FREQ=YEARLY",
            start: "2019-01-01",
            base: Some("2021-01-01"),
            base_count: 2,
            amount: 2,
            from: None,
            include_start: false,
            expected: &[
                "2022-01-01",
                "2023-01-01",
            ],
        },
        OccurrenceCase {
            name: "yearly_feb_29",
            rule: "RRULE:FREQ=YEARLY",
            start: "2096-02-29",
            base: None,
            base_count: 1,
            amount: 4,
            from: None,
            include_start: true,
            expected: &[
                "2096-02-29",
                "2104-02-29",
                "2108-02-29",
                "2112-02-29",
            ],
        },
        OccurrenceCase {
            name: "does_not_repeat",
            rule: "RRULE:FREQ=NONE",
            start: "2019-01-01",
            base: None,
            base_count: 1,
            amount: 10,
            from: None,
            include_start: true,
            expected: &[
                "2019-01-01",
            ],
        },
        OccurrenceCase {
            name: "does_not_repeat_from_after_start",
            rule: "RRULE:FREQ=NONE",
            start: "2019-01-01",
            base: None,
            base_count: 1,
            amount: 10,
            from: Some("2019-01-02"),
            include_start: true,
            expected: &[],
        },
    ]
}

pub fn between_cases() -> Vec<BetweenCase> {
    vec![
        BetweenCase {
            name: "between_daily",
            rule: "RRULE:FREQ=DAILY",
            start: "2019-01-01",
            window_start: "2019-01-27",
            window_end: "2019-01-30",
            expected: &["2019-01-27", "2019-01-28", "2019-01-29"],
        },
        BetweenCase {
            name: "between_with_count",
            rule: "RRULE:FREQ=DAILY;COUNT=7",
            start: "2019-01-01",
            window_start: "2019-01-04",
            window_end: "2019-01-10",
            expected: &["2019-01-04", "2019-01-05", "2019-01-06", "2019-01-07"],
        },
        BetweenCase {
            name: "between_no_occurrences",
            rule: "RRULE:FREQ=MONTHLY",
            start: "2019-01-01",
            window_start: "2019-01-04",
            window_end: "2019-01-10",
            expected: &[],
        },
        BetweenCase {
            name: "between_count_with_start_not_an_occurrence",
            rule: "RRULE:FREQ=WEEKLY;BYDAY=MO;COUNT=3",
            start: "2019-01-01",
            window_start: "2019-01-10",
            window_end: "2019-03-01",
            expected: &["2019-01-14", "2019-01-21"],
        },
        BetweenCase {
            name: "between_weekly_days",
            rule: "RRULE:FREQ=WEEKLY;BYDAY=MO,FR",
            start: "2019-01-01",
            window_start: "2019-01-07",
            window_end: "2019-01-18",
            expected: &["2019-01-07", "2019-01-11", "2019-01-14"],
        },
    ]
}

pub fn assert_case(case: &OccurrenceCase) {
    let rule = parse_rule(case.name, case.rule);
    let start = parse_date(case.start);
    let options = ExpansionOptions {
        from: case.from.map(parse_date),
        include_start: case.include_start,
    };
    let finder = OccurrenceFinder::new();

    let actual = match case.base {
        Some(base) => finder.expand_from(
            &rule,
            start,
            parse_date(base),
            case.base_count,
            case.amount,
            &options,
        ),
        None => finder.find(&rule, start, case.amount, &options),
    }
    .unwrap_or_else(|err| panic!("Case {} failed to expand: {err}", case.name));

    let expected: Vec<NaiveDateTime> = case.expected.iter().copied().map(parse_date).collect();
    assert_eq!(actual, expected, "Case {} did not match", case.name);
}

pub fn assert_between_case(case: &BetweenCase) {
    let rule = parse_rule(case.name, case.rule);
    let actual = OccurrenceFinder::new()
        .find_between(
            &rule,
            parse_date(case.start),
            parse_date(case.window_start),
            parse_date(case.window_end),
        )
        .unwrap_or_else(|err| panic!("Case {} failed to expand: {err}", case.name));

    let expected: Vec<NaiveDateTime> = case.expected.iter().copied().map(parse_date).collect();
    assert_eq!(actual, expected, "Case {} did not match", case.name);
}

fn parse_rule(name: &str, text: &str) -> RecurrenceRule {
    text.parse()
        .unwrap_or_else(|err| panic!("Case {name} has an invalid rule {text}: {err}"))
}

fn parse_date(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map(|date| date.and_hms_opt(0, 0, 0).unwrap_or_default())
        })
        .unwrap_or_else(|err| panic!("Failed to parse date {value}: {err}"))
}
