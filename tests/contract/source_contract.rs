use std::collections::BTreeSet;
use std::sync::Arc;

use time::macros::date;
use time::{Date, Duration, Weekday};

use workday_core::{
    parse_date_list, DateSetSource, ExternalSource, SharedSource, WeekdaySource,
    WorkingDayServiceBuilder, WorkingDaySource, WorkingDaySourceExt,
};

#[derive(Clone)]
struct SourceCase {
    name: &'static str,
    source: SharedSource,
}

fn source_cases() -> Vec<SourceCase> {
    let literal = ExternalSource::from_content(
        "2018-05-14\n2018-05-15\n2018-05-28",
        |content: &str| parse_date_list(content).map(BTreeSet::from_iter),
        |date, dates: &BTreeSet<Date>| dates.contains(&date),
    )
    .expect("literal content should parse");

    let nested = WorkingDayServiceBuilder::new()
        .with_weekend_source()
        .with_holidays([date!(2018 - 05 - 28)])
        .build();

    vec![
        SourceCase {
            name: "weekend",
            source: Arc::new(WeekdaySource::weekend()),
        },
        SourceCase {
            name: "monday_to_friday",
            source: Arc::new(WeekdaySource::monday_to_friday()),
        },
        SourceCase {
            name: "mondays_and_tuesdays",
            source: Arc::new(WeekdaySource::non_working([Weekday::Monday, Weekday::Tuesday])),
        },
        SourceCase {
            name: "date_set",
            source: Arc::new(DateSetSource::new([date!(2018 - 05 - 16), date!(2018 - 12 - 25)])),
        },
        SourceCase {
            name: "external_literal",
            source: Arc::new(literal),
        },
        SourceCase {
            name: "empty_service",
            source: Arc::new(WorkingDayServiceBuilder::new().build()),
        },
        SourceCase {
            name: "nested_service",
            source: Arc::new(nested),
        },
    ]
}

fn sample_days() -> impl Iterator<Item = Date> {
    let start = date!(2018 - 05 - 01);
    (0..60).map(move |offset| start + Duration::days(offset))
}

#[test]
fn working_and_non_working_are_negations_for_every_source() {
    for case in source_cases() {
        for day in sample_days() {
            assert_eq!(
                case.source.is_working_day(day),
                !case.source.is_non_working_day(day),
                "source '{}' disagrees with itself on {day}",
                case.name
            );
        }
    }
}

#[test]
fn weekday_defaults_agree_over_a_full_week() {
    let weekend = WeekdaySource::weekend();
    let weekdays = WeekdaySource::monday_to_friday();
    let monday = date!(2018 - 05 - 14);

    for offset in 0..7 {
        let day = monday + Duration::days(offset);
        assert_eq!(
            weekend.is_working_day(day),
            weekdays.is_working_day(day),
            "defaults disagree on {day}"
        );
    }
}

#[test]
fn classification_is_deterministic_across_calls() {
    for case in source_cases() {
        for day in sample_days() {
            assert_eq!(
                case.source.classify(day),
                case.source.classify(day),
                "source '{}' changed its mind on {day}",
                case.name
            );
        }
    }
}
