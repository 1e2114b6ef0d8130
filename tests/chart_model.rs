use country_explorer::PopulationSample;
use country_explorer::viz::{PopulationChart, format_grouped, format_population, map_locale};

fn s(year: i32, value: Option<f64>) -> PopulationSample {
    PopulationSample { year, value }
}

#[test]
fn compact_labels() {
    assert_eq!(format_population(500.0), "500");
    assert_eq!(format_population(999.4), "999");
    assert_eq!(format_population(1_500.0), "1.5K");
    assert_eq!(format_population(2_500_000.0), "2.5M");
    assert_eq!(format_population(3_200_000_000.0), "3.2B");
    assert_eq!(format_population(1_000_000_000.0), "1.0B");
}

#[test]
fn full_numbers_are_grouped_per_locale() {
    assert_eq!(format_grouped(83_196_078.0, map_locale("en")), "83,196,078");
    assert_eq!(format_grouped(83_196_078.0, map_locale("de")), "83.196.078");
    // Unknown tags fall back to English.
    assert_eq!(format_grouped(1_000.0, map_locale("xx")), "1,000");
}

#[test]
fn no_valid_samples_is_unavailable() {
    assert_eq!(PopulationChart::from_samples(&[]), PopulationChart::Unavailable);
    let chart = PopulationChart::from_samples(&[s(2000, None), s(2001, Some(0.0)), s(2002, Some(-4.0))]);
    assert_eq!(chart, PopulationChart::Unavailable);
    assert!(chart.is_placeholder());
}

#[test]
fn one_valid_sample_is_insufficient() {
    let chart = PopulationChart::from_samples(&[s(2000, None), s(2001, Some(10.0))]);
    assert_eq!(chart, PopulationChart::Insufficient { valid_points: 1 });
    assert!(chart.series().is_none());
}

#[test]
fn two_valid_samples_in_one_year_still_draw_a_line() {
    let chart = PopulationChart::from_samples(&[s(2000, Some(5.0)), s(2000, Some(6.0))]);
    let series = chart.series().expect("line");
    assert_eq!(series.points(), &[(2000, 5.0), (2000, 6.0)]);
    assert_eq!(series.year_range(), (1999, 2001));
}

#[test]
fn line_is_sorted_stably_and_repeated_years_are_not_excluded() {
    let chart = PopulationChart::from_samples(&[
        s(2020, Some(3.0)),
        s(2010, Some(1.0)),
        s(2015, Some(2.0)),
        s(2010, Some(9.0)),
    ]);
    let series = chart.series().expect("line");
    assert_eq!(
        series.points(),
        &[(2010, 1.0), (2010, 9.0), (2015, 2.0), (2020, 3.0)]
    );
    assert_eq!(series.excluded(), 0);
    assert!(!series.shows_footnote());
    assert_eq!(series.latest(), Some((2020, 3.0)));
    assert_eq!(series.year_range(), (2010, 2020));
}

#[test]
fn all_valid_values_never_show_the_footnote() {
    let chart = PopulationChart::from_samples(&[
        s(2000, Some(5.0)),
        s(2001, Some(6.0)),
        s(2001, Some(7.0)),
    ]);
    let series = chart.series().expect("line");
    assert_eq!(series.excluded(), 0);
    assert!(!series.shows_footnote());
}

#[test]
fn extreme_years_do_not_overflow() {
    let chart = PopulationChart::from_samples(&[s(i32::MAX, Some(1.0)), s(i32::MAX, Some(2.0))]);
    assert_eq!(chart.series().unwrap().year_range(), (i32::MAX - 1, i32::MAX));
}

#[test]
fn footnote_only_when_something_was_dropped() {
    let clean = PopulationChart::from_samples(&[s(2000, Some(1.0)), s(2001, Some(2.0))]);
    assert!(!clean.series().unwrap().shows_footnote());

    let dirty = PopulationChart::from_samples(&[
        s(2000, Some(1.0)),
        s(2001, Some(f64::NAN)),
        s(2002, Some(0.0)),
        s(2003, Some(2.0)),
    ]);
    let series = dirty.series().unwrap();
    assert_eq!(series.points().len(), 2);
    assert_eq!(series.excluded(), 2);
    assert!(series.shows_footnote());
}

#[test]
fn value_range_never_goes_negative() {
    let chart = PopulationChart::from_samples(&[s(2000, Some(10.0)), s(2001, Some(1_000.0))]);
    let (lo, hi) = chart.series().unwrap().value_range();
    assert!(lo >= 0.0);
    assert!(hi > 1_000.0);
}
