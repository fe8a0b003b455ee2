mod config;
use log::{debug, info};

use rand::rngs::StdRng;
use rand::SeedableRng;

pub use crate::config::*;

pub mod builder;
pub mod collation;
pub mod colors;
pub mod filter;
pub mod format;

pub use crate::collation::sort_by_name;
pub use crate::colors::{assign_colors, assign_stable_colors, ColorMap};
pub use crate::filter::{filter, LocalityFilter};

/// Sums the ballots of all the localities into the aggregate entry.
///
/// Counted and expected ballots are summed independently. An empty input gives
/// an entry with nothing counted and nothing expected.
pub fn compute_total(localities: &[Locality], label: &str) -> Locality {
    localities.iter().fold(
        Locality {
            id: TOTAL_ID.to_string(),
            name: label.to_string(),
            ballots_counted: 0,
            ballots_expected: 0,
        },
        |acc, l| Locality {
            ballots_counted: acc.ballots_counted.saturating_add(l.ballots_counted),
            ballots_expected: acc.ballots_expected.saturating_add(l.ballots_expected),
            ..acc
        },
    )
}

/// The share of the expected ballots that have been counted, between 0 and 100.
///
/// When no ballot is expected, the result is NaN (nothing counted) or infinite.
/// Use `format::percent_label` and `format::completion_bar` to show it.
pub fn percent_complete(locality: &Locality) -> f64 {
    locality.ballots_counted as f64 / locality.ballots_expected as f64 * 100.0
}

/// Holds a loaded report, with its aggregate entry, its ordering and its colors.
///
/// The colors are computed when the aggregator is built. They are only
/// recomputed afterwards under `ColorMode::EveryRender`.
pub struct ReportAggregator {
    report: Report,
    rules: ReportRules,
    // The aggregate entry first, then the localities sorted by name.
    entries: Vec<Locality>,
    colors: ColorMap,
    rng: StdRng,
}

impl ReportAggregator {
    pub fn new(report: Report, rules: &ReportRules) -> ReportAggregator {
        info!(
            "Processing report {:?}: {:?} localities, rules: {:?}",
            report.name,
            report.localities.len(),
            rules
        );
        let total = compute_total(&report.localities, &rules.total_label);
        debug!("ReportAggregator::new: total: {:?}", total);

        let mut entries: Vec<Locality> = vec![total];
        entries.extend(sort_by_name(&report.localities));

        let mut rng = match rules.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let colors = make_colors(&report.localities, rules.color_mode, &mut rng);

        ReportAggregator {
            report,
            rules: rules.clone(),
            entries,
            colors,
            rng,
        }
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn rules(&self) -> &ReportRules {
        &self.rules
    }

    /// The aggregate entry followed by the localities in name order.
    pub fn entries(&self) -> &[Locality] {
        &self.entries
    }

    pub fn total(&self) -> &Locality {
        &self.entries[0]
    }

    pub fn colors(&self) -> &ColorMap {
        &self.colors
    }

    /// Produces what the reader sees for the given query.
    pub fn view(&mut self, query: &str) -> Result<ReportView, ReportErrors> {
        if self.rules.color_mode == ColorMode::EveryRender {
            self.colors = make_colors(
                &self.report.localities,
                self.rules.color_mode,
                &mut self.rng,
            );
        }
        let f = LocalityFilter::new(query, self.rules.filter_mode)?;
        let shown = f.apply(&self.entries);
        info!(
            "view: query {:?} matched {:?} of {:?} entries",
            query,
            shown.len(),
            self.entries.len()
        );

        let entries: Vec<DisplayEntry> = shown
            .into_iter()
            .map(|l| {
                let percent = percent_complete(&l);
                DisplayEntry {
                    is_total: l.is_total(),
                    percent_complete: percent,
                    color: self.colors.get(&l.id),
                    bar: format::completion_bar(&l, percent),
                    locality: l,
                }
            })
            .collect();

        Ok(ReportView {
            title: self.report.name.clone(),
            last_updated_label: format::format_last_updated(&self.report.last_updated),
            summary: format::search_summary(entries.len(), query, &self.report.election),
            query: query.to_string(),
            show_all_hint: entries.is_empty(),
            entries,
        })
    }
}

fn make_colors(localities: &[Locality], mode: ColorMode, rng: &mut StdRng) -> ColorMap {
    match mode {
        ColorMode::StableById(seed) => assign_stable_colors(localities, seed),
        ColorMode::OncePerLoad | ColorMode::EveryRender => assign_colors(localities, rng),
    }
}

/// Loads the report and renders it for one query.
///
/// Arguments:
/// * `report` the report to show
/// * `rules` how to color and filter the localities
/// * `query` the text typed by the reader, possibly empty
pub fn run_report(
    report: Report,
    rules: &ReportRules,
    query: &str,
) -> Result<ReportView, ReportErrors> {
    let mut aggregator = ReportAggregator::new(report, rules);
    aggregator.view(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ReportBuilder;
    use chrono::{DateTime, NaiveDate};

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn sample_report() -> Report {
        let mut b = ReportBuilder::new(
            "Virginia Election Night Results",
            "General Election",
            NaiveDate::from_ymd_opt(2020, 11, 3).unwrap(),
            DateTime::parse_from_rfc3339("2020-11-04T02:15:00Z").unwrap(),
        );
        b.add_locality("fairfax", "Fairfax County", 50, 100).unwrap();
        b.add_locality("arlington", "Arlington County", 0, 100).unwrap();
        b.add_locality("10th", "10th District", 30, 40).unwrap();
        b.add_locality("2nd", "2nd District", 0, 0).unwrap();
        b.add_locality("kq", "King & Queen County", 7, 0).unwrap();
        b.build()
    }

    fn seeded(mode: ColorMode) -> ReportRules {
        ReportRules {
            color_mode: mode,
            random_seed: Some(11),
            ..ReportRules::default()
        }
    }

    #[test]
    fn total_sums_independently() {
        let report = sample_report();
        let total = compute_total(&report.localities, "State of Virginia");
        assert_eq!(total.id, "total");
        assert_eq!(total.name, "State of Virginia");
        assert_eq!(total.ballots_counted, 87);
        assert_eq!(total.ballots_expected, 240);
        assert!((percent_complete(&total) - 36.25).abs() < 1e-9);
        // Not the average of the individual ratios.
        let ratios: Vec<f64> = report
            .localities
            .iter()
            .filter(|l| l.ballots_expected > 0)
            .map(percent_complete)
            .collect();
        let mean = ratios.iter().sum::<f64>() / ratios.len() as f64;
        assert!((mean - 125.0 / 3.0).abs() < 1e-9);
        assert!((mean - percent_complete(&total)).abs() > 1.0);
    }

    #[test]
    fn total_of_nothing_is_zero() {
        let total = compute_total(&[], "Nowhere");
        assert_eq!(total.ballots_counted, 0);
        assert_eq!(total.ballots_expected, 0);
        assert!(percent_complete(&total).is_nan());
    }

    #[test]
    fn total_saturates() {
        let big = Locality {
            id: "a".to_string(),
            name: "A".to_string(),
            ballots_counted: u64::MAX,
            ballots_expected: u64::MAX,
        };
        let total = compute_total(&[big.clone(), big], "Big");
        assert_eq!(total.ballots_counted, u64::MAX);
    }

    #[test]
    fn percentages() {
        let mut l = sample_report().localities[0].clone();
        assert_eq!(percent_complete(&l), 50.0);
        l.ballots_counted = 0;
        assert_eq!(percent_complete(&l), 0.0);
        l.ballots_expected = 0;
        assert!(!percent_complete(&l).is_finite());
        l.ballots_counted = 3;
        assert_eq!(percent_complete(&l), f64::INFINITY);
    }

    #[test]
    fn total_comes_first_then_names() {
        init();
        let agg = ReportAggregator::new(sample_report(), &seeded(ColorMode::OncePerLoad));
        let ids: Vec<&str> = agg.entries().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["total", "2nd", "10th", "arlington", "fairfax", "kq"]);
        assert!(agg.total().is_total());
    }

    #[test]
    fn view_without_query() {
        init();
        let view = run_report(sample_report(), &seeded(ColorMode::OncePerLoad), "").unwrap();
        assert_eq!(view.entries.len(), 6);
        assert!(view.entries[0].is_total);
        assert_eq!(view.entries[0].color, None);
        assert!(view.entries[1..].iter().all(|e| e.color.is_some()));
        assert_eq!(
            view.summary,
            "Showing all 6 localities for November 3, 2020 General Election"
        );
        assert_eq!(
            view.last_updated_label,
            "Wednesday, November 4, 2020, 2:15:00 AM UTC"
        );
        assert!(!view.show_all_hint);

        let labels: Vec<&str> = view.entries.iter().map(|e| e.bar.label.as_str()).collect();
        assert_eq!(labels, vec!["36.25%", "N/A", "75.00%", "0%", "50.00%", "N/A"]);
        let visible: Vec<bool> = view.entries.iter().map(|e| e.bar.visible).collect();
        assert_eq!(visible, vec![true, false, true, false, true, true]);
    }

    #[test]
    fn view_with_query() {
        init();
        let mut agg = ReportAggregator::new(sample_report(), &seeded(ColorMode::OncePerLoad));
        let view = agg.view("COUNTY").unwrap();
        let ids: Vec<&str> = view
            .entries
            .iter()
            .map(|e| e.locality.id.as_str())
            .collect();
        assert_eq!(ids, vec!["arlington", "fairfax", "kq"]);
        assert_eq!(
            view.summary,
            "Showing 3 localities matching “COUNTY” for November 3, 2020 General Election"
        );

        let view = agg.view("virginia").unwrap();
        assert_eq!(view.entries.len(), 1);
        assert!(view.entries[0].is_total);

        let view = agg.view("Richmond").unwrap();
        assert!(view.entries.is_empty());
        assert!(view.show_all_hint);
    }

    #[test]
    fn colors_once_per_load_do_not_change() {
        let mut agg = ReportAggregator::new(sample_report(), &seeded(ColorMode::OncePerLoad));
        let before = agg.colors().clone();
        agg.view("").unwrap();
        agg.view("fair").unwrap();
        assert_eq!(agg.colors(), &before);
    }

    #[test]
    fn colors_every_render_stay_a_permutation() {
        let mut agg = ReportAggregator::new(sample_report(), &seeded(ColorMode::EveryRender));
        for _ in 0..5 {
            agg.view("").unwrap();
            let mut hues = agg.colors().hues();
            hues.sort_by(|a, b| a.total_cmp(b));
            assert_eq!(hues, vec![72.0, 144.0, 216.0, 288.0, 360.0]);
        }
    }

    #[test]
    fn stable_colors_survive_reloads() {
        let rules = ReportRules {
            color_mode: ColorMode::StableById(2020),
            random_seed: None,
            ..ReportRules::default()
        };
        let a = ReportAggregator::new(sample_report(), &rules);
        let mut shuffled = sample_report();
        shuffled.localities.reverse();
        let b = ReportAggregator::new(shuffled, &rules);
        assert_eq!(a.colors(), b.colors());
    }

    #[test]
    fn bad_pattern_is_an_error() {
        let rules = ReportRules {
            filter_mode: FilterMode::Pattern,
            ..seeded(ColorMode::OncePerLoad)
        };
        let res = run_report(sample_report(), &rules, "[");
        assert!(matches!(res, Err(ReportErrors::InvalidPattern(_))));
    }

    #[test]
    fn custom_total_label() {
        let rules = ReportRules {
            total_label: "Commonwealth".to_string(),
            ..seeded(ColorMode::OncePerLoad)
        };
        let view = run_report(sample_report(), &rules, "common").unwrap();
        assert_eq!(view.entries.len(), 1);
        assert_eq!(view.entries[0].locality.name, "Commonwealth");
    }
}
