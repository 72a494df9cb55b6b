use log::{debug, info, warn};

use hotspot_survey::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::survey::config_reader::*;

pub mod config_reader;
pub mod io_common;
pub mod io_excel;
pub mod render;
pub mod report;

#[derive(Debug, Snafu)]
pub enum SurveyError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::Error,
        path: String,
    },
    #[snafu(display("The workbook {path} does not contain any data"))]
    EmptyExcel { path: String },
    #[snafu(display("The workbook {path} has no worksheet named {name:?}"))]
    MissingWorksheet { path: String, name: String },
    #[snafu(display("Invalid column selection {selection:?}: {reason}"))]
    ParsingColumnRange { selection: String, reason: String },
    #[snafu(display(
        "{path}: the column selection has {found} columns after the id column, but {expected} field names are expected"
    ))]
    ColumnCountMismatch {
        path: String,
        expected: usize,
        found: usize,
    },
    #[snafu(display(
        "{path}: the survey should extend to column {column}, but its last column is {last}. Is it the right survey export?"
    ))]
    SheetTooNarrow {
        path: String,
        column: String,
        last: String,
    },
    #[snafu(display("Error reading file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing file {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Invalid survey data"))]
    InvalidSurvey { source: SurveyErrors },
    #[snafu(display("Error drawing chart {title:?}: {message}"))]
    RenderingChart { title: String, message: String },
    #[snafu(display("Missing parent directory"))]
    MissingParentDir {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type SurveyResult<T> = Result<T, SurveyError>;

/// What the summary records about the run itself.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub title: String,
    #[serde(rename = "staffFile")]
    pub staff_file: Option<String>,
    #[serde(rename = "learnerFile")]
    pub learner_file: Option<String>,
    #[serde(rename = "unrecognizedResponses")]
    pub unrecognized_responses: String,
}

fn distribution_to_json(dist: &FieldDistribution) -> JSValue {
    let percentages = dist.percentages();
    let entries: Vec<JSValue> = dist
        .counts
        .iter()
        .enumerate()
        .map(|(idx, (category, count))| {
            let pct = percentages
                .as_ref()
                .and_then(|p| p.get(idx))
                .map(|(_, p)| json!(p))
                .unwrap_or(JSValue::Null);
            json!({"category": category, "count": count, "percentage": pct})
        })
        .collect();
    json!({
        "field": dist.field,
        "label": dist.label,
        "answered": dist.answered,
        "unrecognized": dist.unrecognized,
        "missing": dist.missing,
        "distribution": entries,
    })
}

fn chart_to_json(chart: &ChartData) -> JSValue {
    let series: Vec<JSValue> = chart.series.iter().map(distribution_to_json).collect();
    json!({
        "kind": chart.kind.name(),
        "title": chart.title,
        "respondents": chart.respondents,
        "categories": chart.categories,
        "series": series,
    })
}

fn dashboard_to_json(dashboard: &Dashboard) -> Vec<JSValue> {
    dashboard
        .tabs
        .iter()
        .map(|tab| {
            let charts: Vec<JSValue> = tab.charts.iter().map(chart_to_json).collect();
            json!({
                "tab": tab.location.tab_label(),
                "location": tab.location.title_label(),
                "charts": charts,
            })
        })
        .collect()
}

fn build_summary_js(settings: &RunSettings, dashboard: &Dashboard) -> JSValue {
    let c = OutputConfig {
        title: settings.title.clone(),
        staff_file: settings
            .staff
            .as_ref()
            .map(|s| io_common::simplify_file_name(&s.path)),
        learner_file: settings
            .learner
            .as_ref()
            .map(|s| io_common::simplify_file_name(&s.path)),
        unrecognized_responses: match settings.policy {
            UnrecognizedPolicy::Exclude => "exclude".to_string(),
            UnrecognizedPolicy::Reject => "reject".to_string(),
        },
    };
    json!({
        "config": c,
        "tabs": dashboard_to_json(dashboard) })
}

pub fn read_summary(path: &str) -> SurveyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

/// Compares the computed summary with a reference summary, and prints the
/// differences.
pub fn check_reference(reference_path: &str, pretty_js_stats: &str) -> SurveyResult<()> {
    let summary_ref = read_summary(reference_path)?;
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference string");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        whatever!("Difference detected between calculated summary and reference summary")
    }
    info!("The summary matches the reference {}", reference_path);
    Ok(())
}

fn write_output(path: &str, contents: &str) -> SurveyResult<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context(WritingOutputSnafu { path })?;
        }
    }
    fs::write(path, contents).context(WritingOutputSnafu { path })?;
    info!("Wrote {}", path);
    Ok(())
}

fn read_optional_survey(
    role: Role,
    source: &Option<SourceSettings>,
) -> SurveyResult<Option<SurveyTable>> {
    match source {
        Some(s) => io_excel::read_survey(role, s).map(Some),
        None => {
            info!("No {} survey file provided", role.name());
            Ok(None)
        }
    }
}

/// Reads both surveys and writes the requested outputs.
///
/// If one of the surveys is not provided, nothing is written.
pub fn run_dashboard(args: &Args) -> SurveyResult<()> {
    let settings = resolve_settings(args)?;
    debug!("run_dashboard: settings: {:?}", settings);
    run_with_settings(&settings)
}

pub fn run_with_settings(settings: &RunSettings) -> SurveyResult<()> {
    let staff = read_optional_survey(Role::Staff, &settings.staff)?;
    let learner = read_optional_survey(Role::Learner, &settings.learner)?;

    let dashboard = match build_dashboard(staff.as_ref(), learner.as_ref(), settings.policy)
        .context(InvalidSurveySnafu {})?
    {
        Some(d) => d,
        None => {
            info!("Both the staff and the learner surveys are needed: nothing to display");
            return Ok(());
        }
    };

    publish_dashboard(settings, &dashboard)
}

/// Writes the summary and the report of a dashboard, then compares the
/// summary with the reference, if any.
///
/// Both documents are complete before any file is written.
pub fn publish_dashboard(settings: &RunSettings, dashboard: &Dashboard) -> SurveyResult<()> {
    // Assemble the final json
    let result_js = build_summary_js(settings, dashboard);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;

    let page = match &settings.html_out {
        Some(html_path) => Some((html_path, report::build_report(&settings.title, dashboard)?)),
        None => None,
    };

    match settings.summary_out.as_deref() {
        Some("stdout") => println!("{}", pretty_js_stats),
        Some(path) => write_output(path, &pretty_js_stats)?,
        None => {}
    }

    if let Some((html_path, page)) = &page {
        write_output(html_path, page)?;
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &settings.reference {
        check_reference(summary_p, &pretty_js_stats)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::io_common::*;
    use super::io_excel::table_from_range;
    use super::render::render_chart;
    use super::report::build_report;
    use super::*;
    use calamine::{DataType, Range};

    // Columns of the staff export, as selected by A:B,H:P.
    const COL_ID: u32 = 0;
    const COL_DATE: u32 = 1;
    const COL_8WEST: u32 = 8;
    const COL_DISCRIM: u32 = 11;
    const COL_BULLY: u32 = 13;
    const COL_INCLUSIVE: u32 = 14;
    const COL_LAST: u32 = 15;

    fn text(s: &str) -> DataType {
        DataType::String(s.to_string())
    }

    fn staff_fields() -> Vec<String> {
        STAFF_TEMPLATE
            .field_names
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// A staff export with a header and one line per answer to the bullying question.
    /// Lines with an empty answer have no submission date.
    fn staff_range(bullying: &[&str]) -> Range<DataType> {
        let mut range: Range<DataType> = Range::new((0, 0), (bullying.len() as u32, COL_LAST));
        for col in 0..=COL_LAST {
            range.set_value((0, col), text(&format!("Question {}", col)));
        }
        for (idx, answer) in bullying.iter().enumerate() {
            let row = idx as u32 + 1;
            range.set_value((row, COL_ID), DataType::Int(idx as i64 + 100));
            if answer.is_empty() {
                continue;
            }
            range.set_value((row, COL_DATE), DataType::DateTime(44713.25));
            range.set_value((row, COL_BULLY), text(answer));
            range.set_value((row, COL_DISCRIM), text("Never"));
            range.set_value((row, COL_INCLUSIVE), text("Always"));
            if idx % 2 == 0 {
                range.set_value((row, COL_8WEST), text("Yes"));
            }
        }
        range
    }

    fn staff_table(bullying: &[&str]) -> SurveyTable {
        table_from_range(
            Role::Staff,
            "/tmp/staff.xlsx",
            &staff_range(bullying),
            STAFF_TEMPLATE.columns,
            &staff_fields(),
        )
        .unwrap()
    }

    fn learner_table() -> SurveyTable {
        let fields: Vec<String> = LEARNER_TEMPLATE
            .field_names
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut values: Vec<Option<String>> = vec![None; fields.len()];
        values[0] = Some("44713".to_string());
        values[5] = Some("Often".to_string());
        values[6] = Some("Sometimes".to_string());
        values[11] = Some("Always".to_string());
        let row = SurveyRow {
            id: "L1".to_string(),
            values,
        };
        SurveyTable::new(Role::Learner, fields, vec![row]).unwrap()
    }

    fn test_settings() -> RunSettings {
        RunSettings {
            title: DEFAULT_TITLE.to_string(),
            staff: None,
            learner: None,
            summary_out: None,
            html_out: None,
            reference: None,
            policy: UnrecognizedPolicy::Exclude,
        }
    }

    #[test]
    fn column_names() {
        assert_eq!(column_index("A"), Some(0));
        assert_eq!(column_index("p"), Some(15));
        assert_eq!(column_index("Z"), Some(25));
        assert_eq!(column_index("AA"), Some(26));
        assert_eq!(column_index("1"), None);
        assert_eq!(column_index(""), None);
        assert_eq!(column_letters(0), "A");
        assert_eq!(column_letters(18), "S");
        assert_eq!(column_letters(27), "AB");
    }

    #[test]
    fn survey_column_selections() {
        let staff = parse_column_ranges("A:B,H:P").unwrap();
        assert_eq!(staff.len(), 11);
        assert_eq!(staff[..3], [0, 1, 7]);
        assert_eq!(staff.last(), Some(&15));
        assert_eq!(parse_column_ranges("A:B,H:S").unwrap().len(), 14);
        assert_eq!(parse_column_ranges("A,C").unwrap(), vec![0, 2]);
    }

    #[test]
    fn bad_column_selections() {
        for selection in ["", "B:A", "A:1", "H:P,A:B", "A:C,C:D"] {
            let res = parse_column_ranges(selection);
            assert!(
                matches!(res, Err(SurveyError::ParsingColumnRange { .. })),
                "{:?} -> {:?}",
                selection,
                res
            );
        }
    }

    #[test]
    fn cells_as_text() {
        assert_eq!(cell_to_text(&DataType::Empty), None);
        assert_eq!(cell_to_text(&text("  ")), None);
        assert_eq!(cell_to_text(&text("Yes")), Some("Yes".to_string()));
        assert_eq!(cell_to_text(&DataType::Float(12.0)), Some("12".to_string()));
        assert_eq!(cell_to_text(&DataType::Float(0.5)), Some("0.5".to_string()));
        assert_eq!(cell_to_text(&DataType::Int(7)), Some("7".to_string()));
        assert_eq!(cell_to_text(&DataType::Bool(true)), Some("true".to_string()));
    }

    #[test]
    fn default_ids() {
        assert_eq!(simplify_file_name("/a/b/staff.xlsx"), "staff.xlsx");
        let default_id = make_default_id("/a/b/staff.xlsx");
        assert_eq!(default_id(12), "staff.xlsx-00000012");
    }

    #[test]
    fn staff_sheet_is_cleaned() {
        let table = staff_table(&["Never", "", "Sometimes", "Often"]);
        assert_eq!(table.fields(), staff_fields().as_slice());
        // The second line was never submitted.
        assert_eq!(table.len(), 3);
        let ids: Vec<&str> = table.rows().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["100", "102", "103"]);
        let bullying: Vec<Option<&str>> = table
            .values("healthcare_bully")
            .unwrap()
            .into_iter()
            .map(|(_, v)| v)
            .collect();
        assert_eq!(bullying, vec![Some("Never"), Some("Sometimes"), Some("Often")]);
        let dates: Vec<Option<&str>> = table
            .values("date")
            .unwrap()
            .into_iter()
            .map(|(_, v)| v)
            .collect();
        assert!(dates.iter().all(|d| *d == Some("44713.25")));
    }

    #[test]
    fn missing_ids_are_generated() {
        let mut range = staff_range(&["Never"]);
        range.set_value((1, COL_ID), DataType::Empty);
        let table = table_from_range(
            Role::Staff,
            "/tmp/staff.xlsx",
            &range,
            STAFF_TEMPLATE.columns,
            &staff_fields(),
        )
        .unwrap();
        assert_eq!(table.rows()[0].id, "staff.xlsx-00000002");
    }

    #[test]
    fn learner_template_on_staff_sheet_is_too_narrow() {
        let fields: Vec<String> = LEARNER_TEMPLATE
            .field_names
            .iter()
            .map(|s| s.to_string())
            .collect();
        let res = table_from_range(
            Role::Learner,
            "/tmp/staff.xlsx",
            &staff_range(&["Never"]),
            LEARNER_TEMPLATE.columns,
            &fields,
        );
        assert!(matches!(res, Err(SurveyError::SheetTooNarrow { column, .. }) if column == "S"));
    }

    #[test]
    fn selection_must_match_field_names() {
        let res = table_from_range(
            Role::Staff,
            "/tmp/staff.xlsx",
            &staff_range(&["Never"]),
            "A:B,H:O",
            &staff_fields(),
        );
        assert!(matches!(
            res,
            Err(SurveyError::ColumnCountMismatch {
                expected: 10,
                found: 9,
                ..
            })
        ));
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let source = SourceSettings {
            path: "/nonexistent/staff.xlsx".to_string(),
            columns: STAFF_TEMPLATE.columns.to_string(),
            field_names: staff_fields(),
            worksheet: None,
        };
        let res = io_excel::read_survey(Role::Staff, &source);
        assert!(matches!(res, Err(SurveyError::OpeningExcel { .. })));
    }

    #[test]
    fn one_survey_only_writes_nothing() {
        let out = std::env::temp_dir().join("hotspot_one_survey_only.json");
        let _ = fs::remove_file(&out);
        let mut settings = test_settings();
        settings.summary_out = Some(out.display().to_string());
        run_with_settings(&settings).unwrap();
        assert!(!out.exists());
    }

    #[test]
    fn summary_json() {
        let staff = staff_table(&["Never", "Never", "Sometimes", "Often", "Often"]);
        let learner = learner_table();
        let dashboard = build_dashboard(Some(&staff), Some(&learner), UnrecognizedPolicy::Exclude)
            .unwrap()
            .unwrap();
        let js = build_summary_js(&test_settings(), &dashboard);

        let tabs = js["tabs"].as_array().unwrap();
        assert_eq!(tabs.len(), 4);
        assert_eq!(tabs[0]["tab"], json!("All CTUs"));
        assert_eq!(tabs[2]["location"], json!("8 WEST"));

        let experiences = &tabs[0]["charts"][0];
        assert_eq!(experiences["kind"], json!("experiences"));
        assert_eq!(experiences["respondents"], json!(5));
        assert_eq!(
            experiences["categories"],
            json!(["Never", "Sometimes", "Often"])
        );
        let bullying = &experiences["series"][0];
        assert_eq!(bullying["field"], json!("healthcare_bully"));
        assert_eq!(
            bullying["distribution"],
            json!([
                {"category": "Never", "count": 2, "percentage": 40.0},
                {"category": "Sometimes", "count": 1, "percentage": 20.0},
                {"category": "Often", "count": 2, "percentage": 40.0},
            ])
        );

        // Rows 0, 2 and 4 were on 8 West. The learner was on no ward.
        let west = tabs[2]["charts"].as_array().unwrap();
        assert_eq!(west.len(), 2);
        assert_eq!(west[0]["respondents"], json!(3));
        assert!(tabs[1]["charts"].as_array().unwrap().is_empty());
    }

    #[test]
    fn reference_comparison() {
        let staff = staff_table(&["Never", "Often"]);
        let dashboard = build_dashboard(Some(&staff), Some(&learner_table()), UnrecognizedPolicy::Exclude)
            .unwrap()
            .unwrap();
        let js = build_summary_js(&test_settings(), &dashboard);
        let pretty = serde_json::to_string_pretty(&js).unwrap();

        let ref_path = std::env::temp_dir().join("hotspot_reference_summary.json");
        fs::write(&ref_path, &pretty).unwrap();
        let ref_p = ref_path.display().to_string();
        assert!(check_reference(&ref_p, &pretty).is_ok());

        let other = staff_table(&["Never", "Never"]);
        let other_dashboard = build_dashboard(Some(&other), Some(&learner_table()), UnrecognizedPolicy::Exclude)
            .unwrap()
            .unwrap();
        let other_pretty =
            serde_json::to_string_pretty(&build_summary_js(&test_settings(), &other_dashboard)).unwrap();
        assert!(check_reference(&ref_p, &other_pretty).is_err());
        let _ = fs::remove_file(&ref_path);
    }

    #[test]
    fn chart_is_rendered_as_svg() {
        let staff = staff_table(&["Never", "Sometimes", "Often"]);
        let chart = build_chart(
            &staff,
            ChartKind::Experiences,
            "STAFF (All CTUs):",
            UnrecognizedPolicy::Exclude,
        )
        .unwrap()
        .unwrap();
        let svg = render_chart(&chart).unwrap().unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Sometimes"));
        assert!(svg.contains("Harassment"));
        assert!(svg.contains("Responses (n=3)"));
    }

    #[test]
    fn chart_without_answers_is_not_rendered() {
        let fields = staff_fields();
        let mut values: Vec<Option<String>> = vec![None; fields.len()];
        values[0] = Some("44713".to_string());
        let table = SurveyTable::new(
            Role::Staff,
            fields,
            vec![SurveyRow {
                id: "1".to_string(),
                values,
            }],
        )
        .unwrap();
        let chart = build_chart(
            &table,
            ChartKind::Inclusive,
            "STAFF (All CTUs):",
            UnrecognizedPolicy::Exclude,
        )
        .unwrap()
        .unwrap();
        assert_eq!(render_chart(&chart).unwrap(), None);
    }

    #[test]
    fn report_has_every_tab() {
        let staff = staff_table(&["Never", "Often"]);
        let dashboard = build_dashboard(Some(&staff), Some(&learner_table()), UnrecognizedPolicy::Exclude)
            .unwrap()
            .unwrap();
        let page = build_report("June <survey>", &dashboard).unwrap();
        assert!(page.contains("<title>June &lt;survey&gt;</title>"));
        for label in ["All CTUs", "8 South", "8 West", "5 West"] {
            assert!(page.contains(&format!(">{}</label>", label)), "{}", label);
        }
        assert!(page.contains("No responses for 8 South."));
        assert!(page.matches("<svg").count() >= 4);
    }

    #[test]
    fn unanswered_field_keeps_its_label() {
        // Nobody answered the harassment question.
        let staff = staff_table(&["Never", "Often"]);
        let chart = build_chart(
            &staff,
            ChartKind::Experiences,
            "STAFF (All CTUs):",
            UnrecognizedPolicy::Exclude,
        )
        .unwrap()
        .unwrap();
        assert_eq!(chart.series[2].field, "healthcare_harass");
        assert_eq!(chart.series[2].answered, 0);
        let svg = render_chart(&chart).unwrap().unwrap();
        for label in ["Bullying", "Discrimination", "Harassment"] {
            assert!(svg.contains(label), "{}", label);
        }
    }

    // Columns of the learner export, as selected by A:B,H:S.
    const LEARNER_8WEST: u32 = 8;
    const LEARNER_SUPPORTED: u32 = 11;
    const LEARNER_WORKLOAD: u32 = 12;
    const LEARNER_INCLUSIVE: u32 = 17;
    const LEARNER_LAST: u32 = 18;

    #[test]
    fn learner_sheet_is_cleaned() {
        let mut range: Range<DataType> = Range::new((0, 0), (2, LEARNER_LAST));
        for col in 0..=LEARNER_LAST {
            range.set_value((0, col), text(&format!("Question {}", col)));
        }
        for (row, supported, inclusive) in [(1, "Always", "Always"), (2, "Sometimes", "Never")] {
            range.set_value((row, COL_ID), text(&format!("L{}", row)));
            range.set_value((row, COL_DATE), DataType::DateTime(44713.5));
            range.set_value((row, LEARNER_SUPPORTED), text(supported));
            range.set_value((row, LEARNER_WORKLOAD), text("Often"));
            range.set_value((row, LEARNER_INCLUSIVE), text(inclusive));
        }
        range.set_value((2, LEARNER_8WEST), text("Yes"));

        let fields: Vec<String> = LEARNER_TEMPLATE
            .field_names
            .iter()
            .map(|s| s.to_string())
            .collect();
        let table = table_from_range(
            Role::Learner,
            "/tmp/learners.xlsx",
            &range,
            LEARNER_TEMPLATE.columns,
            &fields,
        )
        .unwrap();
        assert_eq!(table.fields().len(), 13);
        assert_eq!(table.fields(), fields.as_slice());
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1].id, "L2");
        let west: Vec<Option<&str>> = table
            .values("loc_8west_yn")
            .unwrap()
            .into_iter()
            .map(|(_, v)| v)
            .collect();
        assert_eq!(west, vec![None, Some("Yes")]);

        let chart = build_chart(
            &table,
            ChartKind::ClinicalAndInclusive,
            "LEARNERS (All CTUs):",
            UnrecognizedPolicy::Exclude,
        )
        .unwrap()
        .unwrap();
        assert_eq!(chart.respondents, 2);
        assert_eq!(chart.categories, vec!["Always", "Often", "Sometimes", "Never"]);
        let pcts: Vec<Vec<(&str, f64)>> = chart
            .series
            .iter()
            .map(|s| s.percentages().unwrap())
            .collect();
        assert_eq!(
            pcts[0],
            vec![("Always", 50.0), ("Often", 0.0), ("Sometimes", 50.0), ("Never", 0.0)]
        );
        assert_eq!(
            pcts[1],
            vec![("Always", 0.0), ("Often", 100.0), ("Sometimes", 0.0), ("Never", 0.0)]
        );
        assert_eq!(
            pcts[2],
            vec![("Always", 50.0), ("Often", 0.0), ("Sometimes", 0.0), ("Never", 50.0)]
        );
    }

    #[test]
    fn summary_and_report_are_written() {
        let staff = staff_table(&["Never", "Often"]);
        let dashboard = build_dashboard(Some(&staff), Some(&learner_table()), UnrecognizedPolicy::Exclude)
            .unwrap()
            .unwrap();
        let dir = std::env::temp_dir().join("hotspot_summary_and_report");
        let _ = fs::remove_dir_all(&dir);
        let summary_p = dir.join("summary.json");
        let report_p = dir.join("report.html");
        let mut settings = test_settings();
        settings.summary_out = Some(summary_p.display().to_string());
        settings.html_out = Some(report_p.display().to_string());

        publish_dashboard(&settings, &dashboard).unwrap();
        let summary = read_summary(&summary_p.display().to_string()).unwrap();
        assert_eq!(summary, build_summary_js(&settings, &dashboard));
        let page = fs::read_to_string(&report_p).unwrap();
        assert!(page.contains("<svg"));
        let _ = fs::remove_dir_all(&dir);
    }
}
