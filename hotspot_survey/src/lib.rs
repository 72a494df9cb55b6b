/*!
Cleaning and aggregation of the Internal Medicine CTU hotspot surveys.

This crate takes the cleaned survey tables (see [`SurveyTable`]) and turns
them into the stacked bar charts of the dashboard: one distribution of answers
per response field, always in the fixed order of the answer scale.

It does not read files. The `hotspot` program reads the spreadsheets and
renders the charts.

See the [manual](manual/index.html) for the expected layout of the survey
exports.
*/
mod config;
pub mod manual;

use log::{debug, info, warn};

pub use crate::config::*;

impl SurveyTable {
    /// Builds a table from rows aligned with `fields`.
    ///
    /// Rows without a submission date are dropped: they are surveys that were
    /// opened but never submitted.
    pub fn new(
        role: Role,
        fields: Vec<String>,
        rows: Vec<SurveyRow>,
    ) -> Result<SurveyTable, SurveyErrors> {
        let date_idx = fields
            .iter()
            .position(|f| f == DATE_FIELD)
            .ok_or_else(|| SurveyErrors::MissingField {
                field: DATE_FIELD.to_string(),
            })?;

        let num_input_rows = rows.len();
        let mut kept: Vec<SurveyRow> = Vec::with_capacity(num_input_rows);
        for row in rows {
            if row.values.len() != fields.len() {
                return Err(SurveyErrors::FieldCountMismatch {
                    row_id: row.id,
                    expected: fields.len(),
                    found: row.values.len(),
                });
            }
            if is_filled(row.values[date_idx].as_deref()) {
                kept.push(row);
            } else {
                debug!("SurveyTable::new: dropping row {}: no submission date", row.id);
            }
        }
        info!(
            "{} survey: {} submitted responses ({} rows read)",
            role.name(),
            kept.len(),
            num_input_rows
        );
        Ok(SurveyTable {
            role,
            fields,
            rows: kept,
        })
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn rows(&self) -> &[SurveyRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The position of a field in the rows.
    pub fn column(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == field)
    }

    fn column_or_err(&self, field: &str) -> Result<usize, SurveyErrors> {
        self.column(field).ok_or_else(|| SurveyErrors::MissingField {
            field: field.to_string(),
        })
    }

    /// The value of `field` for every row, next to the row id.
    pub fn values(&self, field: &str) -> Result<Vec<(&str, Option<&str>)>, SurveyErrors> {
        let idx = self.column_or_err(field)?;
        Ok(self
            .rows
            .iter()
            .map(|r| (r.id.as_str(), r.values.get(idx).and_then(|v| v.as_deref())))
            .collect())
    }
}

fn is_filled(v: Option<&str>) -> bool {
    matches!(v, Some(s) if !s.trim().is_empty())
}

/// Keeps the rows of the respondents who worked on the given ward.
///
/// With no ward, returns the whole table. The input is left untouched and all
/// the fields are preserved.
pub fn filter_by_ward(table: &SurveyTable, ward: Option<Ward>) -> Result<SurveyTable, SurveyErrors> {
    let ward = match ward {
        Some(w) => w,
        None => return Ok(table.clone()),
    };
    let idx = table.column_or_err(ward.flag_field())?;
    let rows: Vec<SurveyRow> = table
        .rows
        .iter()
        .filter(|r| r.values.get(idx).and_then(|v| v.as_deref()) == Some(WARD_FLAG_YES))
        .cloned()
        .collect();
    debug!(
        "filter_by_ward: {:?}: {} of {} {} rows",
        ward,
        rows.len(),
        table.len(),
        table.role.name()
    );
    Ok(SurveyTable {
        role: table.role,
        fields: table.fields.clone(),
        rows,
    })
}

/// Counts the answers to one field on the scale `C`.
///
/// Empty cells are counted as missing. Other values outside of the scale are
/// counted as unrecognized, or rejected, depending on `policy`. Neither enters
/// the percentages.
pub fn field_distribution<C: Category>(
    table: &SurveyTable,
    field: &str,
    label: &str,
    policy: UnrecognizedPolicy,
) -> Result<FieldDistribution, SurveyErrors> {
    let idx = table.column_or_err(field)?;

    let mut counts: Vec<u64> = vec![0; C::ALL.len()];
    let mut unrecognized: u64 = 0;
    let mut missing: u64 = 0;
    for row in table.rows.iter() {
        let raw = row.values.get(idx).and_then(|v| v.as_deref());
        let raw = match raw {
            Some(s) if is_filled(Some(s)) => s,
            _ => {
                missing += 1;
                continue;
            }
        };
        match C::parse(raw).and_then(|c| c.position()) {
            Some(pos) => counts[pos] += 1,
            None if policy == UnrecognizedPolicy::Reject => {
                return Err(SurveyErrors::UnrecognizedResponse {
                    field: field.to_string(),
                    row_id: row.id.clone(),
                    value: raw.to_string(),
                });
            }
            None => {
                warn!(
                    "field {}: row {}: leaving out unrecognized answer {:?}",
                    field, row.id, raw
                );
                unrecognized += 1;
            }
        }
    }

    let answered: u64 = counts.iter().sum();
    let counts: Vec<(&'static str, u64)> =
        C::ALL.iter().map(|c| c.label()).zip(counts).collect();
    debug!(
        "field_distribution: {}: {:?} answered: {} unrecognized: {} missing: {}",
        field, counts, answered, unrecognized, missing
    );
    Ok(FieldDistribution {
        field: field.to_string(),
        label: label.to_string(),
        counts,
        answered,
        unrecognized,
        missing,
    })
}

fn collect_series<C: Category>(
    table: &SurveyTable,
    kind: ChartKind,
    policy: UnrecognizedPolicy,
) -> Result<(Vec<&'static str>, Vec<FieldDistribution>), SurveyErrors> {
    let mut series: Vec<FieldDistribution> = Vec::new();
    for (field, label) in kind.fields() {
        series.push(field_distribution::<C>(table, field, label, policy)?);
    }
    let categories = C::ALL.iter().map(|c| c.label()).collect();
    Ok((categories, series))
}

/// Computes the dataset of one chart.
///
/// Returns `None` for an empty table: there is nothing to draw.
///
/// ```
/// use hotspot_survey::*;
///
/// let fields: Vec<String> = STAFF_TEMPLATE.field_names.iter().map(|s| s.to_string()).collect();
/// let rows: Vec<SurveyRow> = ["Never", "Never", "Sometimes", "Often", "Often"]
///     .iter()
///     .enumerate()
///     .map(|(idx, answer)| {
///         let mut values: Vec<Option<String>> = vec![None; fields.len()];
///         values[0] = Some("2022-06-01".to_string());
///         values[7] = Some(answer.to_string());
///         SurveyRow { id: idx.to_string(), values }
///     })
///     .collect();
/// let table = SurveyTable::new(Role::Staff, fields, rows)?;
///
/// let chart = build_chart(&table, ChartKind::Experiences, "STAFF (All CTUs):", UnrecognizedPolicy::Exclude)?
///     .unwrap();
/// assert_eq!(chart.respondents, 5);
/// assert_eq!(
///     chart.series[0].percentages(),
///     Some(vec![("Never", 40.0), ("Sometimes", 20.0), ("Often", 40.0)])
/// );
/// # Ok::<(), SurveyErrors>(())
/// ```
pub fn build_chart(
    table: &SurveyTable,
    kind: ChartKind,
    title_prefix: &str,
    policy: UnrecognizedPolicy,
) -> Result<Option<ChartData>, SurveyErrors> {
    if table.is_empty() {
        debug!("build_chart: {}: no rows, skipping", title_prefix);
        return Ok(None);
    }
    let respondents = table.len() as u64;
    let (categories, series) = match kind {
        ChartKind::Experiences => collect_series::<Occurrence>(table, kind, policy)?,
        ChartKind::Inclusive | ChartKind::ClinicalAndInclusive => {
            collect_series::<Frequency>(table, kind, policy)?
        }
    };
    Ok(Some(ChartData {
        kind,
        title: format!("{} {}", title_prefix, kind.heading(respondents)),
        respondents,
        categories,
        series,
    }))
}

/// Builds the charts of every location tab.
///
/// Both surveys are needed: if one of them is missing, nothing is built and
/// `None` is returned.
pub fn build_dashboard(
    staff: Option<&SurveyTable>,
    learner: Option<&SurveyTable>,
    policy: UnrecognizedPolicy,
) -> Result<Option<Dashboard>, SurveyErrors> {
    let (staff, learner) = match (staff, learner) {
        (Some(s), Some(l)) => (s, l),
        _ => {
            info!("build_dashboard: waiting for both the staff and the learner surveys");
            return Ok(None);
        }
    };

    let mut tabs: Vec<TabView> = Vec::new();
    for location in Location::TABS {
        let mut charts: Vec<ChartData> = Vec::new();
        for table in [staff, learner] {
            let subset = filter_by_ward(table, location.ward())?;
            let prefix = format!(
                "{} ({}):",
                subset.role.title_prefix(),
                location.title_label()
            );
            for kind in subset.role.charts() {
                if let Some(chart) = build_chart(&subset, *kind, &prefix, policy)? {
                    charts.push(chart);
                }
            }
        }
        info!(
            "build_dashboard: tab {}: {} charts",
            location.tab_label(),
            charts.len()
        );
        tabs.push(TabView { location, charts });
    }
    Ok(Some(Dashboard { tabs }))
}
