// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The population that answered a survey export.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Role {
    Staff,
    Learner,
}

impl Role {
    pub fn name(&self) -> &'static str {
        match self {
            Role::Staff => "staff",
            Role::Learner => "learner",
        }
    }

    /// The prefix used in chart titles, before the location.
    pub fn title_prefix(&self) -> &'static str {
        match self {
            Role::Staff => "STAFF",
            Role::Learner => "LEARNERS",
        }
    }

    /// The charts drawn for this population, in display order.
    pub fn charts(&self) -> &'static [ChartKind] {
        match self {
            Role::Staff => &[ChartKind::Experiences, ChartKind::Inclusive],
            Role::Learner => &[ChartKind::Experiences, ChartKind::ClinicalAndInclusive],
        }
    }

    pub fn template(&self) -> &'static SurveyTemplate {
        match self {
            Role::Staff => &STAFF_TEMPLATE,
            Role::Learner => &LEARNER_TEMPLATE,
        }
    }
}

/// Describes where the fields of a survey export live in the spreadsheet.
///
/// `columns` uses the Excel letter notation (`A:B,H:P`). The first selected
/// column holds the respondent id, the following ones map in order onto
/// `field_names`.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SurveyTemplate {
    pub columns: &'static str,
    pub field_names: &'static [&'static str],
}

pub const DATE_FIELD: &str = "date";

pub const STAFF_TEMPLATE: SurveyTemplate = SurveyTemplate {
    columns: "A:B,H:P",
    field_names: &[
        DATE_FIELD,
        "loc_5west_yn",
        "loc_8west_yn",
        "loc_8south_yn",
        "loc_other_text",
        "healthcare_discrim",
        "healthcare_harass",
        "healthcare_bully",
        "inclusive",
        "comments_text",
    ],
};

pub const LEARNER_TEMPLATE: SurveyTemplate = SurveyTemplate {
    columns: "A:B,H:S",
    field_names: &[
        DATE_FIELD,
        "loc_5west_yn",
        "loc_8west_yn",
        "loc_8south_yn",
        "loc_other_text",
        "clinical_supported",
        "clinical_workload",
        "clinical_comments_text",
        "healthcare_discrim",
        "healthcare_harass",
        "healthcare_bully",
        "inclusive",
        "comments_text",
    ],
};

/// One respondent's submission.
///
/// The values are aligned with the fields of the table that owns the row.
/// Empty cells are `None`.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SurveyRow {
    pub id: String,
    pub values: Vec<Option<String>>,
}

/// A cleaned survey export. Every row has a submission date.
///
/// Built with `SurveyTable::new`, immutable afterwards.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SurveyTable {
    pub(crate) role: Role,
    pub(crate) fields: Vec<String>,
    pub(crate) rows: Vec<SurveyRow>,
}

// ********* Locations ***********

/// A clinical teaching unit with its own indicator column in the survey.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Ward {
    EightSouth,
    EightWest,
    FiveWest,
}

impl Ward {
    /// The field holding "Yes" when the respondent worked on this ward.
    pub fn flag_field(&self) -> &'static str {
        match self {
            Ward::EightSouth => "loc_8south_yn",
            Ward::EightWest => "loc_8west_yn",
            Ward::FiveWest => "loc_5west_yn",
        }
    }
}

/// The value of a ward flag marking membership.
pub const WARD_FLAG_YES: &str = "Yes";

/// One tab of the dashboard.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Location {
    AllCtus,
    Ward(Ward),
}

impl Location {
    /// The tabs, in display order.
    pub const TABS: [Location; 4] = [
        Location::AllCtus,
        Location::Ward(Ward::EightSouth),
        Location::Ward(Ward::EightWest),
        Location::Ward(Ward::FiveWest),
    ];

    pub fn ward(&self) -> Option<Ward> {
        match self {
            Location::AllCtus => None,
            Location::Ward(w) => Some(*w),
        }
    }

    pub fn tab_label(&self) -> &'static str {
        match self {
            Location::AllCtus => "All CTUs",
            Location::Ward(Ward::EightSouth) => "8 South",
            Location::Ward(Ward::EightWest) => "8 West",
            Location::Ward(Ward::FiveWest) => "5 West",
        }
    }

    pub fn title_label(&self) -> &'static str {
        match self {
            Location::AllCtus => "All CTUs",
            Location::Ward(Ward::EightSouth) => "8 SOUTH",
            Location::Ward(Ward::EightWest) => "8 WEST",
            Location::Ward(Ward::FiveWest) => "5 WEST",
        }
    }
}

// ********* Response scales ***********

/// A closed set of answers, with a fixed display order.
pub trait Category: Sized + Copy + Eq + std::fmt::Debug + 'static {
    /// All the answers, in display order.
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;

    /// Maps a raw cell to an answer. Surrounding whitespace is ignored, the
    /// comparison is case-sensitive.
    fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        Self::ALL.iter().copied().find(|c| c.label() == trimmed)
    }

    fn position(&self) -> Option<usize> {
        Self::ALL.iter().position(|c| c == self)
    }
}

/// How often something negative happened (bullying, harassment, ...).
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Occurrence {
    Never,
    Sometimes,
    Often,
}

impl Category for Occurrence {
    const ALL: &'static [Occurrence] =
        &[Occurrence::Never, Occurrence::Sometimes, Occurrence::Often];

    fn label(&self) -> &'static str {
        match self {
            Occurrence::Never => "Never",
            Occurrence::Sometimes => "Sometimes",
            Occurrence::Often => "Often",
        }
    }
}

/// How often a statement held over the last week.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Frequency {
    Always,
    Often,
    Sometimes,
    Never,
}

impl Category for Frequency {
    const ALL: &'static [Frequency] = &[
        Frequency::Always,
        Frequency::Often,
        Frequency::Sometimes,
        Frequency::Never,
    ];

    fn label(&self) -> &'static str {
        match self {
            Frequency::Always => "Always",
            Frequency::Often => "Often",
            Frequency::Sometimes => "Sometimes",
            Frequency::Never => "Never",
        }
    }
}

/// What to do with a non-empty answer that is not part of the scale.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum UnrecognizedPolicy {
    /// Count it as unrecognized and leave it out of the percentages.
    Exclude,
    /// Fail the aggregation.
    Reject,
}

// ******** Output data structures *********

/// The three chart datasets of the dashboard.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum ChartKind {
    /// Bullying, discrimination and harassment, on the `Occurrence` scale.
    Experiences,
    /// Inclusiveness of the work environment alone, on the `Frequency` scale.
    Inclusive,
    /// Supervision, workload and inclusiveness, on the `Frequency` scale.
    ClinicalAndInclusive,
}

impl ChartKind {
    pub fn name(&self) -> &'static str {
        match self {
            ChartKind::Experiences => "experiences",
            ChartKind::Inclusive => "inclusive",
            ChartKind::ClinicalAndInclusive => "clinical_and_inclusive",
        }
    }

    /// The response fields of the chart and their display labels, in order.
    pub fn fields(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            ChartKind::Experiences => &[
                ("healthcare_bully", "Bullying"),
                ("healthcare_discrim", "Discrimination"),
                ("healthcare_harass", "Harassment"),
            ],
            ChartKind::Inclusive => &[("inclusive", "Work environment is inclusive")],
            ChartKind::ClinicalAndInclusive => &[
                (
                    "clinical_supported",
                    "Felt supported by supervisor/senior resident",
                ),
                ("clinical_workload", "Clinical workload was manageable"),
                ("inclusive", "Work environment is inclusive"),
            ],
        }
    }

    /// The chart heading, without the role and location prefix.
    pub fn heading(&self, respondents: u64) -> String {
        match self {
            ChartKind::Experiences => "Frequency of bullying, discrimination, and harassment \
                from members of the healthcare team over the last week"
                .to_string(),
            ChartKind::Inclusive => {
                format!("The work environment feels inclusive (n={})", respondents)
            }
            ChartKind::ClinicalAndInclusive => {
                "Experiences of clinical work and learning environment".to_string()
            }
        }
    }
}

/// Counts of the answers to one field, in the display order of its scale.
#[derive(PartialEq, Debug, Clone)]
pub struct FieldDistribution {
    pub field: String,
    pub label: String,
    pub counts: Vec<(&'static str, u64)>,
    /// Answers that are part of the scale.
    pub answered: u64,
    /// Non-empty answers outside of the scale.
    pub unrecognized: u64,
    /// Empty cells.
    pub missing: u64,
}

impl FieldDistribution {
    /// The share of each answer among the recognized answers, in percent.
    ///
    /// Returns `None` when nobody gave a recognized answer.
    pub fn percentages(&self) -> Option<Vec<(&'static str, f64)>> {
        if self.answered == 0 {
            return None;
        }
        let total = self.answered as f64;
        Some(
            self.counts
                .iter()
                .map(|(cat, count)| (*cat, (*count as f64) * 100.0 / total))
                .collect(),
        )
    }
}

/// A stacked bar chart, ready to be drawn.
#[derive(PartialEq, Debug, Clone)]
pub struct ChartData {
    pub kind: ChartKind,
    pub title: String,
    /// Number of rows the chart was computed from.
    pub respondents: u64,
    pub categories: Vec<&'static str>,
    pub series: Vec<FieldDistribution>,
}

impl ChartData {
    /// True if at least one field has something to draw.
    pub fn is_drawable(&self) -> bool {
        self.series.iter().any(|s| s.answered > 0)
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct TabView {
    pub location: Location,
    pub charts: Vec<ChartData>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct Dashboard {
    pub tabs: Vec<TabView>,
}

/// Errors that prevent the tables or the charts from being built.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum SurveyErrors {
    MissingField {
        field: String,
    },
    FieldCountMismatch {
        row_id: String,
        expected: usize,
        found: usize,
    },
    UnrecognizedResponse {
        field: String,
        row_id: String,
        value: String,
    },
}

impl Error for SurveyErrors {}

impl Display for SurveyErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurveyErrors::MissingField { field } => {
                write!(f, "the survey table has no field {:?}", field)
            }
            SurveyErrors::FieldCountMismatch {
                row_id,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} values but the table has {} fields",
                row_id, found, expected
            ),
            SurveyErrors::UnrecognizedResponse {
                field,
                row_id,
                value,
            } => write!(
                f,
                "row {}: {:?} is not a valid answer for {}",
                row_id, value, field
            ),
        }
    }
}
