use crate::args::Args;
use crate::survey::*;

use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Internal Medicine CTU hotspot survey";

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    pub title: Option<String>,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "generateHtml")]
    pub generate_html: Option<bool>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    pub role: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    pub columns: Option<String>,
    #[serde(rename = "fieldNames")]
    pub field_names: Option<Vec<String>>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

impl FileSource {
    pub fn role(&self) -> SurveyResult<Role> {
        match self.role.as_str() {
            "staff" => Ok(Role::Staff),
            "learner" | "learners" => Ok(Role::Learner),
            x => whatever!("unknown survey role {:?}: expected staff or learner", x),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurveyRules {
    #[serde(rename = "unrecognizedResponses")]
    pub unrecognized_responses: Option<String>,
}

impl SurveyRules {
    pub fn policy(&self) -> SurveyResult<UnrecognizedPolicy> {
        match self.unrecognized_responses.as_deref() {
            None | Some("exclude") => Ok(UnrecognizedPolicy::Exclude),
            Some("reject") => Ok(UnrecognizedPolicy::Reject),
            Some(x) => whatever!(
                "unknown unrecognizedResponses rule: {:?}: expected exclude or reject",
                x
            ),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurveyConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "surveyFileSources", default)]
    pub survey_file_sources: Vec<FileSource>,
    #[serde(default)]
    pub rules: SurveyRules,
}

pub fn read_config(path: &str) -> SurveyResult<SurveyConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: SurveyConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

/// Where to read one survey from.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SourceSettings {
    pub path: String,
    pub columns: String,
    pub field_names: Vec<String>,
    pub worksheet: Option<String>,
}

impl SourceSettings {
    fn from_template(role: Role, path: String, worksheet: Option<String>) -> SourceSettings {
        let template = role.template();
        SourceSettings {
            path,
            columns: template.columns.to_string(),
            field_names: template.field_names.iter().map(|s| s.to_string()).collect(),
            worksheet,
        }
    }
}

/// The settings of a run, once the configuration file and the command line
/// are merged.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RunSettings {
    pub title: String,
    pub staff: Option<SourceSettings>,
    pub learner: Option<SourceSettings>,
    /// A file path or `stdout`.
    pub summary_out: Option<String>,
    pub html_out: Option<String>,
    pub reference: Option<String>,
    pub policy: UnrecognizedPolicy,
}

pub fn resolve_settings(args: &Args) -> SurveyResult<RunSettings> {
    let (config, root_p): (SurveyConfig, PathBuf) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            info!("config: {:?}", config);
            let root_p = Path::new(config_path)
                .parent()
                .context(MissingParentDirSnafu {})?
                .to_path_buf();
            (config, root_p)
        }
        None => (SurveyConfig::default(), PathBuf::new()),
    };
    resolve_with_config(args, &config, &root_p)
}

fn resolve_with_config(
    args: &Args,
    config: &SurveyConfig,
    root_p: &Path,
) -> SurveyResult<RunSettings> {
    let relative = |p: &str| -> String { root_p.join(p).display().to_string() };

    let source_for = |role: Role, cli_path: &Option<String>| -> SurveyResult<Option<SourceSettings>> {
        if let Some(p) = cli_path {
            return Ok(Some(SourceSettings::from_template(
                role,
                p.clone(),
                args.excel_worksheet_name.clone(),
            )));
        }
        let mut found: Option<SourceSettings> = None;
        for cfs in config.survey_file_sources.iter() {
            if cfs.role()? != role {
                continue;
            }
            if found.is_some() {
                whatever!("more than one {} survey file in the configuration", role.name());
            }
            let mut source = SourceSettings::from_template(
                role,
                relative(&cfs.file_path),
                args.excel_worksheet_name
                    .clone()
                    .or_else(|| cfs.excel_worksheet_name.clone()),
            );
            if let Some(columns) = &cfs.columns {
                source.columns = columns.clone();
            }
            if let Some(field_names) = &cfs.field_names {
                source.field_names = field_names.clone();
            }
            found = Some(source);
        }
        Ok(found)
    };

    let staff = source_for(Role::Staff, &args.staff)?;
    let learner = source_for(Role::Learner, &args.learner)?;

    let policy = if args.strict {
        UnrecognizedPolicy::Reject
    } else {
        config.rules.policy()?
    };

    let output_dir: Option<PathBuf> = config
        .output_settings
        .output_directory
        .as_ref()
        .map(|d| root_p.join(d));
    let summary_out = args.out.clone().or_else(|| {
        output_dir
            .as_ref()
            .map(|d| d.join("summary.json").display().to_string())
    });
    let html_out = args.html.clone().or_else(|| {
        if config.output_settings.generate_html.unwrap_or(false) {
            output_dir
                .as_ref()
                .map(|d| d.join("report.html").display().to_string())
        } else {
            None
        }
    });
    // Nothing else requested: print the summary.
    let summary_out = match (summary_out, &html_out) {
        (None, None) => Some("stdout".to_string()),
        (x, _) => x,
    };

    Ok(RunSettings {
        title: config
            .output_settings
            .title
            .clone()
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        staff,
        learner,
        summary_out,
        html_out,
        reference: args.reference.clone(),
        policy,
    })
}
