//! Writers for the degrees and groups documents.
//!
//! Two files per run: `degrees` (one record per degree track with its
//! serialized code, credit bounds, and diagnostic flags) and `groups` (the
//! registry of referenced course groups). YAML by default, JSON on
//! request; the grammar of the `code` field is the same either way.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use coursemap_engine::SerializedTable;

use crate::config::{DEGREES_FILE, GROUPS_FILE};
use crate::error::Result;
use crate::run::Organized;
use crate::yaml::text::wrap_report_text;

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }
}

/// One degree track in the output document.
#[derive(Debug, Serialize)]
struct DegreeDoc {
    /// Track name; same as `degree` for single-track programs.
    track: String,
    degree: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    degree_type: Option<&'static str>,
    table_class: &'static str,
    table_id: String,
    code: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    link: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    flags: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_degree_credits: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_degree_credits: Option<f64>,
}

impl From<&SerializedTable> for DegreeDoc {
    fn from(t: &SerializedTable) -> Self {
        Self {
            track: t.track.clone().unwrap_or_else(|| t.degree.clone()),
            degree: t.degree.clone(),
            degree_type: t.degree_type.map(|d| d.as_str()),
            table_class: t.class.as_str(),
            table_id: t.table_id.to_token(),
            code: t.code.clone(),
            link: t.source_link.clone(),
            flags: t.flags.iter().map(|f| f.as_str()).collect(),
            min_degree_credits: t.min_degree_credits,
            max_degree_credits: t.max_degree_credits,
        }
    }
}

#[derive(Debug, Serialize)]
struct FailureDoc {
    table_id: String,
    degree: String,
    error: String,
}

#[derive(Debug, Serialize)]
struct StatsDoc {
    total_requirements: usize,
    unknown_requirements: usize,
    parsed_ratio: f64,
}

/// Top-level degrees document.
#[derive(Debug, Serialize)]
struct DegreesDoc {
    school: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    catalog_year: Option<String>,
    generated: String,
    stats: StatsDoc,
    degrees: Vec<DegreeDoc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unresolved_tables: Vec<FailureDoc>,
}

/// Top-level groups document.
#[derive(Debug, Serialize)]
struct GroupsDoc<'a> {
    school: &'a str,
    groups: &'a [crate::run::GroupRecord],
}

fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Yaml => serde_yaml_ng::to_string(value)?,
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(value)?;
            text.push('\n');
            text
        }
    })
}

/// Write both documents into `dir`, returning their paths.
pub fn write_output(
    organized: &Organized,
    dir: &Path,
    format: OutputFormat,
) -> Result<(PathBuf, PathBuf)> {
    let generated = chrono::Local::now().format("%Y-%m-%d").to_string();

    let degrees_doc = DegreesDoc {
        school: organized.school.clone(),
        catalog_year: organized.catalog_year.clone(),
        generated,
        stats: StatsDoc {
            total_requirements: organized.stats.total_requirements,
            unknown_requirements: organized.stats.unknown,
            parsed_ratio: 1.0 - organized.stats.unknown_ratio(),
        },
        degrees: organized.degrees.iter().map(DegreeDoc::from).collect(),
        unresolved_tables: organized
            .failures
            .iter()
            .map(|f| FailureDoc {
                table_id: f.table_id.clone(),
                degree: f.degree.clone(),
                error: wrap_report_text(&f.error),
            })
            .collect(),
    };
    let groups_doc = GroupsDoc {
        school: &organized.school,
        groups: &organized.groups,
    };

    let degrees_path = dir.join(format!("{DEGREES_FILE}.{}", format.extension()));
    let groups_path = dir.join(format!("{GROUPS_FILE}.{}", format.extension()));
    fs::write(&degrees_path, render(&degrees_doc, format)?)?;
    fs::write(&groups_path, render(&groups_doc, format)?)?;

    Ok((degrees_path, groups_path))
}
