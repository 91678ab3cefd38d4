//! Editable view-model behind the disclosure form, and its mapping to the wire request.

use std::{fs, path::Path};

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use shared::{
    domain::{Framework, Tone},
    protocol::{DisclosureRequest, Metric},
};

use crate::error::ValidationError;

/// Bounds for the desktop year picker. Not enforced by [`DisclosureForm::validate`].
pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricRow {
    pub name: String,
    pub value: String,
    pub unit: String,
}

impl MetricRow {
    pub fn new(name: impl Into<String>, value: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            unit: unit.into(),
        }
    }

    fn to_metric(&self) -> Metric {
        Metric {
            name: self.name.clone(),
            value: self.value.clone(),
            unit: Some(self.unit.clone()),
        }
    }
}

/// One checkbox per framework.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameworkSelection {
    checked: [bool; 4],
}

impl FrameworkSelection {
    pub fn only(framework: Framework) -> Self {
        let mut selection = Self::default();
        selection.set(framework, true);
        selection
    }

    pub fn from_frameworks(frameworks: &[Framework]) -> Self {
        let mut selection = Self::default();
        for framework in frameworks {
            selection.set(*framework, true);
        }
        selection
    }

    pub fn is_selected(&self, framework: Framework) -> bool {
        self.checked[framework.position()]
    }

    pub fn set(&mut self, framework: Framework, checked: bool) {
        self.checked[framework.position()] = checked;
    }

    pub fn toggle(&mut self, framework: Framework) {
        let flag = self.flag_mut(framework);
        *flag = !*flag;
    }

    pub fn flag_mut(&mut self, framework: Framework) -> &mut bool {
        &mut self.checked[framework.position()]
    }

    /// Checked frameworks in declared order, regardless of the order they were toggled.
    pub fn selected(&self) -> Vec<Framework> {
        Framework::ALL
            .into_iter()
            .filter(|framework| self.is_selected(*framework))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisclosureForm {
    pub company_name: String,
    pub sector: String,
    pub year: i32,
    pub tone: Tone,
    pub initiatives: String,
    pub frameworks: FrameworkSelection,
    pub metrics: Vec<MetricRow>,
}

impl Default for DisclosureForm {
    fn default() -> Self {
        Self {
            company_name: "Acme Corp".into(),
            sector: "Technology".into(),
            year: 2024,
            tone: Tone::Regulatory,
            initiatives: "We migrated data centers to renewable electricity and launched an inclusion program.".into(),
            frameworks: FrameworkSelection::only(Framework::Csrd),
            metrics: vec![
                MetricRow::new("Scope 1 emissions", "12000", "tCO2e"),
                MetricRow::new("% women on board", "42", "%"),
            ],
        }
    }
}

impl DisclosureForm {
    pub fn add_metric(&mut self) {
        self.metrics.push(MetricRow::default());
    }

    /// Removes row `index`, shifting later rows up. Out-of-range indices are ignored.
    pub fn remove_metric(&mut self, index: usize) -> Option<MetricRow> {
        (index < self.metrics.len()).then(|| self.metrics.remove(index))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("company_name", &self.company_name)?;
        require("sector", &self.sector)?;
        require("initiatives", &self.initiatives)?;

        for (index, row) in self.metrics.iter().enumerate() {
            if row.name.trim().is_empty() {
                return Err(ValidationError::IncompleteMetric {
                    index,
                    field: "name",
                });
            }
            if row.value.trim().is_empty() {
                return Err(ValidationError::IncompleteMetric {
                    index,
                    field: "value",
                });
            }
        }
        Ok(())
    }

    pub fn to_request(&self) -> Result<DisclosureRequest, ValidationError> {
        self.validate()?;
        Ok(DisclosureRequest {
            company_name: self.company_name.clone(),
            sector: self.sector.clone(),
            year: self.year,
            frameworks: self.frameworks.selected(),
            metrics: self.metrics.iter().map(MetricRow::to_metric).collect(),
            initiatives: self.initiatives.clone(),
            tone: self.tone,
        })
    }

    /// Loads a form from a `.toml` or `.json` file. Fields the file omits keep their demo values.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read form file '{}'", path.display()))?;
        let file: FormFile = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&raw)
                .with_context(|| format!("invalid TOML form file '{}'", path.display()))?,
            Some("json") => serde_json::from_str(&raw)
                .with_context(|| format!("invalid JSON form file '{}'", path.display()))?,
            other => {
                return Err(anyhow!(
                    "unsupported form file extension {:?} for '{}'",
                    other,
                    path.display()
                ))
            }
        };
        Ok(file.into_form())
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

/// On-disk shape of a form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormFile {
    pub company_name: Option<String>,
    pub sector: Option<String>,
    pub year: Option<i32>,
    pub tone: Option<Tone>,
    pub initiatives: Option<String>,
    pub frameworks: Option<Vec<Framework>>,
    pub metrics: Option<Vec<MetricRow>>,
}

impl FormFile {
    pub fn into_form(self) -> DisclosureForm {
        let mut form = DisclosureForm::default();
        if let Some(v) = self.company_name {
            form.company_name = v;
        }
        if let Some(v) = self.sector {
            form.sector = v;
        }
        if let Some(v) = self.year {
            form.year = v;
        }
        if let Some(v) = self.tone {
            form.tone = v;
        }
        if let Some(v) = self.initiatives {
            form.initiatives = v;
        }
        if let Some(v) = self.frameworks {
            form.frameworks = FrameworkSelection::from_frameworks(&v);
        }
        if let Some(v) = self.metrics {
            form.metrics = v;
        }
        form
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
