// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Tally Results
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Per-tally results keyed by binding name, with JSON persistence.

use std::collections::BTreeMap;
use std::path::Path;

use fusion_core::cell::{Cell, MaterialHandle, Partition};
use fusion_core::tally::{Score, TallyBinding};
use fusion_types::error::{FusionError, FusionResult};
use serde::{Deserialize, Serialize};

/// Mean and standard deviation of one tally bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TallyValue {
    pub mean: f64,
    pub std_dev: f64,
}

impl TallyValue {
    pub fn new(mean: f64, std_dev: f64) -> Self {
        TallyValue { mean, std_dev }
    }

    /// Sum of independent buckets: means add, deviations in quadrature.
    pub fn aggregate<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a TallyValue>,
    {
        let (mean, var) = values
            .into_iter()
            .fold((0.0, 0.0), |(m, v), t| (m + t.mean, v + t.std_dev * t.std_dev));
        TallyValue::new(mean, var.sqrt())
    }

    /// std_dev / |mean|, infinite for a zero mean.
    pub fn relative_error(&self) -> f64 {
        if self.mean == 0.0 {
            f64::INFINITY
        } else {
            self.std_dev / self.mean.abs()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TallyResults {
    values: BTreeMap<String, TallyValue>,
}

impl TallyResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair each binding with its `(mean, std_dev)` column, in order.
    pub fn from_columns(bindings: &[TallyBinding], columns: &[(f64, f64)]) -> FusionResult<Self> {
        if bindings.len() != columns.len() {
            return Err(FusionError::ConfigError(format!(
                "{} tally bindings but {} result columns",
                bindings.len(),
                columns.len()
            )));
        }
        let mut results = TallyResults::new();
        for (b, &(mean, std_dev)) in bindings.iter().zip(columns) {
            results.insert(&b.name, TallyValue::new(mean, std_dev));
        }
        Ok(results)
    }

    pub fn insert(&mut self, name: &str, value: TallyValue) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&TallyValue> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TallyValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Name → mean only.
    pub fn means(&self) -> BTreeMap<String, f64> {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.mean))
            .collect()
    }

    /// Aggregate the values recorded for `bindings`; `None` when none of
    /// them has a value.
    pub fn total<'a, I>(&self, bindings: I) -> Option<TallyValue>
    where
        I: IntoIterator<Item = &'a TallyBinding>,
    {
        let matched: Vec<&TallyValue> = bindings
            .into_iter()
            .filter_map(|b| self.get(&b.name))
            .collect();
        if matched.is_empty() {
            None
        } else {
            Some(TallyValue::aggregate(matched))
        }
    }

    /// Aggregate the `score` bindings whose filter covers a cell filled
    /// with `material`. Pass one binding family at a time: cell and
    /// material bindings over the same cells would be counted twice.
    pub fn material_total(
        &self,
        partition: &Partition,
        bindings: &[TallyBinding],
        score: Score,
        material: &MaterialHandle,
    ) -> Option<TallyValue> {
        let cells: Vec<&Cell> = partition.cells_with(material).collect();
        self.total(
            bindings
                .iter()
                .filter(|b| b.score == score && cells.iter().any(|c| b.filter.covers(c))),
        )
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> FusionResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Flat `{name: mean}` file.
    pub fn write_means_json(&self, path: impl AsRef<Path>) -> FusionResult<()> {
        let json = serde_json::to_string_pretty(&self.means())?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn read_json(path: impl AsRef<Path>) -> FusionResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
