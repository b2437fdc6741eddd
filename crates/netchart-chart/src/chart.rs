//! Chart and layer objects and their Vega-Lite serialization.

use std::ops::Add;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use netchart_core::{Error, ErrorKind, Result, Table};

use crate::config::ChartConfig;
use crate::encoding::Encoding;
use crate::mark::{Mark, MarkProps, MarkType};

/// Chart data: an inline table, or a reference into top-level `datasets`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Data {
    Values { values: Arc<Table> },
    Named { name: String },
}

impl Data {
    pub fn table(&self) -> Option<&Table> {
        match self {
            Data::Values { values } => Some(values),
            Data::Named { .. } => None,
        }
    }
}

impl From<Arc<Table>> for Data {
    fn from(values: Arc<Table>) -> Self {
        Data::Values { values }
    }
}

impl From<Table> for Data {
    fn from(table: Table) -> Self {
        Data::Values {
            values: Arc::new(table),
        }
    }
}

/// Secondary data source for a lookup transform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupData {
    pub data: Data,
    pub key: String,
    pub fields: Vec<String>,
}

impl LookupData {
    pub fn new<S>(data: impl Into<Data>, key: impl Into<String>, fields: impl IntoIterator<Item = S>) -> Self
    where
        S: Into<String>,
    {
        Self {
            data: data.into(),
            key: key.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Transform {
    /// Join each row's `lookup` field against `from.key`, pulling in
    /// `from.fields`.
    Lookup { lookup: String, from: LookupData },
}

/// A single-view chart bound to one table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub data: Data,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark: Option<Mark>,
    #[serde(skip_serializing_if = "Encoding::is_empty")]
    pub encoding: Encoding,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transform: Vec<Transform>,
}

impl Chart {
    pub fn new(data: impl Into<Data>) -> Self {
        Self {
            data: data.into(),
            mark: None,
            encoding: Encoding::default(),
            transform: Vec::new(),
        }
    }

    /// Add channels; channels set in `encoding` replace existing ones.
    pub fn encode(mut self, encoding: Encoding) -> Self {
        self.encoding.merge(encoding);
        self
    }

    pub fn mark(mut self, ty: MarkType, props: MarkProps) -> Self {
        self.mark = Some(Mark { ty, props });
        self
    }

    pub fn mark_point(self, props: MarkProps) -> Self {
        self.mark(MarkType::Point, props)
    }

    pub fn mark_circle(self, props: MarkProps) -> Self {
        self.mark(MarkType::Circle, props)
    }

    pub fn mark_line(self, props: MarkProps) -> Self {
        self.mark(MarkType::Line, props)
    }

    pub fn mark_text(self, props: MarkProps) -> Self {
        self.mark(MarkType::Text, props)
    }

    pub fn transform_lookup(mut self, lookup: impl Into<String>, from: LookupData) -> Self {
        self.transform.push(Transform::Lookup {
            lookup: lookup.into(),
            from,
        });
        self
    }

    pub fn to_vega_lite(&self, config: &ChartConfig) -> Result<Value> {
        let mut chart = self.clone();
        let mut datasets = Datasets::default();
        chart
            .prepare(config, &mut datasets)
            .map_err(|e| e.with_operation("chart::to_vega_lite"))?;
        finish(to_value(&chart)?, datasets, config)
    }

    fn data_mut(&mut self) -> impl Iterator<Item = &mut Data> {
        let lookups = self.transform.iter_mut().map(|t| match t {
            Transform::Lookup { from, .. } => &mut from.data,
        });
        std::iter::once(&mut self.data).chain(lookups)
    }

    /// Check marks and row limits, and hoist inline tables when configured.
    fn prepare(&mut self, config: &ChartConfig, datasets: &mut Datasets) -> Result<()> {
        if self.mark.is_none() {
            return Err(Error::invalid_argument("chart has no mark"));
        }
        for data in self.data_mut() {
            let Data::Values { values } = &mut *data else {
                continue;
            };
            if let Some(limit) = config.row_limit()
                && values.len() > limit
            {
                return Err(Error::new(
                    ErrorKind::MaxRowsExceeded,
                    format!("dataset has {} rows, limit is {}", values.len(), limit),
                )
                .with_context("rows", values.len().to_string()));
            }
            if config.consolidate_datasets {
                let name = datasets.name_for(values)?;
                *data = Data::Named { name };
            }
        }
        Ok(())
    }
}

/// Charts drawn on top of each other, first layer at the bottom.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LayerChart {
    pub layer: Vec<Chart>,
}

impl LayerChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chart: Chart) {
        self.layer.push(chart);
    }

    pub fn to_vega_lite(&self, config: &ChartConfig) -> Result<Value> {
        let mut layered = self.clone();
        let mut datasets = Datasets::default();
        for (i, chart) in layered.layer.iter_mut().enumerate() {
            chart.prepare(config, &mut datasets).map_err(|e| {
                e.with_operation("layer::to_vega_lite")
                    .with_context("layer", i.to_string())
            })?;
        }
        finish(to_value(&layered)?, datasets, config)
    }
}

impl FromIterator<Chart> for LayerChart {
    fn from_iter<I: IntoIterator<Item = Chart>>(iter: I) -> Self {
        Self {
            layer: iter.into_iter().collect(),
        }
    }
}

impl Add for Chart {
    type Output = LayerChart;

    fn add(self, rhs: Chart) -> LayerChart {
        LayerChart {
            layer: vec![self, rhs],
        }
    }
}

impl Add<Chart> for LayerChart {
    type Output = LayerChart;

    fn add(mut self, rhs: Chart) -> LayerChart {
        self.push(rhs);
        self
    }
}

/// Top-level `datasets`, deduplicated by table identity or content.
#[derive(Default)]
struct Datasets {
    tables: Vec<(Arc<Table>, String)>,
    values: Map<String, Value>,
}

impl Datasets {
    fn name_for(&mut self, table: &Arc<Table>) -> Result<String> {
        if let Some((_, name)) = self
            .tables
            .iter()
            .find(|(known, _)| Arc::ptr_eq(known, table) || known == table)
        {
            return Ok(name.clone());
        }
        let name = format!("data-{}", self.tables.len());
        self.values.insert(name.clone(), to_value(&**table)?);
        self.tables.push((Arc::clone(table), name.clone()));
        Ok(name)
    }
}

fn to_value<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| {
        Error::new(ErrorKind::SerializationFailed, e.to_string())
            .with_operation("chart::to_value")
            .set_source(e)
    })
}

fn finish(body: Value, datasets: Datasets, config: &ChartConfig) -> Result<Value> {
    let Value::Object(fields) = body else {
        return Err(Error::unexpected("chart did not serialize to an object"));
    };

    let mut top = Map::new();
    top.insert("$schema".to_string(), Value::from(config.schema.clone()));
    if let Some(width) = config.width {
        top.insert("width".to_string(), Value::from(width));
    }
    if let Some(height) = config.height {
        top.insert("height".to_string(), Value::from(height));
    }
    top.extend(fields);
    if !datasets.values.is_empty() {
        debug!(datasets = datasets.values.len(), "consolidated datasets");
        top.insert("datasets".to_string(), Value::Object(datasets.values));
    }
    Ok(Value::Object(top))
}
