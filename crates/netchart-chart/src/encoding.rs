//! Encoding channels.

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Quantitative,
    Ordinal,
    Nominal,
    Temporal,
}

/// Axis of a positional channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    /// Renderer default axis; omitted from output.
    #[default]
    Default,
    /// No axis; written as `"axis": null`.
    Hidden,
}

impl Axis {
    fn is_default(&self) -> bool {
        matches!(self, Axis::Default)
    }
}

impl Serialize for Axis {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Axis::Default => serializer.serialize_unit_struct("Axis"),
            Axis::Hidden => serializer.serialize_none(),
        }
    }
}

/// `x` / `y` channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionChannel {
    pub field: String,
    #[serde(rename = "type")]
    pub ty: FieldType,
    #[serde(skip_serializing_if = "Axis::is_default")]
    pub axis: Axis,
}

impl PositionChannel {
    pub fn quantitative(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ty: FieldType::Quantitative,
            axis: Axis::Default,
        }
    }

    pub fn hide_axis(mut self) -> Self {
        self.axis = Axis::Hidden;
        self
    }
}

/// Non-positional field channel (`detail`, `text`, `color`, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldChannel {
    pub field: String,
    #[serde(rename = "type")]
    pub ty: FieldType,
}

impl FieldChannel {
    pub fn new(field: impl Into<String>, ty: FieldType) -> Self {
        Self {
            field: field.into(),
            ty,
        }
    }

    pub fn nominal(field: impl Into<String>) -> Self {
        Self::new(field, FieldType::Nominal)
    }

    pub fn quantitative(field: impl Into<String>) -> Self {
        Self::new(field, FieldType::Quantitative)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Encoding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<PositionChannel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<PositionChannel>,
    /// Splits shared geometry into one mark per distinct value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<FieldChannel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<FieldChannel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<FieldChannel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<FieldChannel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tooltip: Vec<FieldChannel>,
}

impl Encoding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x(mut self, channel: PositionChannel) -> Self {
        self.x = Some(channel);
        self
    }

    pub fn y(mut self, channel: PositionChannel) -> Self {
        self.y = Some(channel);
        self
    }

    pub fn detail(mut self, channel: FieldChannel) -> Self {
        self.detail = Some(channel);
        self
    }

    pub fn text(mut self, channel: FieldChannel) -> Self {
        self.text = Some(channel);
        self
    }

    pub fn color(mut self, channel: FieldChannel) -> Self {
        self.color = Some(channel);
        self
    }

    pub fn size(mut self, channel: FieldChannel) -> Self {
        self.size = Some(channel);
        self
    }

    pub fn tooltip(mut self, channel: FieldChannel) -> Self {
        self.tooltip.push(channel);
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Overlay `other`: its set channels replace ours, tooltips append.
    pub fn merge(&mut self, other: Encoding) {
        let Encoding {
            x,
            y,
            detail,
            text,
            color,
            size,
            tooltip,
        } = other;
        self.x = x.or(self.x.take());
        self.y = y.or(self.y.take());
        self.detail = detail.or(self.detail.take());
        self.text = text.or(self.text.take());
        self.color = color.or(self.color.take());
        self.size = size.or(self.size.take());
        self.tooltip.extend(tooltip);
    }
}
