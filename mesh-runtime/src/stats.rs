//! Human-readable mesh statistics with metric prefixes

use std::fmt;

use procmesh_core::{Bounds, MeshData};

const METRIC_STEP: f32 = 1e3;

/// Decimal prefix, stored as the power of 1000 it stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Metric {
    Pico = -4,
    Nano = -3,
    Micro = -2,
    Milli = -1,
    Normal = 0,
    Kilo = 1,
    Mega = 2,
    Giga = 3,
    Tera = 4,
}

impl Metric {
    const ALL: [Metric; 9] = [
        Metric::Pico,
        Metric::Nano,
        Metric::Micro,
        Metric::Milli,
        Metric::Normal,
        Metric::Kilo,
        Metric::Mega,
        Metric::Giga,
        Metric::Tera,
    ];

    pub fn prefix(self) -> &'static str {
        match self {
            Metric::Pico => "p",
            Metric::Nano => "n",
            Metric::Micro => "μ",
            Metric::Milli => "m",
            Metric::Normal => "",
            Metric::Kilo => "K",
            Metric::Mega => "M",
            Metric::Giga => "G",
            Metric::Tera => "T",
        }
    }

    fn exponent(self) -> i32 {
        self as i32
    }

    /// Next larger prefix, `None` at tera
    fn larger(self) -> Option<Metric> {
        Metric::ALL.get((self.exponent() - Metric::Pico.exponent() + 1) as usize).copied()
    }

    /// Largest prefix not exceeding `|value|`, clamped to pico..tera
    pub fn for_value(value: f32) -> Metric {
        if value == 0.0 || !value.is_finite() {
            return Metric::Normal;
        }
        let exponent = value.abs().log(METRIC_STEP).floor() as i32;
        let index = (exponent - Metric::Pico.exponent()).clamp(0, Metric::ALL.len() as i32 - 1);
        Metric::ALL[index as usize]
    }
}

/// Re-express `value` given in `from` units in `to` units
pub fn convert(value: f32, from: Metric, to: Metric) -> f32 {
    value * METRIC_STEP.powi(from.exponent() - to.exponent())
}

/// Scale a plain value to its best prefix: `1536.0` -> `(1.536, "K")`
pub fn auto_convert(value: f32) -> (f32, &'static str) {
    let mut metric = Metric::for_value(value);
    let mut scaled = convert(value, Metric::Normal, metric);

    // Two-decimal rounding can carry into the next prefix: 999.999K is 1M
    if scaled.is_finite()
        && (scaled * 100.0).round().abs() >= METRIC_STEP * 100.0
        && let Some(larger) = metric.larger()
    {
        metric = larger;
        scaled = convert(value, Metric::Normal, metric);
    }

    (scaled, metric.prefix())
}

/// `1536` -> `"1.54K"`, `24` -> `"24"`
pub fn format_metric(value: f32) -> String {
    let (scaled, prefix) = auto_convert(value);
    let text = format!("{scaled:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{text}{prefix}")
}

/// Debug summary of a generated mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshStats {
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub bounds: Bounds,
}

impl MeshStats {
    pub fn from_mesh(mesh: &MeshData) -> Self {
        Self {
            vertex_count: mesh.vertex_count(),
            triangle_count: mesh.triangle_count(),
            bounds: mesh.bounds,
        }
    }

    pub fn vertices_info(&self) -> String {
        format_metric(self.vertex_count as f32)
    }

    pub fn triangles_info(&self) -> String {
        format_metric(self.triangle_count as f32)
    }

    pub fn bounds_info(&self) -> String {
        let c = self.bounds.center;
        let s = self.bounds.size;
        format!(
            "center ({}, {}, {}), size ({}, {}, {})",
            format_metric(c.x),
            format_metric(c.y),
            format_metric(c.z),
            format_metric(s.x),
            format_metric(s.y),
            format_metric(s.z)
        )
    }
}

impl fmt::Display for MeshStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vertices, {} triangles, {}",
            self.vertices_info(),
            self.triangles_info(),
            self.bounds_info()
        )
    }
}
