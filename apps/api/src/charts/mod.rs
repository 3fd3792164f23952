// Chart rendering for cached review batches.
// Charts are drawn with plotters onto an SVG canvas and returned as image payloads.

pub mod bars;
pub mod handlers;
pub mod infographic;

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 12 x 8 inches at 150 dpi.
pub const CANVAS_SIZE: (u32, u32) = (1800, 1200);

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("nothing to plot")]
    NoData,

    #[error("rendering failed: {0}")]
    Render(String),
}

pub(crate) fn render_err(e: impl std::fmt::Display) -> ChartError {
    ChartError::Render(e.to_string())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualizationKind {
    #[default]
    Ratings,
    NegativeKeywords,
    NegativeBigrams,
    NegativeTrigrams,
    #[serde(rename = "negative_ngram_2_3")]
    NegativeNgram23,
    AiInsights,
}

impl VisualizationKind {
    /// Bar color for the term charts.
    pub fn color(self) -> RGBColor {
        match self {
            VisualizationKind::Ratings => bars::RATINGS_COLOR,
            VisualizationKind::NegativeKeywords => RGBColor(0xEA, 0x43, 0x35),
            VisualizationKind::NegativeBigrams => RGBColor(0xFB, 0xBC, 0x05),
            VisualizationKind::NegativeTrigrams => RGBColor(0x34, 0xA8, 0x53),
            VisualizationKind::NegativeNgram23 => RGBColor(0x80, 0x00, 0x80),
            VisualizationKind::AiInsights => RGBColor(0, 0, 0),
        }
    }
}

/// A rendered SVG document, served as `image/svg+xml`.
#[derive(Debug, Clone)]
pub struct SvgImage(pub String);

impl IntoResponse for SvgImage {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, "image/svg+xml")], self.0).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visualization_kind_query_names() {
        let cases = [
            ("\"ratings\"", VisualizationKind::Ratings),
            ("\"negative_keywords\"", VisualizationKind::NegativeKeywords),
            ("\"negative_bigrams\"", VisualizationKind::NegativeBigrams),
            ("\"negative_trigrams\"", VisualizationKind::NegativeTrigrams),
            ("\"negative_ngram_2_3\"", VisualizationKind::NegativeNgram23),
            ("\"ai_insights\"", VisualizationKind::AiInsights),
        ];
        for (json, expected) in cases {
            let kind: VisualizationKind = serde_json::from_str(json).unwrap();
            assert_eq!(kind, expected);
        }
    }

    #[test]
    fn test_svg_image_content_type() {
        let response = SvgImage("<svg/>".to_string()).into_response();
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "image/svg+xml"
        );
    }
}
