//! Text infographic for LLM-generated insights.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle};

use crate::charts::{render_err, ChartError, CANVAS_SIZE};
use crate::insights::Insight;

pub const PROBLEM_COLOR: RGBColor = RGBColor(0xB7, 0x1C, 0x1C);
pub const ACTION_COLOR: RGBColor = RGBColor(0x1B, 0x5E, 0x20);
const RULE_COLOR: RGBColor = RGBColor(0xCC, 0xCC, 0xCC);

pub const WRAP_WIDTH: usize = 80;

// Pixel layout on the 1800x1200 canvas.
const LEFT: i32 = 90;
const RIGHT: i32 = 1710;
const FIRST_BLOCK_TOP: i32 = 120;
const LINE_HEIGHT: i32 = 36;
const PROBLEM_GAP: i32 = 24;
const INSIGHT_GAP: i32 = 60;
const BODY_FONT_PX: f64 = 25.0;

/// Wraps `prefix` + `text` to `WRAP_WIDTH` columns.
pub fn wrap_line(prefix: &str, text: &str) -> Vec<String> {
    textwrap::wrap(&format!("{prefix}{text}"), WRAP_WIDTH)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

pub fn render_insights(title: &str, insights: &[Insight]) -> Result<String, ChartError> {
    let (width, height) = CANVAS_SIZE;
    let center_x = (width / 2) as i32;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CANVAS_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let title_style = FontDesc::new(FontFamily::SansSerif, 33.0, FontStyle::Bold)
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));
        root.draw(&Text::new(title.to_string(), (center_x, 40), title_style))
            .map_err(render_err)?;

        if insights.is_empty() {
            let style = FontDesc::new(FontFamily::SansSerif, 42.0, FontStyle::Normal)
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center));
            root.draw(&Text::new(
                "No Insights Generated".to_string(),
                (center_x, (height / 2) as i32),
                style,
            ))
            .map_err(render_err)?;
        }

        let problem_style =
            FontDesc::new(FontFamily::SansSerif, BODY_FONT_PX, FontStyle::Bold).color(&PROBLEM_COLOR);
        let action_style =
            FontDesc::new(FontFamily::SansSerif, BODY_FONT_PX, FontStyle::Normal).color(&ACTION_COLOR);

        let mut y = FIRST_BLOCK_TOP;
        for insight in insights {
            let problem = wrap_line("[!] PROBLEM: ", &insight.problem_description);
            for (i, line) in problem.iter().enumerate() {
                root.draw(&Text::new(
                    line.clone(),
                    (LEFT, y + i as i32 * LINE_HEIGHT),
                    problem_style.clone(),
                ))
                .map_err(render_err)?;
            }
            y += LINE_HEIGHT * problem.len() as i32 + PROBLEM_GAP;

            let action = wrap_line("[V] ACTION: ", &insight.improvement_option);
            for (i, line) in action.iter().enumerate() {
                root.draw(&Text::new(
                    line.clone(),
                    (LEFT, y + i as i32 * LINE_HEIGHT),
                    action_style.clone(),
                ))
                .map_err(render_err)?;
            }
            y += LINE_HEIGHT * action.len() as i32 + INSIGHT_GAP;

            let rule_y = y - PROBLEM_GAP;
            root.draw(&PathElement::new(
                vec![(LEFT, rule_y), (RIGHT, rule_y)],
                RULE_COLOR.stroke_width(1),
            ))
            .map_err(render_err)?;
        }

        root.present().map_err(render_err)?;
    }
    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_line_splits_long_text() {
        let text = "word ".repeat(40);
        let lines = wrap_line("[!] PROBLEM: ", &text);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= WRAP_WIDTH));
        assert!(lines[0].starts_with("[!] PROBLEM: word"));
    }

    #[test]
    fn test_renders_problem_and_action_text() {
        let insights = vec![Insight {
            problem_description: "Subscription cancels are hard to find".to_string(),
            improvement_option: "Add a cancel button to settings".to_string(),
        }];
        let svg = render_insights("AI Actionable Insights for App ID 7", &insights).unwrap();
        assert!(svg.contains("AI Actionable Insights for App ID 7"));
        assert!(svg.contains("[!] PROBLEM: Subscription cancels are hard to find"));
        assert!(svg.contains("[V] ACTION: Add a cancel button to settings"));
        assert!(!svg.contains("No Insights Generated"));
    }

    #[test]
    fn test_empty_insights_placeholder() {
        let svg = render_insights("AI Actionable Insights for App ID 7", &[]).unwrap();
        assert!(svg.contains("No Insights Generated"));
    }
}
