use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::age::plural;
use crate::background::PlacedGlyph;
use crate::report::AgeReport;

const START_Y: i32 = 30;
const LINE_HEIGHT: i32 = 20;
const LEFT_PADDING: f32 = 15.0;
const RIGHT_PADDING: f32 = 30.0;
const CHAR_WIDTH: f32 = 9.6;
const MIN_ROW_CHARS: usize = 50;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

pub struct ThemeColors {
    pub bg: &'static str,
    pub text: &'static str,
    pub key: &'static str,
    pub value: &'static str,
    pub cc: &'static str,
    pub numbers: &'static str,
}

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                bg: "#111827",
                text: "#ffffff",
                key: "#ffa657",
                value: "#a5d6ff",
                cc: "#616e7f",
                numbers: "rgba(255,255,255,0.2)",
            },
            Theme::Light => ThemeColors {
                bg: "#dbeafe",
                text: "#111827",
                key: "#d73a49",
                value: "#2563eb",
                cc: "#6a737d",
                numbers: "rgba(0,0,0,0.4)",
            },
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

// Utilities for building SVG content

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn build_stat_row(key: &str, value: &str, align_width: usize) -> (String, String, String) {
    let key_part = format!("{key}: ");
    let base_len = key_part.len() + value.len();
    let available = align_width.saturating_sub(base_len);

    let dots = match available {
        0 => "".to_string(),
        1 => " ".to_string(),
        2 => ". ".to_string(),
        n => ".".repeat(n),
    };

    (key_part, dots, value.to_string())
}

fn build_header_line(label: &str, align_width: usize) -> String {
    let base = format!("{label} ");
    let dash_count = align_width.saturating_sub(base.len()) + 2;
    format!("{base}{}", "-".repeat(dash_count))
}

enum Line {
    Header(String),
    Blank,
    Stat(String, String),
}

fn report_lines(report: &AgeReport) -> Vec<Line> {
    let mut lines = vec![
        Line::Header("Age Calculator".to_string()),
        Line::Stat("Birth date".to_string(), report.birth.to_string()),
        Line::Stat("Reference date".to_string(), report.reference.to_string()),
        Line::Stat("Age".to_string(), report.elapsed.sentence()),
        Line::Blank,
        Line::Header("- Totals".to_string()),
        Line::Stat("Months".to_string(), report.total_months.to_string()),
        Line::Stat(
            "Days (30/365)".to_string(),
            report.total_days_approx.to_string(),
        ),
        Line::Stat("Days (exact)".to_string(), report.exact_days.to_string()),
        Line::Stat("Hours".to_string(), report.elapsed.hours.to_string()),
        Line::Stat("Whole years".to_string(), report.whole_years.to_string()),
    ];

    if let Some(days) = report.days_since_milestone {
        lines.push(Line::Stat(
            format!("Over {}", report.milestone_years),
            format!("{days} day{}", plural(days)),
        ));
    }

    lines
}

// Builds the report column and returns (tspans, width, height)

fn build_report_column(report: &AgeReport) -> (String, f32, f32) {
    let lines = report_lines(report);

    let align_width = lines
        .iter()
        .filter_map(|line| match line {
            Line::Stat(k, v) => Some(k.len() + 2 + v.len()),
            _ => None,
        })
        .max()
        .unwrap_or(0)
        .max(MIN_ROW_CHARS);

    let mut tspans = String::new();
    for (i, line) in lines.iter().enumerate() {
        let y = START_Y + (i as i32) * LINE_HEIGHT;

        match line {
            Line::Blank => {}
            Line::Header(label) => {
                tspans.push_str(&format!(
                    r#"<tspan x="{LEFT_PADDING}" y="{y}">{}</tspan>
"#,
                    escape_xml(&build_header_line(label, align_width))
                ));
            }
            Line::Stat(key, value) => {
                let (k, d, v) = build_stat_row(key, value, align_width);
                tspans.push_str(&format!(
                    r#"<tspan x="{LEFT_PADDING}" y="{y}" class="cc">. </tspan>
<tspan class="key">{}</tspan><tspan class="cc">{}</tspan><tspan class="value">{}</tspan>
"#,
                    escape_xml(&k),
                    escape_xml(&d),
                    escape_xml(&v)
                ));
            }
        }
    }

    let width = LEFT_PADDING + (align_width as f32 + 2.0) * CHAR_WIDTH + RIGHT_PADDING;
    let height = lines.len() as f32 * LINE_HEIGHT as f32 + START_Y as f32;

    (tspans, width, height)
}

fn build_glyphs(glyphs: &[PlacedGlyph]) -> String {
    let mut out = String::new();
    for g in glyphs {
        out.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="{:.1}px" class="number">{}<animateTransform attributeName="transform" type="translate" from="0 0" to="{:.1} {:.1}" dur="{:.2}s" repeatCount="indefinite"/></text>
"#,
            g.x, g.y, g.size_px, g.value, g.dx, g.dy, g.duration_secs
        ));
    }
    out
}

/// Size of the card for a report, never smaller than the viewport.
pub fn canvas_size(report: &AgeReport, viewport: (u32, u32)) -> (u32, u32) {
    let (_, w, h) = build_report_column(report);
    (
        viewport.0.max(w.ceil() as u32),
        viewport.1.max(h.ceil() as u32),
    )
}

/// Main SVG generation function
pub fn generate_svg(
    report: &AgeReport,
    glyphs: &[PlacedGlyph],
    theme: Theme,
    canvas: (u32, u32),
) -> String {
    let colors = theme.colors();
    let (rows, _, _) = build_report_column(report);
    let numbers = build_glyphs(glyphs);

    format!(
        r#"<?xml version='1.0' encoding='UTF-8'?>
<svg xmlns="http://www.w3.org/2000/svg"
     width="{w}px" height="{h}px"
     font-family="ConsolasFallback,Consolas,monospace"
     font-size="16px">

<title>Age Calculator</title>
<desc>{sentence}</desc>

<style>
.key      {{ fill: {key}; }}
.value    {{ fill: {value}; }}
.cc       {{ fill: {cc}; }}
.number   {{ fill: {numbers_fill}; user-select: none; }}
</style>

<rect width="{w}px" height="{h}px" fill="{bg}" rx="15"/>

<!-- BACKGROUND NUMBERS -->
<g>
{numbers}</g>

<!-- REPORT -->
<text fill="{text}" xml:space="preserve">
{rows}</text>

</svg>
"#,
        w = canvas.0,
        h = canvas.1,
        sentence = escape_xml(&report.sentence()),
        bg = colors.bg,
        text = colors.text,
        key = colors.key,
        value = colors.value,
        cc = colors.cc,
        numbers_fill = colors.numbers,
    )
}
