use std::str::FromStr;

use crate::config::ConfigError;
use crate::models::CommitDayCount;

const WIDTH: f32 = 640.0;
const HEIGHT: f32 = 300.0;
const MARGIN_LEFT: f32 = 50.0;
const MARGIN_RIGHT: f32 = 20.0;
const MARGIN_TOP: f32 = 40.0;
const MARGIN_BOTTOM: f32 = 40.0;
const BAR_FILL: &str = "#4f46e5";
const BAR_RATIO: f32 = 0.8;
const MAX_TICKS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

pub struct ThemeColors {
    pub bg: &'static str,
    pub text: &'static str,
    pub grid: &'static str,
    pub axis: &'static str,
}

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                bg: "#161b22",
                text: "#c9d1d9",
                grid: "#30363d",
                axis: "#616e7f",
            },
            Theme::Light => ThemeColors {
                bg: "#ffffff",
                text: "#24292f",
                grid: "#d0d7de",
                axis: "#6a737d",
            },
        }
    }
}

impl FromStr for Theme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(ConfigError::UnknownTheme(s.to_string())),
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Integer y-axis scale: (tick step, axis maximum). Never zero.
pub fn y_scale(max_count: u32) -> (u32, u32) {
    if max_count == 0 {
        return (1, 1);
    }
    let step = max_count.div_ceil(MAX_TICKS);
    (step, step * max_count.div_ceil(step))
}

fn build_grid(y_max: u32, step: u32, plot_h: f32) -> String {
    let mut out = String::new();
    let mut tick = 0;

    while tick <= y_max {
        let y = MARGIN_TOP + plot_h - (tick as f32 / y_max as f32) * plot_h;
        out.push_str(&format!(
            r#"<line class="grid" x1="{MARGIN_LEFT}" y1="{y}" x2="{x2}" y2="{y}"/>
<text class="label" x="{lx}" y="{ly}" text-anchor="end">{tick}</text>
"#,
            x2 = WIDTH - MARGIN_RIGHT,
            lx = MARGIN_LEFT - 8.0,
            ly = y + 4.0,
        ));
        tick += step;
    }

    out
}

fn build_bars(data: &[CommitDayCount], y_max: u32, plot_w: f32, plot_h: f32) -> String {
    let mut out = String::new();
    if data.is_empty() {
        return out;
    }

    let band = plot_w / data.len() as f32;
    let bar_w = band * BAR_RATIO;

    for (i, day) in data.iter().enumerate() {
        let h = (day.count as f32 / y_max as f32) * plot_h;
        let x = MARGIN_LEFT + band * i as f32 + (band - bar_w) / 2.0;
        let y = MARGIN_TOP + plot_h - h;
        let cx = x + bar_w / 2.0;
        let date = escape_xml(&day.date);

        out.push_str(&format!(
            r#"<rect class="bar" x="{x}" y="{y}" width="{bar_w}" height="{h}"><title>{date}: {count}</title></rect>
<text class="label" x="{cx}" y="{ly}" text-anchor="middle">{date}</text>
"#,
            count = day.count,
            ly = MARGIN_TOP + plot_h + 18.0,
        ));
    }

    out
}

/// Render commit counts per day as an SVG bar chart.
pub fn generate_svg(data: &[CommitDayCount], title: &str, theme: Theme) -> String {
    let colors = theme.colors();
    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

    let max_count = data.iter().map(|d| d.count).max().unwrap_or(0);
    let (step, y_max) = y_scale(max_count);

    let grid = build_grid(y_max, step, plot_h);
    let bars = build_bars(data, y_max, plot_w, plot_h);

    format!(
        r#"<?xml version='1.0' encoding='UTF-8'?>
<svg xmlns="http://www.w3.org/2000/svg"
     width="{WIDTH}px" height="{HEIGHT}px"
     font-family="Segoe UI,Helvetica,Arial,sans-serif"
     font-size="12px">

<style>
.grid  {{ stroke: {grid}; stroke-dasharray: 3 3; }}
.axis  {{ stroke: {axis}; }}
.label {{ fill: {text}; }}
.title {{ fill: {text}; font-size: 16px; font-weight: bold; }}
.bar   {{ fill: {BAR_FILL}; }}
</style>

<rect width="{WIDTH}px" height="{HEIGHT}px" fill="{bg}" rx="8"/>
<text class="title" x="{MARGIN_LEFT}" y="24">{title}</text>

<!-- GRID -->
{grid_lines}
<line class="axis" x1="{MARGIN_LEFT}" y1="{base}" x2="{x2}" y2="{base}"/>

<!-- BARS -->
{bars}
</svg>
"#,
        grid = colors.grid,
        axis = colors.axis,
        text = colors.text,
        bg = colors.bg,
        title = escape_xml(title),
        grid_lines = grid,
        base = MARGIN_TOP + plot_h,
        x2 = WIDTH - MARGIN_RIGHT,
        bars = bars,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_uses_whole_numbers() {
        assert_eq!(y_scale(0), (1, 1));
        assert_eq!(y_scale(1), (1, 1));
        assert_eq!(y_scale(5), (1, 5));
        assert_eq!(y_scale(7), (2, 8));
        assert_eq!(y_scale(23), (5, 25));
    }

    #[test]
    fn one_bar_per_day() {
        let data = vec![
            CommitDayCount::new("2024-01-01", 1),
            CommitDayCount::new("2024-01-02", 3),
            CommitDayCount::new("2024-01-04", 2),
        ];
        let svg = generate_svg(&data, "Commits", Theme::Dark);

        assert_eq!(svg.matches(r#"class="bar""#).count(), 3);
        assert!(svg.contains("2024-01-02: 3"));
        assert!(svg.contains("#4f46e5"));
        assert!(svg.contains("#161b22"));
    }

    #[test]
    fn empty_data_draws_axes_only() {
        let svg = generate_svg(&[], "Nothing", Theme::Light);
        assert!(!svg.contains(r#"class="bar""#));
        assert!(svg.contains(r#"class="axis""#));
        assert!(svg.contains("#ffffff"));
    }

    #[test]
    fn title_is_escaped() {
        let svg = generate_svg(&[], r#"Commits in "a<b>" (last 7 days)"#, Theme::Dark);
        assert!(svg.contains("Commits in &quot;a&lt;b&gt;&quot; (last 7 days)"));
    }

    #[test]
    fn theme_parsing() {
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!("Light".parse::<Theme>(), Ok(Theme::Light));
        assert!("neon".parse::<Theme>().is_err());
    }
}
