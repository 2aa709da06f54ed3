use super::escape;
use crate::models::WeeklyCount;

const WIDTH: u32 = 600;
const HEIGHT: u32 = 220;
const PAD_LEFT: u32 = 40;
const PAD_RIGHT: u32 = 16;
const PAD_TOP: u32 = 16;
const PAD_BOTTOM: u32 = 32;

/// Bar chart of completions per week as inline SVG.
pub fn render_weekly_chart(weeks: &[WeeklyCount]) -> String {
    let plot_w = WIDTH - PAD_LEFT - PAD_RIGHT;
    let plot_h = HEIGHT - PAD_TOP - PAD_BOTTOM;
    let baseline = PAD_TOP + plot_h;
    let max = weeks.iter().map(|week| week.count).max().unwrap_or(0).max(1);

    let mut svg = format!(
        r#"<svg viewBox="0 0 {WIDTH} {HEIGHT}" role="img" aria-label="Plans completed per week">"#
    );

    // Integer ticks only; at most five of them.
    let step = max.div_ceil(4).max(1);
    let mut tick = 0;
    while tick <= max {
        let y = baseline - (tick as f64 / max as f64 * plot_h as f64).round() as u32;
        svg.push_str(&format!(
            r#"<line class="grid-line" x1="{PAD_LEFT}" y1="{y}" x2="{x2}" y2="{y}" /><text x="{tx}" y="{ty}" text-anchor="end">{tick}</text>"#,
            x2 = WIDTH - PAD_RIGHT,
            tx = PAD_LEFT - 6,
            ty = y + 4,
        ));
        tick += step;
    }

    if !weeks.is_empty() {
        let slot = plot_w / weeks.len() as u32;
        let bar_w = slot * 3 / 5;
        for (index, week) in weeks.iter().enumerate() {
            let bar_h = (week.count as f64 / max as f64 * plot_h as f64).round() as u32;
            let x = PAD_LEFT + slot * index as u32 + (slot - bar_w) / 2;
            let center = x + bar_w / 2;
            svg.push_str(&format!(
                r#"<rect class="bar" x="{x}" y="{y}" width="{bar_w}" height="{bar_h}"><title>{label}: {count}</title></rect><text x="{center}" y="{label_y}" text-anchor="middle">{label}</text>"#,
                y = baseline - bar_h,
                label = escape(&week.label),
                count = week.count,
                label_y = baseline + 18,
            ));
        }
    }

    svg.push_str(&format!(
        r#"<line class="axis" x1="{PAD_LEFT}" y1="{baseline}" x2="{x2}" y2="{baseline}" /></svg>"#,
        x2 = WIDTH - PAD_RIGHT,
    ));
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn week(day: u32, count: u64) -> WeeklyCount {
        let start = NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        WeeklyCount {
            label: start.format("%b %-d").to_string(),
            week_start: start,
            count,
        }
    }

    #[test]
    fn draws_one_bar_per_week_in_order() {
        let svg = render_weekly_chart(&[week(4, 1), week(11, 3), week(18, 0)]);

        assert_eq!(svg.matches("<rect").count(), 3);
        let first = svg.find("Mar 4: 1").unwrap();
        let last = svg.find("Mar 18: 0").unwrap();
        assert!(first < last);
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn empty_series_still_has_axis() {
        let svg = render_weekly_chart(&[]);
        assert!(svg.contains(r#"class="axis""#));
        assert!(!svg.contains("<rect"));
    }
}
