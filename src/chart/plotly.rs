//! Plotly figure JSON (`{"data": [...], "layout": {...}}`).

use serde_json::{json, Value};

use crate::chart::figure::{Bar, TimelineFigure};

const HOVER_TEMPLATE: &str =
    "<b>%{y}</b><br>%{text}<br>From: %{customdata[0]}<br>To: %{customdata[1]}<extra></extra>";

/// Serialize the figure as a Plotly `Figure` object.
pub fn to_plotly_json(figure: &TimelineFigure) -> Value {
    let data: Vec<Value> = figure.bars.iter().map(bar_trace).collect();
    json!({
        "data": data,
        "layout": layout(figure),
    })
}

fn bar_trace(bar: &Bar) -> Value {
    json!({
        "type": "bar",
        "orientation": "h",
        "x": [bar.interval.width()],
        "y": [bar.league.abbreviation()],
        "base": [bar.interval.start],
        "name": bar.slot.label(),
        "marker": {
            "color": bar.color,
            "opacity": bar.opacity,
            "line": { "color": "black", "width": 0.5 },
        },
        "text": bar.phase,
        "textposition": "inside",
        "insidetextanchor": "middle",
        "textfont": { "size": 9, "color": "black" },
        "showlegend": false,
        "customdata": [[
            bar.interval.start_label.to_string(),
            bar.interval.end_label.to_string(),
        ]],
        "hovertemplate": HOVER_TEMPLATE,
    })
}

fn layout(figure: &TimelineFigure) -> Value {
    let axis = &figure.axis;
    let ticks = axis.month_ticks();
    let tick_vals: Vec<f64> = ticks.iter().map(|(x, _)| *x).collect();
    let tick_text: Vec<&str> = ticks.iter().map(|(_, label)| *label).collect();
    // Plotly stacks categories bottom-up, so reverse the top-down order.
    let categories: Vec<&str> = figure.leagues.iter().rev().map(|l| l.abbreviation()).collect();

    let today_x = axis.today_x();
    let mut shapes = vec![json!({
        "type": "line",
        "xref": "x",
        "yref": "paper",
        "x0": today_x,
        "x1": today_x,
        "y0": 0,
        "y1": 1.05,
        "line": { "color": "red", "width": 2, "dash": "dash" },
    })];
    let mut annotations = vec![json!({
        "x": today_x,
        "y": 1,
        "yref": "paper",
        "yanchor": "bottom",
        "yshift": 15,
        "text": axis.today_label(),
        "showarrow": false,
        "font": { "size": 10 },
    })];
    for (x, year) in axis.year_boundaries() {
        shapes.push(json!({
            "type": "line",
            "xref": "x",
            "yref": "paper",
            "x0": x,
            "x1": x,
            "y0": 0,
            "y1": 1,
            "line": { "color": "brown", "width": 2 },
        }));
        annotations.push(json!({
            "x": x,
            "y": 1,
            "yref": "paper",
            "yanchor": "bottom",
            "text": format!("Start {year}"),
            "showarrow": false,
            "font": { "size": 10 },
        }));
    }

    json!({
        "title": {
            "text": figure.title,
            "font": { "size": 16 },
            "x": 0.5,
            "xanchor": "center",
        },
        "xaxis": {
            "title": { "text": axis.title(), "font": { "size": 12 } },
            "tickmode": "array",
            "tickvals": tick_vals,
            "ticktext": tick_text,
            "range": [1, 36],
            "showgrid": true,
            "gridcolor": "lightgray",
            "gridwidth": 1,
            "tickfont": { "size": 10 },
        },
        "yaxis": {
            "title": { "text": "League", "font": { "size": 12 } },
            "categoryorder": "array",
            "categoryarray": categories,
            "tickfont": { "size": 10 },
        },
        "barmode": "overlay",
        "height": 450,
        "width": 900,
        "plot_bgcolor": "white",
        "showlegend": false,
        "autosize": false,
        "margin": { "l": 80, "r": 20, "t": 60, "b": 80 },
        "shapes": shapes,
        "annotations": annotations,
    })
}
