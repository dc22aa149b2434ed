//! Plotly figure JSON for the animated scene.
//!
//! Trace layout: index 0 is the Earth surface, then one trail trace and one
//! marker trace per satellite, in track order. Every animation frame rewrites
//! the satellite traces (indices `1..=2n`) and leaves the Earth alone.

use serde::Serialize;
use serde_json::{json, Value};

use crate::predict::ReferenceFrame;
use crate::registry::Satellite;
use crate::scene::{EarthMesh, Frame};

const EARTH_OPACITY: f64 = 0.7;
const LINE_WIDTH: u32 = 4;
const MARKER_SIZE: u32 = 4;
const PLAY_FRAME_MS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MarkerSymbol {
    Circle,
    Square,
    Diamond,
    Cross,
    X,
    TriangleUp,
    TriangleDown,
    TriangleLeft,
    TriangleRight,
    Star,
}

impl MarkerSymbol {
    pub const ALL: [MarkerSymbol; 10] = [
        MarkerSymbol::Circle,
        MarkerSymbol::Square,
        MarkerSymbol::Diamond,
        MarkerSymbol::Cross,
        MarkerSymbol::X,
        MarkerSymbol::TriangleUp,
        MarkerSymbol::TriangleDown,
        MarkerSymbol::TriangleLeft,
        MarkerSymbol::TriangleRight,
        MarkerSymbol::Star,
    ];

    /// Symbol for the satellite at `index` in registry order.
    pub fn for_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Surface(SurfaceTrace),
    Scatter3d(Scatter3dTrace),
}

#[derive(Debug, Clone, Serialize)]
pub struct SurfaceTrace {
    pub x: Vec<Vec<f64>>,
    pub y: Vec<Vec<f64>>,
    pub z: Vec<Vec<f64>>,
    pub opacity: f64,
    pub showscale: bool,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Scatter3dTrace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<MarkerStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textposition: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineStyle {
    pub width: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkerStyle {
    pub size: u32,
    pub symbol: MarkerSymbol,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlotFrame {
    pub name: String,
    pub data: Vec<Trace>,
    pub traces: Vec<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Value,
    pub frames: Vec<PlotFrame>,
}

impl Figure {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

/// Assemble the figure: Earth, initial satellite traces taken from
/// `frames[initial_frame]`, one Plotly frame per scene frame, and the
/// play/pause/slider controls.
///
/// `satellites` is the full registry; a satellite's position in it picks its
/// marker symbol, so symbols stay put when others are left out.
pub fn build_figure(
    earth: &EarthMesh,
    satellites: &[Satellite],
    frames: &[Frame],
    reference_frame: ReferenceFrame,
    initial_frame: usize,
) -> Figure {
    let active = initial_frame.min(frames.len().saturating_sub(1));

    let mut data = vec![earth_trace(earth)];
    if let Some(frame) = frames.get(active) {
        data.extend(satellite_traces(frame, satellites, true));
    }

    let trace_count = frames.first().map(|f| f.markers.len() * 2).unwrap_or(0);
    let plot_frames = frames
        .iter()
        .map(|frame| PlotFrame {
            name: frame_name(frame.index),
            data: satellite_traces(frame, satellites, false),
            traces: (1..=trace_count).collect(),
        })
        .collect();

    Figure {
        data,
        layout: layout(frames, reference_frame, active),
        frames: plot_frames,
    }
}

pub fn frame_name(index: usize) -> String {
    format!("f{}", index)
}

fn earth_trace(earth: &EarthMesh) -> Trace {
    Trace::Surface(SurfaceTrace {
        x: earth.x.clone(),
        y: earth.y.clone(),
        z: earth.z.clone(),
        opacity: EARTH_OPACITY,
        showscale: false,
        name: "Earth".to_string(),
    })
}

fn satellite_traces(frame: &Frame, satellites: &[Satellite], initial: bool) -> Vec<Trace> {
    let mut traces = Vec::with_capacity(frame.markers.len() * 2);
    for (trail, marker) in frame.trails.iter().zip(&frame.markers) {
        let symbol_index = satellites
            .iter()
            .position(|s| s.name == marker.satellite)
            .unwrap_or(0);

        traces.push(Trace::Scatter3d(Scatter3dTrace {
            x: trail.points_km.iter().map(|p| p[0]).collect(),
            y: trail.points_km.iter().map(|p| p[1]).collect(),
            z: trail.points_km.iter().map(|p| p[2]).collect(),
            mode: "lines",
            name: initial.then(|| format!("{} trail", trail.satellite)),
            line: Some(LineStyle { width: LINE_WIDTH }),
            showlegend: Some(false),
            ..Default::default()
        }));

        let [x, y, z] = marker.position_km;
        traces.push(Trace::Scatter3d(Scatter3dTrace {
            x: vec![x],
            y: vec![y],
            z: vec![z],
            mode: "markers+text",
            name: Some(marker.satellite.clone()),
            marker: Some(MarkerStyle {
                size: MARKER_SIZE,
                symbol: MarkerSymbol::for_index(symbol_index),
            }),
            text: Some(vec![marker.satellite.clone()]),
            textposition: Some("top center"),
            showlegend: initial.then_some(true),
            ..Default::default()
        }));
    }
    traces
}

fn layout(frames: &[Frame], reference_frame: ReferenceFrame, active: usize) -> Value {
    let hidden_axis = json!({ "visible": false });
    let mut layout = json!({
        "title": { "text": format!("Animated Orbits ({} frame)", reference_frame.short_label()) },
        "scene": {
            "xaxis": hidden_axis,
            "yaxis": hidden_axis,
            "zaxis": hidden_axis,
            "aspectmode": "data",
        },
        "margin": { "l": 0, "r": 0, "t": 40, "b": 0 },
        "legend": { "x": 0.01, "y": 0.01, "xanchor": "left", "yanchor": "bottom" },
    });

    if frames.is_empty() {
        return layout;
    }

    layout["updatemenus"] = json!([{
        "type": "buttons",
        "showactive": false,
        "buttons": [
            {
                "label": "Play",
                "method": "animate",
                "args": [null, {
                    "frame": { "duration": PLAY_FRAME_MS, "redraw": false },
                    "fromcurrent": true,
                    "transition": { "duration": 0 },
                }],
            },
            {
                "label": "Pause",
                "method": "animate",
                "args": [[null], {
                    "frame": { "duration": 0 },
                    "mode": "immediate",
                }],
            },
        ],
    }]);

    let steps: Vec<Value> = frames
        .iter()
        .map(|frame| {
            json!({
                "label": frame.timestamp.format("%m-%d %H:%M").to_string(),
                "method": "animate",
                "args": [[frame_name(frame.index)], {
                    "mode": "immediate",
                    "frame": { "duration": 0, "redraw": false },
                    "transition": { "duration": 0 },
                }],
            })
        })
        .collect();

    layout["sliders"] = json!([{
        "active": active,
        "currentvalue": { "prefix": "UTC " },
        "pad": { "t": 30 },
        "steps": steps,
    }]);

    layout
}
