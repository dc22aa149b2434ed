use askama::Template;
use askama_web::WebTemplate;

/// Sidebar page; the chart is loaded from `/api/scene`.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub satellites: Vec<String>,
    pub start_date: String,
    pub days: u32,
    pub min_days: u32,
    pub max_days: u32,
    pub step_minutes: u32,
    pub min_step_minutes: u32,
    pub max_step_minutes: u32,
}

/// Self-contained page with the figure embedded, written by `gati export`.
#[derive(Template)]
#[template(path = "standalone.html")]
pub struct StandaloneTemplate {
    pub title: String,
    pub figure_json: String,
    pub notice: Option<String>,
    pub warnings: Vec<String>,
}
