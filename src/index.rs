use crate::preferences::Category;
use crate::presentation::DocumentState;
use crate::server::{lock_customizer, AppState};
use askama_axum::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
};
use std::sync::Arc;

/// One selectable entry of the customizer panel
pub struct PanelOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// An option group of the customizer panel
pub struct PanelGroup {
    pub category: &'static str,
    pub title: &'static str,
    pub options: Vec<PanelOption>,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub site_name: String,
    pub dir: String,
    pub body_class: String,
    pub body_text: String,
    pub nav_class: String,
    pub wrapper_class: String,
    pub root_style: String,
    pub groups: Vec<PanelGroup>,
}

fn group_title(category: Category) -> &'static str {
    match category {
        Category::Sidebar => "انتخاب های سایدبار",
        Category::Layout => "لایه ها",
        Category::Color => "رنگ ها",
        Category::TextSize => "اندازه متن",
    }
}

fn option_label(value: &str) -> &'static str {
    match value {
        "vertical-sidebar" => "عمودی",
        "horizontal-sidebar" => "افقی",
        "dark-sidebar" => "تاریک",
        "rtl" => "راستچین",
        "ltr" => "چپ چین",
        "box-layout" => "جعبه ای",
        "small-text" => "کوچک",
        "medium-text" => "متوسط",
        "large-text" => "بزرگ",
        // color swatches carry no text
        _ => "",
    }
}

/// Builds the customizer panel with the document's selected markers
#[must_use]
pub fn panel_groups(document: &DocumentState) -> Vec<PanelGroup> {
    Category::ALL
        .into_iter()
        .map(|category| PanelGroup {
            category: category.key(),
            title: group_title(category),
            options: category
                .allowed_values()
                .iter()
                .map(|&value| PanelOption {
                    value,
                    label: option_label(value),
                    selected: document.is_selected(category, value),
                })
                .collect(),
        })
        .collect()
}

impl IndexTemplate {
    #[must_use]
    pub fn new(site_name: String, document: &DocumentState) -> Self {
        let attr = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            site_name,
            dir: attr(&document.dir),
            body_class: attr(&document.body_class),
            body_text: attr(&document.body_text),
            nav_class: attr(&document.nav_class),
            wrapper_class: attr(&document.wrapper_class),
            root_style: document.root_style(),
            groups: panel_groups(document),
        }
    }
}

/// Renders the dashboard shell with the stored preferences applied
pub async fn generate_index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    tracing::debug!("Generating index template");

    let document = {
        let mut customizer = match lock_customizer(&state) {
            Ok(guard) => guard,
            Err(response) => return response,
        };
        customizer.apply_on_load();
        customizer.port().clone()
    };

    let template = IndexTemplate::new(state.config.site_name.clone(), &document);
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template rendering error: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Template rendering error").into_response()
        }
    }
}
