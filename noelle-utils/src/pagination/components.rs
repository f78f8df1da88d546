//! Pagination UI component builders (page select, first/back/indicator/next/last).

use twilight_model::channel::message::{
    EmojiReactionType,
    component::{ActionRow, Button, ButtonStyle, Component, SelectMenu, SelectMenuOption, SelectMenuType},
};

use super::token::{ComponentAction, build_custom_id};
use super::view::Navigation;

/// Most options Discord accepts in one select menu.
pub const MAX_SELECT_OPTIONS: usize = 25;

/// Select menu shown with one page. Each option is both label and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelect {
    pub placeholder: String,
    pub options: Vec<String>,
}

impl PageSelect {
    pub fn new(placeholder: impl Into<String>, options: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            placeholder: placeholder.into(),
            options: options.into_iter().map(Into::into).take(MAX_SELECT_OPTIONS).collect(),
        }
    }
}

/// Components for one render: nothing once closed, otherwise the page's
/// select row and, when there is more than one page, the navigation row.
pub fn build_page_components(
    session_id: Option<u64>,
    page_label: Option<&str>,
    select: Option<&PageSelect>,
) -> Vec<Component> {
    let Some(session_id) = session_id else {
        return Vec::new();
    };

    let mut rows = Vec::with_capacity(2);
    if let Some(select) = select.filter(|select| !select.options.is_empty()) {
        rows.push(select_row(session_id, select));
    }
    if let Some(label) = page_label {
        rows.push(nav_row(session_id, label));
    }
    rows
}

fn select_row(session_id: u64, select: &PageSelect) -> Component {
    let options = select
        .options
        .iter()
        .map(|option| SelectMenuOption {
            default: false,
            description: None,
            emoji: None,
            label: option.clone(),
            value: option.clone(),
        })
        .collect();

    Component::ActionRow(ActionRow {
        id: None,
        components: vec![Component::SelectMenu(SelectMenu {
            id: None,
            channel_types: None,
            custom_id: build_custom_id(session_id, ComponentAction::Pick),
            default_values: None,
            disabled: false,
            kind: SelectMenuType::Text,
            max_values: Some(1),
            min_values: Some(1),
            options: Some(options),
            placeholder: Some(select.placeholder.clone()),
            required: None,
        })],
    })
}

fn nav_row(session_id: u64, label: &str) -> Component {
    let buttons = [
        nav_button(session_id, Navigation::First, "First", "⏮"),
        nav_button(session_id, Navigation::Previous, "Back", "◀"),
        Button {
            id: None,
            custom_id: Some(build_custom_id(session_id, ComponentAction::Indicator)),
            disabled: true,
            emoji: None,
            label: Some(label.to_owned()),
            style: ButtonStyle::Secondary,
            url: None,
            sku_id: None,
        },
        nav_button(session_id, Navigation::Next, "Next", "▶"),
        nav_button(session_id, Navigation::Last, "Last", "⏭"),
    ];

    Component::ActionRow(ActionRow {
        id: None,
        components: buttons.into_iter().map(Component::Button).collect(),
    })
}

fn nav_button(session_id: u64, navigation: Navigation, label: &str, emoji: &str) -> Button {
    Button {
        id: None,
        custom_id: Some(build_custom_id(session_id, ComponentAction::Navigate(navigation))),
        disabled: false,
        emoji: Some(EmojiReactionType::Unicode {
            name: emoji.to_owned(),
        }),
        label: Some(label.to_owned()),
        style: ButtonStyle::Secondary,
        url: None,
        sku_id: None,
    }
}
