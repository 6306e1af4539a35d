use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::catalog::CatalogState;
use crate::config::ColorConfig;
use crate::domain::item::{humanize, STAT_SCALE_MAX};
use crate::domain::{Item, KNOWN_CATEGORIES};
use crate::tui::app::{Mode, TuiApp};

const STAT_BAR_WIDTH: usize = 24;

pub fn render(frame: &mut Frame, app: &mut TuiApp, colors: &ColorConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Filter bar
            Constraint::Min(5),    // Results
            Constraint::Length(1), // Pagination
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_filter_bar(frame, app, chunks[0], colors);
    render_results(frame, app, chunks[1], colors);
    render_pagination(frame, app, chunks[2], colors);
    render_status_bar(frame, app, chunks[3], colors);

    match app.mode {
        Mode::Categories => render_categories_popup(frame, app, colors),
        Mode::Detail(_) => render_detail_popup(frame, app, colors),
        Mode::Browse | Mode::Search => {}
    }
}

fn render_filter_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let searching = app.mode == Mode::Search;
    let border_style = if searching {
        Style::default().fg(colors.active_border)
    } else {
        Style::default().fg(colors.inactive_border)
    };

    let mut spans = vec![Span::raw("Search: ")];
    if searching {
        spans.push(Span::styled(
            format!("{}_", app.search_input),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    } else if app.search_input.is_empty() {
        spans.push(Span::styled("(none)", Style::default().fg(colors.muted)));
    } else {
        spans.push(Span::raw(app.search_input.clone()));
    }

    if let Some(catalog) = &app.catalog {
        let filters = catalog.filters();
        spans.push(Span::raw("  Types: "));
        if filters.categories.is_empty() {
            spans.push(Span::styled("all", Style::default().fg(colors.muted)));
        } else {
            for category in &filters.categories {
                spans.push(Span::styled(
                    format!("{} ", category),
                    Style::default().fg(colors.category(category)),
                ));
            }
        }
        let generation = filters
            .generation
            .map(|g| g.to_string())
            .unwrap_or_else(|| "All generations".to_string());
        spans.push(Span::raw(format!("  {}  Sort: {}", generation, filters.sort_by)));
        if filters.favorites_only {
            spans.push(Span::styled("  ★ only", Style::default().fg(colors.favorite)));
        }
    }

    let block = Block::default()
        .title(" Filters ")
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_results(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &ColorConfig) {
    let block = Block::default()
        .title(" Catalog ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.inactive_border));

    let Some(catalog) = &app.catalog else {
        let message = match &app.load_error {
            Some(error) => Paragraph::new(error.as_str()).style(Style::default().fg(colors.error)),
            None if app.is_loading => Paragraph::new("Loading catalog..."),
            None => Paragraph::new("Nothing loaded"),
        };
        frame.render_widget(message.block(block).wrap(Wrap { trim: true }), area);
        return;
    };

    let view = catalog.view();
    if view.rows.is_empty() {
        let message = if catalog.items().is_empty() {
            "The catalog is empty"
        } else {
            "No matches. Press x to reset filters."
        };
        frame.render_widget(
            Paragraph::new(message)
                .style(Style::default().fg(colors.muted))
                .block(block),
            area,
        );
        return;
    }

    let rows: Vec<ListItem> = view
        .rows
        .iter()
        .map(|row| {
            let marker = if row.is_favorite {
                Span::styled("★ ", Style::default().fg(colors.favorite))
            } else {
                Span::raw("  ")
            };
            let mut spans = vec![
                marker,
                Span::styled(format!("#{:<5}", row.item.id), Style::default().fg(colors.muted)),
                Span::styled(
                    format!("{:<14}", row.item.display_name()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ];
            for category in &row.item.categories {
                spans.push(Span::styled(
                    format!("{:<9}", category),
                    Style::default().fg(colors.category(category)),
                ));
            }
            spans.push(Span::styled(
                format!(" {:.1} m · {:.1} kg", row.item.height, row.item.weight),
                Style::default().fg(colors.muted),
            ));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let highlight_style = Style::default()
        .bg(colors.selection_bg)
        .fg(colors.selection_fg)
        .add_modifier(Modifier::BOLD);

    let list = List::new(rows)
        .block(block)
        .highlight_style(highlight_style)
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_pagination(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let Some(catalog) = &app.catalog else {
        return;
    };
    let page = catalog.view().page;
    let line = format!(
        " {}  ({} per page, {} favorites)",
        page.summary(),
        page.page_size,
        catalog.favorites().len()
    );
    frame.render_widget(
        Paragraph::new(line).style(Style::default().fg(colors.muted)),
        area,
    );
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let status = if let Some(msg) = &app.status_message {
        msg.clone()
    } else {
        match app.mode {
            Mode::Search => "Type to search  Enter/Esc:Done".to_string(),
            Mode::Categories => "j/k:Nav  Enter/Space:Toggle  Esc:Close".to_string(),
            Mode::Detail(_) => "j/k:Scroll  f:Favorite  o:Image  Esc:Close".to_string(),
            Mode::Browse => {
                "j/k:Nav  n/p:Page  /:Search  c:Types  g:Gen  s:Sort  z:Size  f:Fav  F:Favs only  x:Reset  q:Quit"
                    .to_string()
            }
        }
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    frame.render_widget(paragraph, area);
}

fn render_categories_popup(frame: &mut Frame, app: &mut TuiApp, colors: &ColorConfig) {
    let area = centered(frame.area(), 30, KNOWN_CATEGORIES.len() as u16 + 2);
    let selected = app
        .catalog
        .as_ref()
        .map(|c| c.filters().categories.clone())
        .unwrap_or_default();

    let rows: Vec<ListItem> = KNOWN_CATEGORIES
        .iter()
        .map(|category| {
            let check = if selected.contains(*category) { "[x] " } else { "[ ] " };
            ListItem::new(Line::from(vec![
                Span::raw(check),
                Span::styled(*category, Style::default().fg(colors.category(category))),
            ]))
        })
        .collect();

    let block = Block::default()
        .title(" Types ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.active_border));

    let list = List::new(rows)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut app.category_list_state);
}

fn render_detail_popup(frame: &mut Frame, app: &TuiApp, colors: &ColorConfig) {
    let (Some(catalog), Some(item)) = (app.catalog.as_ref(), app.detail_item()) else {
        return;
    };
    let area = centered(frame.area(), 60, 24);

    let block = Block::default()
        .title(format!(" #{} {} ", item.id, item.display_name()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.active_border));

    let paragraph = Paragraph::new(detail_text(catalog, item, colors))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn detail_text<'a>(catalog: &CatalogState, item: &'a Item, colors: &ColorConfig) -> Text<'a> {
    let mut lines = Vec::new();

    let mut badges: Vec<Span> = item
        .categories
        .iter()
        .map(|c| Span::styled(format!("{} ", c), Style::default().fg(colors.category(c))))
        .collect();
    if catalog.is_favorite(item.id) {
        badges.push(Span::styled("★ favorite", Style::default().fg(colors.favorite)));
    }
    lines.push(Line::from(badges));
    lines.push(Line::from(format!(
        "Height {:.1} m   Weight {:.1} kg",
        item.height, item.weight
    )));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "Abilities",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    if item.abilities.is_empty() {
        lines.push(Line::from(Span::styled("  none", Style::default().fg(colors.muted))));
    }
    for ability in &item.abilities {
        lines.push(Line::from(format!("  {}", humanize(ability))));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        format!("Stats (scale {})", STAT_SCALE_MAX),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for stat in &item.stats {
        let filled = (stat.ratio() * STAT_BAR_WIDTH as f64).round() as usize;
        lines.push(Line::from(vec![
            Span::raw(format!("  {:<16}{:>4} ", humanize(&stat.name), stat.value)),
            Span::styled("█".repeat(filled), Style::default().fg(colors.stat_bar)),
            Span::styled(
                "░".repeat(STAT_BAR_WIDTH - filled),
                Style::default().fg(colors.muted),
            ),
        ]));
    }

    if item.has_image() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Image: {}", item.image),
            Style::default().fg(colors.muted),
        )));
    }

    Text::from(lines)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    area
}
